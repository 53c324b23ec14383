//! Column conversion helpers shared by the row models.
//!
//! Money is stored as TEXT and enums as their lowercase names; a value that
//! does not parse back is reported as a corrupt row rather than defaulted.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::StorageError;
use pocketledger_core::transactions::SettlementTarget;

pub(crate) fn parse_decimal(value: &str, field: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::CorruptRow(format!("{} '{}': {}", field, value, e)))
}

pub(crate) fn parse_enum<T>(value: &str, field: &str) -> Result<T, StorageError>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(|e| StorageError::CorruptRow(format!("{}: {}", field, e)))
}

/// Splits a settlement target into its `(account_id, credit_card_id)` columns.
pub(crate) fn target_columns(target: &SettlementTarget) -> (Option<String>, Option<String>) {
    (
        target.account_id().map(str::to_string),
        target.credit_card_id().map(str::to_string),
    )
}

/// Rebuilds a settlement target; exactly one of the columns must be set.
pub(crate) fn target_from_columns(
    account_id: Option<String>,
    credit_card_id: Option<String>,
) -> Result<SettlementTarget, StorageError> {
    match (account_id, credit_card_id) {
        (Some(account), None) => Ok(SettlementTarget::Account(account)),
        (None, Some(card)) => Ok(SettlementTarget::CreditCard(card)),
        (account, card) => Err(StorageError::CorruptRow(format!(
            "settlement target must be exactly one of account/card, got {:?}/{:?}",
            account, card
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketledger_core::transactions::TransactionKind;

    #[test]
    fn test_target_columns_round_trip() {
        let target = SettlementTarget::CreditCard("card-1".to_string());
        let (account, card) = target_columns(&target);
        assert_eq!(account, None);
        assert_eq!(target_from_columns(account, card).unwrap(), target);
    }

    #[test]
    fn test_target_with_both_or_neither_column_is_corrupt() {
        assert!(matches!(
            target_from_columns(Some("a".into()), Some("c".into())),
            Err(StorageError::CorruptRow(_))
        ));
        assert!(matches!(
            target_from_columns(None, None),
            Err(StorageError::CorruptRow(_))
        ));
    }

    #[test]
    fn test_bad_column_values_are_corrupt_rows() {
        assert!(parse_decimal("12.5x", "amount").is_err());
        assert_eq!(parse_decimal("12.50", "amount").unwrap().to_string(), "12.50");
        assert!(parse_enum::<TransactionKind>("refund", "kind").is_err());
        assert_eq!(
            parse_enum::<TransactionKind>("expense", "kind").unwrap(),
            TransactionKind::Expense
        );
    }
}
