use chrono::NaiveDateTime;
use pocketledger_core::accounts as core_accounts;
use pocketledger_core::recurrences::RecurrenceUpdate;
use pocketledger_core::transactions::{SettlementTarget, TransactionKind};
use pocketledger_core::{Error as CoreError, Result as CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub balance: Decimal,
    pub currency: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::Account> for Account {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            account_type: a.account_type.to_string(),
            balance: a.balance,
            currency: a.currency,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn parse_account_type(raw: Option<&str>) -> CoreResult<core_accounts::AccountType> {
    match raw {
        None => Ok(core_accounts::AccountType::default()),
        Some(s) => s.trim().to_lowercase().parse().map_err(CoreError::invalid),
    }
}

impl TryFrom<NewAccount> for core_accounts::NewAccount {
    type Error = CoreError;

    fn try_from(a: NewAccount) -> CoreResult<Self> {
        Ok(Self {
            id: None,
            account_type: parse_account_type(a.account_type.as_deref())?,
            name: a.name,
            balance: a.balance,
            currency: a.currency,
            is_active: a.is_active,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: String,
    pub account_type: String,
    pub is_active: bool,
}

impl AccountUpdate {
    /// Binds the body to the account addressed by the request path.
    pub fn into_core(self, id: String) -> CoreResult<core_accounts::AccountUpdate> {
        Ok(core_accounts::AccountUpdate {
            id: Some(id),
            account_type: parse_account_type(Some(&self.account_type))?,
            name: self.name,
            is_active: self.is_active,
        })
    }
}

/// Body of `PUT /transactions/{id}/confirm`. When `accountId` is given the
/// transaction settles on that account instead of its original target.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    #[serde(default)]
    pub account_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceUpdateRequest {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub credit_card_id: Option<String>,
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<RecurrenceUpdateRequest> for RecurrenceUpdate {
    type Error = CoreError;

    fn try_from(req: RecurrenceUpdateRequest) -> CoreResult<Self> {
        let target = match (&req.account_id, &req.credit_card_id) {
            (None, None) => None,
            _ => Some(SettlementTarget::from_ids(req.account_id, req.credit_card_id)?),
        };
        Ok(Self {
            amount: req.amount,
            description: req.description,
            category_id: req.category_id,
            target,
            kind: req.kind,
            is_active: req.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_account_defaults_to_checking() {
        let body: NewAccount = serde_json::from_str(r#"{"name":"Wallet"}"#).unwrap();
        let core: core_accounts::NewAccount = body.try_into().unwrap();
        assert_eq!(core.account_type, core_accounts::AccountType::Checking);
        assert!(core.is_active);
    }

    #[test]
    fn unknown_account_type_is_a_validation_error() {
        let body = AccountUpdate {
            name: "Broker".into(),
            account_type: "crypto".into(),
            is_active: true,
        };
        assert!(matches!(
            body.into_core("a1".into()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn recurrence_update_target_is_optional_but_exclusive() {
        let untouched: RecurrenceUpdate = RecurrenceUpdateRequest {
            amount: Some(dec!(10)),
            ..Default::default()
        }
        .try_into()
        .unwrap();
        assert!(untouched.target.is_none());

        let rebound: RecurrenceUpdate = RecurrenceUpdateRequest {
            credit_card_id: Some("c1".into()),
            ..Default::default()
        }
        .try_into()
        .unwrap();
        assert_eq!(
            rebound.target,
            Some(SettlementTarget::CreditCard("c1".into()))
        );

        let both = RecurrenceUpdate::try_from(RecurrenceUpdateRequest {
            account_id: Some("a1".into()),
            credit_card_id: Some("c1".into()),
            ..Default::default()
        });
        assert!(both.is_err());
    }
}
