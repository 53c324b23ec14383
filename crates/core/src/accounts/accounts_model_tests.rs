//! Tests for account domain models.

#[cfg(test)]
mod tests {
    use crate::accounts::{AccountType, AccountUpdate, NewAccount};
    use std::str::FromStr;

    fn new_account(name: &str) -> NewAccount {
        NewAccount {
            id: None,
            name: name.to_string(),
            account_type: AccountType::Checking,
            balance: None,
            currency: None,
            is_active: true,
        }
    }

    #[test]
    fn test_account_type_round_trips_through_str() {
        for kind in [
            AccountType::Checking,
            AccountType::Savings,
            AccountType::Investment,
            AccountType::Cash,
            AccountType::Other,
        ] {
            assert_eq!(AccountType::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(AccountType::from_str("brokerage").is_err());
    }

    #[test]
    fn test_account_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AccountType::Investment).unwrap(),
            "\"investment\""
        );
    }

    #[test]
    fn test_new_account_defaults_when_deserialized() {
        let parsed: NewAccount = serde_json::from_str(r#"{"name":"Wallet"}"#).unwrap();
        assert_eq!(parsed.account_type, AccountType::Checking);
        assert!(parsed.is_active);
        assert_eq!(parsed.currency_or_default(), "BRL");
    }

    #[test]
    fn test_new_account_rejects_blank_name() {
        assert!(new_account("   ").validate().is_err());
        assert!(new_account("Main").validate().is_ok());
    }

    #[test]
    fn test_account_update_requires_id() {
        let update = AccountUpdate {
            id: None,
            name: "Main".to_string(),
            account_type: AccountType::Savings,
            is_active: true,
        };
        assert!(update.validate().is_err());
    }
}
