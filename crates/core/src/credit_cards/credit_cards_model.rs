//! Credit card domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a credit card. `used_amount` is the utilised
/// credit and never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub credit_limit: Decimal,
    pub used_amount: Decimal,
    pub closing_day: i32,
    pub due_day: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CreditCard {
    pub fn available_credit(&self) -> Decimal {
        self.credit_limit - self.used_amount
    }
}

/// Input model for creating a new credit card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreditCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub credit_limit: Decimal,
    pub closing_day: i32,
    pub due_day: i32,
}

/// Input model for updating a credit card. `used_amount` only moves through
/// confirmed transactions and invoice payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardUpdate {
    pub id: Option<String>,
    pub name: String,
    pub credit_limit: Decimal,
    pub closing_day: i32,
    pub due_day: i32,
    pub is_active: bool,
}

fn validate_card_fields(name: &str, credit_limit: Decimal, closing: i32, due: i32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Card name cannot be empty".to_string(),
        )));
    }
    if credit_limit.is_sign_negative() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Credit limit cannot be negative".to_string(),
        )));
    }
    for (field, day) in [("closingDay", closing), ("dueDay", due)] {
        if !(1..=31).contains(&day) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "{} must be between 1 and 31",
                field
            ))));
        }
    }
    Ok(())
}

impl NewCreditCard {
    pub fn validate(&self) -> Result<()> {
        validate_card_fields(&self.name, self.credit_limit, self.closing_day, self.due_day)
    }
}

impl CreditCardUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        validate_card_fields(&self.name, self.credit_limit, self.closing_day, self.due_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_available_credit() {
        let now = chrono::Utc::now().naive_utc();
        let card = CreditCard {
            id: "c1".to_string(),
            user_id: "u1".to_string(),
            name: "Visa".to_string(),
            credit_limit: dec!(5000),
            used_amount: dec!(1250.50),
            closing_day: 3,
            due_day: 10,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(card.available_credit(), dec!(3749.50));
    }

    #[test]
    fn test_new_card_validation() {
        let mut card = NewCreditCard {
            id: None,
            name: "Visa".to_string(),
            credit_limit: dec!(1000),
            closing_day: 5,
            due_day: 12,
        };
        assert!(card.validate().is_ok());
        card.due_day = 32;
        assert!(card.validate().is_err());
        card.due_day = 12;
        card.credit_limit = dec!(-1);
        assert!(card.validate().is_err());
    }
}
