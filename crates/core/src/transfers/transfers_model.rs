use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::Account;
use crate::credit_cards::CreditCard;
use crate::transactions::Transaction;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl TransferRequest {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid("Amount must be greater than zero"));
        }
        if self.from_account_id == self.to_account_id {
            return Err(Error::invalid(
                "Source and destination accounts must be different",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub from_account: Account,
    pub to_account: Account,
    pub transactions: Vec<Transaction>,
}

/// Payment of a credit-card invoice from a bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayment {
    pub account_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl CardPayment {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid("Amount must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentResult {
    pub account: Account,
    pub card: CreditCard,
    pub transactions: Vec<Transaction>,
}
