//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Where a transaction or recurrence settles: a bank account or a credit card.
///
/// Serialised as the pair `accountId` / `creditCardId`, exactly one of which
/// is set; owners flatten it into their own JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "TargetIds", try_from = "TargetIds")]
pub enum SettlementTarget {
    Account(String),
    CreditCard(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetIds {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub credit_card_id: Option<String>,
}

impl From<SettlementTarget> for TargetIds {
    fn from(target: SettlementTarget) -> Self {
        match target {
            SettlementTarget::Account(id) => TargetIds {
                account_id: Some(id),
                credit_card_id: None,
            },
            SettlementTarget::CreditCard(id) => TargetIds {
                account_id: None,
                credit_card_id: Some(id),
            },
        }
    }
}

impl TryFrom<TargetIds> for SettlementTarget {
    type Error = Error;

    fn try_from(ids: TargetIds) -> Result<Self> {
        SettlementTarget::from_ids(ids.account_id, ids.credit_card_id)
    }
}

impl SettlementTarget {
    /// Builds a target from a pair of optional ids; exactly one must be set.
    pub fn from_ids(account_id: Option<String>, credit_card_id: Option<String>) -> Result<Self> {
        match (account_id, credit_card_id) {
            (Some(account), None) => Ok(SettlementTarget::Account(account)),
            (None, Some(card)) => Ok(SettlementTarget::CreditCard(card)),
            (None, None) => Err(Error::invalid(
                "Either an account or a credit card is required",
            )),
            (Some(_), Some(_)) => Err(Error::invalid(
                "Only one of account or credit card may be set",
            )),
        }
    }

    pub fn account_id(&self) -> Option<&str> {
        match self {
            SettlementTarget::Account(id) => Some(id),
            SettlementTarget::CreditCard(_) => None,
        }
    }

    pub fn credit_card_id(&self) -> Option<&str> {
        match self {
            SettlementTarget::Account(_) => None,
            SettlementTarget::CreditCard(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "transfer" => Ok(TransactionKind::Transfer),
            other => Err(format!("Unknown transaction kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Confirmed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "confirmed" => Ok(TransactionStatus::Confirmed),
            other => Err(format!("Unknown transaction status: {}", other)),
        }
    }
}

/// A signed change to one balance field, produced by a confirmed transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum MoneyEffect {
    AccountBalance { account_id: String, delta: Decimal },
    CardUsedAmount { card_id: String, delta: Decimal },
}

impl MoneyEffect {
    pub fn inverse(self) -> Self {
        match self {
            MoneyEffect::AccountBalance { account_id, delta } => MoneyEffect::AccountBalance {
                account_id,
                delta: -delta,
            },
            MoneyEffect::CardUsedAmount { card_id, delta } => MoneyEffect::CardUsedAmount {
                card_id,
                delta: -delta,
            },
        }
    }
}

/// A ledger entry owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub target: SettlementTarget,
    pub category_id: Option<String>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    pub confirmed_at: Option<NaiveDateTime>,
    pub recurrence_id: Option<String>,
    pub installment_number: Option<i32>,
    pub installment_total: Option<i32>,
    pub is_investment_transfer: bool,
    pub is_card_payment: bool,
    pub transfer_to_account_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }

    /// Balance changes a confirmed transaction stands for.
    ///
    /// Transfer rows move money out of the source account and into
    /// `transfer_to_account_id`. Investment transfer and invoice payment
    /// records each describe their own side of the movement, so removing one
    /// of them undoes exactly that side.
    pub fn money_effects(&self) -> Vec<MoneyEffect> {
        let signed = match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
            TransactionKind::Transfer => {
                let mut effects = Vec::with_capacity(2);
                if let SettlementTarget::Account(from) = &self.target {
                    effects.push(MoneyEffect::AccountBalance {
                        account_id: from.clone(),
                        delta: -self.amount,
                    });
                }
                if let Some(to) = &self.transfer_to_account_id {
                    effects.push(MoneyEffect::AccountBalance {
                        account_id: to.clone(),
                        delta: self.amount,
                    });
                }
                return effects;
            }
        };
        vec![match &self.target {
            SettlementTarget::Account(id) => MoneyEffect::AccountBalance {
                account_id: id.clone(),
                delta: signed,
            },
            // Card expenses consume credit, card income releases it.
            SettlementTarget::CreditCard(id) => MoneyEffect::CardUsedAmount {
                card_id: id.clone(),
                delta: -signed,
            },
        }]
    }

    /// Whether the transaction takes part in income/expense aggregates.
    pub fn counts_in_totals(&self) -> bool {
        self.kind != TransactionKind::Transfer
            && !self.is_investment_transfer
            && !self.is_card_payment
    }
}

/// Input model for recording a one-off transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(flatten)]
    pub target: SettlementTarget,
    #[serde(default)]
    pub category_id: Option<String>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default = "default_new_status")]
    pub status: TransactionStatus,
}

fn default_new_status() -> TransactionStatus {
    TransactionStatus::Confirmed
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid("Amount must be greater than zero"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::invalid("Description cannot be empty"));
        }
        if self.kind == TransactionKind::Transfer {
            return Err(Error::invalid(
                "Transfers are recorded through the transfer endpoint",
            ));
        }
        Ok(())
    }
}

/// Listing filter; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Option<TransactionStatus>,
    pub account_id: Option<String>,
    pub credit_card_id: Option<String>,
}

impl TransactionFilter {
    pub fn for_month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(Error::invalid("Month must be between 1 and 12"));
            }
            if self.year.is_none() {
                return Err(Error::invalid("A month filter requires a year"));
            }
        }
        Ok(())
    }
}
