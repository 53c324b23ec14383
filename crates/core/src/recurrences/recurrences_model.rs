//! Recurrence domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_INSTALLMENTS;
use crate::transactions::{SettlementTarget, Transaction, TransactionKind};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// Template for a repeating or installment-based transaction.
///
/// A recurrence with neither `end_date` nor `installments` runs forever and
/// keeps exactly one pending transaction outstanding. Any other recurrence
/// materialises all of its transactions when it is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub target: SettlementTarget,
    pub category_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub installments: Option<i32>,
    pub is_active: bool,
    pub next_execution_date: NaiveDate,
    pub last_executed_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Recurrence {
    pub fn is_forever(&self) -> bool {
        self.end_date.is_none() && self.installments.is_none()
    }
}

/// Input model for creating a recurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurrence {
    #[serde(flatten)]
    pub target: SettlementTarget,
    pub category_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub installments: Option<u32>,
    /// Forever mode only: the occurrence on `start_date` was already settled,
    /// so the first pending transaction lands one step later.
    #[serde(default)]
    pub first_occurrence_paid: bool,
}

impl NewRecurrence {
    pub fn validate(&self) -> Result<()> {
        validate_kind(self.kind)?;
        validate_amount(self.amount)?;
        validate_description(&self.description)?;
        if self.category_id.trim().is_empty() {
            return Err(Error::invalid("Category is required"));
        }
        if let Some(n) = self.installments {
            if n < 2 {
                return Err(Error::invalid(
                    "A single payment is not a recurrence; use at least 2 installments",
                ));
            }
            if n > MAX_INSTALLMENTS {
                return Err(Error::invalid(format!(
                    "At most {} installments are allowed",
                    MAX_INSTALLMENTS
                )));
            }
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(Error::invalid("End date cannot be before start date"));
            }
        }
        Ok(())
    }
}

/// Partial update; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub target: Option<SettlementTarget>,
    pub kind: Option<TransactionKind>,
    pub is_active: Option<bool>,
}

impl RecurrenceUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(kind) = self.kind {
            validate_kind(kind)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }

    /// Whether any field with a transaction equivalent is being changed.
    pub fn touches_transactions(&self) -> bool {
        self.amount.is_some()
            || self.description.is_some()
            || self.category_id.is_some()
            || self.target.is_some()
            || self.kind.is_some()
    }
}

fn validate_kind(kind: TransactionKind) -> Result<()> {
    if kind == TransactionKind::Transfer {
        return Err(Error::invalid(
            "A recurrence must be an income or an expense",
        ));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid("Amount must be greater than zero"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::invalid("Description cannot be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceCreated {
    pub recurrence: Recurrence,
    pub transactions: Vec<Transaction>,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceUpdated {
    pub recurrence: Recurrence,
    pub updated_transactions: Vec<Transaction>,
    /// Pending occurrence created when a forever series is switched back on
    /// with nothing outstanding.
    pub next_transaction: Option<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceDetails {
    pub recurrence: Recurrence,
    pub pending_transactions: Vec<Transaction>,
    pub confirmed_transactions: Vec<Transaction>,
    pub total_value: Decimal,
    pub paid_value: Decimal,
    pub remaining_value: Decimal,
    pub pending_count: usize,
    pub confirmed_count: usize,
}
