//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MONEY_DECIMAL_PRECISION, NECESSITIES_SHARE, SAVINGS_SHARE, WANTS_SHARE,
};
use crate::{Error, Result};

/// Monthly spending plan split into necessities, wants and savings.
///
/// A specific budget (`is_default = false`) applies to its own month only.
/// A default budget applies from the month it was created onwards, until a
/// newer default replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub month: i32,
    pub year: i32,
    pub total_income: Decimal,
    pub necessities_budget: Decimal,
    pub necessities_spent: Decimal,
    pub wants_budget: Decimal,
    pub wants_spent: Decimal,
    pub savings_budget: Decimal,
    pub savings_spent: Decimal,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request to create or replace a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    #[serde(default)]
    pub necessities_budget: Option<Decimal>,
    #[serde(default)]
    pub wants_budget: Option<Decimal>,
    #[serde(default)]
    pub savings_budget: Option<Decimal>,
    #[serde(default)]
    pub is_default: bool,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) {
            return Err(Error::invalid("Month must be between 1 and 12"));
        }
        if !(2000..=2100).contains(&self.year) {
            return Err(Error::invalid("Year must be between 2000 and 2100"));
        }
        let amounts = [
            Some(self.total_income),
            self.necessities_budget,
            self.wants_budget,
            self.savings_budget,
        ];
        if amounts.iter().flatten().any(|a| a.is_sign_negative()) {
            return Err(Error::invalid("Budget amounts cannot be negative"));
        }
        Ok(())
    }

    /// Fills omitted buckets with the 50/30/20 split of `total_income`.
    pub fn into_upsert(self) -> BudgetUpsert {
        let share = |explicit: Option<Decimal>, ratio: Decimal| {
            explicit.unwrap_or_else(|| (self.total_income * ratio).round_dp(MONEY_DECIMAL_PRECISION))
        };
        BudgetUpsert {
            month: self.month as i32,
            year: self.year,
            total_income: self.total_income,
            necessities_budget: share(self.necessities_budget, NECESSITIES_SHARE),
            wants_budget: share(self.wants_budget, WANTS_SHARE),
            savings_budget: share(self.savings_budget, SAVINGS_SHARE),
            is_default: self.is_default,
        }
    }
}

/// Fully resolved budget values handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUpsert {
    pub month: i32,
    pub year: i32,
    pub total_income: Decimal,
    pub necessities_budget: Decimal,
    pub wants_budget: Decimal,
    pub savings_budget: Decimal,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketUsage {
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

impl BucketUsage {
    pub fn new(budgeted: Decimal, spent: Decimal) -> Self {
        Self {
            budgeted,
            spent,
            remaining: budgeted - spent,
        }
    }
}

/// Resolved budget for a month next to what was actually spent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub month: u32,
    pub year: i32,
    pub budget: Option<Budget>,
    pub necessities: BucketUsage,
    pub wants: BucketUsage,
    pub savings: BucketUsage,
    /// Expenses whose category has no budget group.
    pub unassigned_spent: Decimal,
}
