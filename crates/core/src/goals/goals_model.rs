//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub is_achieved: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Replacement values for an existing goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

fn validate_amounts(title: &str, target: Decimal, current: Decimal) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::invalid("Goal title cannot be empty"));
    }
    if target <= Decimal::ZERO {
        return Err(Error::invalid("Target amount must be greater than zero"));
    }
    if current.is_sign_negative() {
        return Err(Error::invalid("Current amount cannot be negative"));
    }
    Ok(())
}

/// A goal is achieved once the saved amount reaches the target.
pub(crate) fn achieved(target: Decimal, current: Decimal) -> bool {
    current >= target
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_amounts(&self.title, self.target_amount, self.current_amount)
    }

    pub fn is_achieved(&self) -> bool {
        achieved(self.target_amount, self.current_amount)
    }
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::invalid("Goal id is required"));
        }
        validate_amounts(&self.title, self.target_amount, self.current_amount)
    }

    pub fn is_achieved(&self) -> bool {
        achieved(self.target_amount, self.current_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_goal_achieved_when_current_reaches_target() {
        let mut goal = NewGoal {
            title: "Trip".to_string(),
            description: None,
            target_amount: dec!(3000),
            current_amount: dec!(2999.99),
            deadline: None,
        };
        assert!(!goal.is_achieved());
        goal.current_amount = dec!(3000);
        assert!(goal.is_achieved());
    }

    #[test]
    fn test_goal_rejects_zero_target() {
        let goal = NewGoal {
            title: "Trip".to_string(),
            description: None,
            target_amount: dec!(0),
            current_amount: dec!(0),
            deadline: None,
        };
        assert!(goal.validate().is_err());
    }
}
