use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Whether a category classifies income or expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(format!("Unknown category kind: {}", other)),
        }
    }
}

/// 50/30/20 bucket an expense category counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetGroup {
    Necessities,
    Wants,
    Savings,
}

impl BudgetGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetGroup::Necessities => "necessities",
            BudgetGroup::Wants => "wants",
            BudgetGroup::Savings => "savings",
        }
    }
}

impl FromStr for BudgetGroup {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "necessities" => Ok(BudgetGroup::Necessities),
            "wants" => Ok(BudgetGroup::Wants),
            "savings" => Ok(BudgetGroup::Savings),
            other => Err(format!("Unknown budget group: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub budget_group: Option<BudgetGroup>,
    pub color: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    #[serde(default)]
    pub budget_group: Option<BudgetGroup>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("Category name cannot be empty"));
        }
        if self.kind == CategoryKind::Income && self.budget_group.is_some() {
            return Err(Error::invalid(
                "Only expense categories can belong to a budget group",
            ));
        }
        if let Some(color) = &self.color {
            let hex = color.strip_prefix('#').unwrap_or(color);
            if !(hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())) {
                return Err(Error::invalid(format!("Invalid color '{}'", color)));
            }
        }
        Ok(())
    }
}
