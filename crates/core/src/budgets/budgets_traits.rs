use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::budgets_model::{Budget, BudgetOverview, BudgetUpsert, NewBudget};
use crate::errors::Result;

#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// The non-default budget for exactly this period, if any.
    fn find_specific(&self, user_id: &str, month: u32, year: i32) -> Result<Option<Budget>>;

    /// Every default budget of the user, newest first.
    fn list_defaults(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// Updates the row matching `(user, month, year, is_default)` in place or
    /// inserts a new one. Runs as a single write.
    async fn upsert(&self, user_id: &str, budget: BudgetUpsert, now: NaiveDateTime)
        -> Result<Budget>;
}

#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn resolve_budget(&self, user_id: &str, month: u32, year: i32) -> Result<Option<Budget>>;

    async fn upsert_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;

    fn get_budget_overview(&self, user_id: &str, month: u32, year: i32)
        -> Result<BudgetOverview>;
}
