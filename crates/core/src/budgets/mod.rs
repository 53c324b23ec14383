//! Budgets module - 50/30/20 monthly plans and the period resolver.

mod budgets_model;
mod budgets_resolver;
mod budgets_service;
mod budgets_traits;


pub use budgets_model::{Budget, BudgetOverview, BudgetUpsert, BucketUsage, NewBudget};
pub use budgets_resolver::resolve_budget;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
