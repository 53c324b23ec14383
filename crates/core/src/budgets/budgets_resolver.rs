use super::budgets_model::Budget;
use crate::utils::time_utils::{month_index, month_index_of};

/// Picks the budget in force for `(month, year)`.
///
/// A specific budget for the period always wins. Otherwise the newest
/// default whose creation month is not after the requested month applies.
/// `defaults` may come in any order.
pub fn resolve_budget(
    specific: Option<Budget>,
    mut defaults: Vec<Budget>,
    month: u32,
    year: i32,
) -> Option<Budget> {
    if let Some(budget) = specific {
        return Some(budget);
    }
    let requested = month_index(year, month);
    defaults.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    defaults
        .into_iter()
        .find(|budget| month_index_of(budget.created_at.date()) <= requested)
}
