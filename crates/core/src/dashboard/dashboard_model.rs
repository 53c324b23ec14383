use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month: u32,
    pub year: i32,
    /// Sum of active account balances.
    pub total_balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
    pub card_used_amount: Decimal,
    pub card_available_credit: Decimal,
    pub pending_count: usize,
}
