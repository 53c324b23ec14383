use rust_decimal::Decimal;
use std::sync::Arc;

use super::dashboard_model::DashboardSummary;
use crate::accounts::AccountRepositoryTrait;
use crate::credit_cards::CreditCardRepositoryTrait;
use crate::errors::{Error, Result};
use crate::transactions::{
    TransactionFilter, TransactionKind, TransactionRepositoryTrait, TransactionStatus,
};

pub trait DashboardServiceTrait: Send + Sync {
    fn get_summary(&self, user_id: &str, month: u32, year: i32) -> Result<DashboardSummary>;
}

pub struct DashboardService {
    accounts: Arc<dyn AccountRepositoryTrait>,
    cards: Arc<dyn CreditCardRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        accounts: Arc<dyn AccountRepositoryTrait>,
        cards: Arc<dyn CreditCardRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            accounts,
            cards,
            transactions,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_summary(&self, user_id: &str, month: u32, year: i32) -> Result<DashboardSummary> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid("Month must be between 1 and 12"));
        }

        let total_balance: Decimal = self
            .accounts
            .list(user_id, Some(true))?
            .iter()
            .map(|a| a.balance)
            .sum();

        let cards = self.cards.list(user_id)?;
        let active_cards = cards.iter().filter(|c| c.is_active);
        let card_used_amount: Decimal = active_cards.clone().map(|c| c.used_amount).sum();
        let card_available_credit: Decimal = active_cards.map(|c| c.available_credit()).sum();

        let filter = TransactionFilter {
            status: Some(TransactionStatus::Confirmed),
            ..TransactionFilter::for_month(month, year)
        };
        let (mut total_income, mut total_expenses) = (Decimal::ZERO, Decimal::ZERO);
        for transaction in self.transactions.list(user_id, &filter)? {
            if !transaction.counts_in_totals() {
                continue;
            }
            match transaction.kind {
                TransactionKind::Income => total_income += transaction.amount,
                TransactionKind::Expense => total_expenses += transaction.amount,
                TransactionKind::Transfer => {}
            }
        }

        Ok(DashboardSummary {
            month,
            year,
            total_balance,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            card_used_amount,
            card_available_credit,
            pending_count: self.transactions.list_pending(user_id)?.len(),
        })
    }
}
