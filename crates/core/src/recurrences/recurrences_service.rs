use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::recurrences_engine;
use super::recurrences_model::{
    NewRecurrence, Recurrence, RecurrenceCreated, RecurrenceDetails, RecurrenceUpdate,
    RecurrenceUpdated,
};
use super::recurrences_traits::{RecurrenceRepositoryTrait, RecurrenceServiceTrait};
use crate::errors::Result;
use crate::ledger::LedgerUnitOfWork;
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::utils::Clock;

pub struct RecurrenceService {
    repository: Arc<dyn RecurrenceRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    ledger: Arc<dyn LedgerUnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl RecurrenceService {
    pub fn new(
        repository: Arc<dyn RecurrenceRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        ledger: Arc<dyn LedgerUnitOfWork>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            transactions,
            ledger,
            clock,
        }
    }
}

fn sum_amounts(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(|t| t.amount).sum()
}

#[async_trait::async_trait]
impl RecurrenceServiceTrait for RecurrenceService {
    async fn create_recurrence(
        &self,
        user_id: &str,
        new_recurrence: NewRecurrence,
    ) -> Result<RecurrenceCreated> {
        new_recurrence.validate()?;
        let now = self.clock.now();
        let owner = user_id.to_string();
        let created = self
            .ledger
            .run(move |tx| recurrences_engine::create_recurrence(tx, &owner, new_recurrence, now))
            .await?;
        info!(
            "Recurrence {} created for user {} ({} transaction(s))",
            created.recurrence.id,
            user_id,
            created.transactions.len()
        );
        Ok(created)
    }

    async fn update_recurrence(
        &self,
        user_id: &str,
        recurrence_id: &str,
        update: RecurrenceUpdate,
    ) -> Result<RecurrenceUpdated> {
        update.validate()?;
        let now = self.clock.now();
        let owner = user_id.to_string();
        let id = recurrence_id.to_string();
        self.ledger
            .run(move |tx| recurrences_engine::update_recurrence(tx, &owner, &id, update, now))
            .await
    }

    async fn delete_recurrence(&self, user_id: &str, recurrence_id: &str) -> Result<usize> {
        let owner = user_id.to_string();
        let id = recurrence_id.to_string();
        let removed = self
            .ledger
            .run(move |tx| recurrences_engine::delete_recurrence(tx, &owner, &id))
            .await?;
        info!(
            "Recurrence {} deleted with {} transaction(s)",
            recurrence_id, removed
        );
        Ok(removed)
    }

    fn list_active_recurrences(&self, user_id: &str) -> Result<Vec<Recurrence>> {
        self.repository.list_active(user_id)
    }

    fn get_recurrence_details(
        &self,
        user_id: &str,
        recurrence_id: &str,
    ) -> Result<RecurrenceDetails> {
        let recurrence = self.repository.get_by_id(user_id, recurrence_id)?;
        let (confirmed_transactions, pending_transactions): (Vec<_>, Vec<_>) = self
            .transactions
            .list_by_recurrence(user_id, &recurrence.id)?
            .into_iter()
            .partition(Transaction::is_confirmed);

        let paid_value = sum_amounts(&confirmed_transactions);
        let remaining_value = sum_amounts(&pending_transactions);
        Ok(RecurrenceDetails {
            recurrence,
            total_value: paid_value + remaining_value,
            paid_value,
            remaining_value,
            pending_count: pending_transactions.len(),
            confirmed_count: confirmed_transactions.len(),
            pending_transactions,
            confirmed_transactions,
        })
    }
}
