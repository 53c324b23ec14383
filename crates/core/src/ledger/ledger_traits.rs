use std::any::Any;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::accounts::Account;
use crate::categories::Category;
use crate::credit_cards::CreditCard;
use crate::errors::{Error, Result};
use crate::recurrences::Recurrence;
use crate::transactions::{SettlementTarget, Transaction, TransactionStatus};

/// Row-level operations available inside one unit of work.
///
/// Every call runs against the same open database transaction. Lookups that
/// take a `user_id` return `NotFound` for rows owned by someone else.
pub trait LedgerTx {
    fn get_account(&mut self, user_id: &str, account_id: &str) -> Result<Account>;

    /// Adds a signed delta to the account balance and returns the new row.
    fn adjust_account_balance(&mut self, account_id: &str, delta: Decimal) -> Result<Account>;

    fn get_credit_card(&mut self, user_id: &str, card_id: &str) -> Result<CreditCard>;

    /// Adds a signed delta to the card's used amount, flooring the result at
    /// zero, and returns the new row.
    fn adjust_card_used_amount(&mut self, card_id: &str, delta: Decimal) -> Result<CreditCard>;

    fn get_category(&mut self, user_id: &str, category_id: &str) -> Result<Category>;

    fn get_transaction(&mut self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<()>;

    /// Overwrites every mutable column of an existing transaction.
    fn update_transaction(&mut self, transaction: &Transaction) -> Result<()>;

    fn set_transaction_target(
        &mut self,
        transaction_id: &str,
        target: &SettlementTarget,
    ) -> Result<()>;

    /// Flips a pending transaction to confirmed. Returns `false` when the row
    /// was no longer pending, leaving it untouched.
    fn confirm_if_pending(
        &mut self,
        transaction_id: &str,
        date: NaiveDate,
        confirmed_at: NaiveDateTime,
    ) -> Result<bool>;

    /// Deletes the transaction only while it still has `status`.
    fn delete_transaction_if_status(
        &mut self,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> Result<bool>;

    /// All transactions linked to a recurrence, ordered by date.
    fn list_recurrence_transactions(&mut self, recurrence_id: &str) -> Result<Vec<Transaction>>;

    fn delete_recurrence_transactions(&mut self, recurrence_id: &str) -> Result<usize>;

    fn get_recurrence(&mut self, user_id: &str, recurrence_id: &str) -> Result<Recurrence>;

    fn insert_recurrence(&mut self, recurrence: &Recurrence) -> Result<()>;

    fn update_recurrence(&mut self, recurrence: &Recurrence) -> Result<()>;

    fn delete_recurrence(&mut self, recurrence_id: &str) -> Result<usize>;
}

/// Type-erased job executed inside one unit of work.
pub type LedgerJob =
    Box<dyn FnOnce(&mut dyn LedgerTx) -> Result<Box<dyn Any + Send>> + Send + 'static>;

/// Runs jobs atomically: either every write of the job commits or none does.
#[async_trait]
pub trait LedgerUnitOfWork: Send + Sync {
    async fn execute_boxed(&self, job: LedgerJob) -> Result<Box<dyn Any + Send>>;
}

impl dyn LedgerUnitOfWork {
    /// Typed entry point over [`LedgerUnitOfWork::execute_boxed`].
    pub async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerTx) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let boxed = self
            .execute_boxed(Box::new(move |tx| {
                job(tx).map(|value| Box::new(value) as Box<dyn Any + Send>)
            }))
            .await?;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("Unit of work returned an unexpected type".to_string()))
    }
}
