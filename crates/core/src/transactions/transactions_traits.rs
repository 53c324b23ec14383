use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter};
use crate::errors::Result;

/// Read side of transaction persistence. Every write goes through the
/// ledger unit of work.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    /// Matching transactions, newest first.
    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Pending transactions, oldest date first.
    fn list_pending(&self, user_id: &str) -> Result<Vec<Transaction>>;

    fn list_by_recurrence(&self, user_id: &str, recurrence_id: &str) -> Result<Vec<Transaction>>;
}

/// Outcome of confirming an occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedTransaction {
    pub transaction: Transaction,
    /// Next pending occurrence, when the transaction belongs to a forever
    /// recurrence.
    pub next_transaction: Option<Transaction>,
}

#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    fn list_transactions(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>>;

    fn list_pending(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Confirms a pending transaction, optionally settling it from another
    /// of the caller's accounts.
    async fn confirm_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        settlement_account_id: Option<String>,
    ) -> Result<ConfirmedTransaction>;

    /// Deletes a transaction. Returns the replacement pending occurrence when
    /// one was created.
    async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>>;
}
