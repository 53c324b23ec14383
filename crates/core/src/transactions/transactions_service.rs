use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::transactions_model::{
    NewTransaction, SettlementTarget, Transaction, TransactionFilter, TransactionStatus,
};
use super::transactions_traits::{
    ConfirmedTransaction, TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::errors::{Error, Result};
use crate::ledger::{
    apply_money_effect, ensure_category_owned, ensure_target_owned, reverse_money_effect,
    LedgerTx, LedgerUnitOfWork,
};
use crate::recurrences::create_next_pending_transaction;
use crate::utils::Clock;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    ledger: Arc<dyn LedgerUnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        ledger: Arc<dyn LedgerUnitOfWork>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            ledger,
            clock,
        }
    }
}

fn not_pending() -> Error {
    Error::Conflict("Transaction is not pending".to_string())
}

/// Whether the transaction is the live occurrence of a forever recurrence.
fn regenerates(tx: &mut dyn LedgerTx, transaction: &Transaction) -> Result<bool> {
    match &transaction.recurrence_id {
        Some(recurrence_id) => {
            let recurrence = tx.get_recurrence(&transaction.user_id, recurrence_id)?;
            Ok(recurrence.is_forever())
        }
        None => Ok(false),
    }
}

fn confirm_occurrence(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    transaction_id: &str,
    settlement_account_id: Option<String>,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Result<ConfirmedTransaction> {
    let mut transaction = tx.get_transaction(user_id, transaction_id)?;
    if !transaction.is_pending() {
        return Err(not_pending());
    }

    if let Some(account_id) = settlement_account_id {
        tx.get_account(user_id, &account_id)?;
        let target = SettlementTarget::Account(account_id);
        tx.set_transaction_target(&transaction.id, &target)?;
        transaction.target = target;
    }

    if !tx.confirm_if_pending(&transaction.id, today, now)? {
        return Err(not_pending());
    }
    transaction.status = TransactionStatus::Confirmed;
    transaction.date = today;
    transaction.confirmed_at = Some(now);
    transaction.updated_at = now;

    apply_money_effect(tx, &transaction)?;

    let regenerate = regenerates(tx, &transaction)?;
    let next_transaction = match &transaction.recurrence_id {
        Some(recurrence_id) if regenerate => {
            create_next_pending_transaction(tx, user_id, recurrence_id, now)?
        }
        _ => None,
    };

    Ok(ConfirmedTransaction {
        transaction,
        next_transaction,
    })
}

fn delete_occurrence(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    transaction_id: &str,
    now: NaiveDateTime,
) -> Result<Option<Transaction>> {
    let transaction = tx.get_transaction(user_id, transaction_id)?;

    // The replacement is created before the row goes away so the chain never
    // has a gap.
    let regenerate = transaction.is_pending() && regenerates(tx, &transaction)?;
    let replacement = match &transaction.recurrence_id {
        Some(recurrence_id) if regenerate => {
            create_next_pending_transaction(tx, user_id, recurrence_id, now)?
        }
        _ => None,
    };

    if transaction.is_confirmed() {
        reverse_money_effect(tx, &transaction)?;
    }

    if !tx.delete_transaction_if_status(&transaction.id, transaction.status)? {
        return Err(Error::Conflict(
            "Transaction changed while it was being deleted".to_string(),
        ));
    }
    Ok(replacement)
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        let now = self.clock.now();
        let owner = user_id.to_string();
        let transaction = self
            .ledger
            .run(move |tx| {
                ensure_target_owned(tx, &owner, &new_transaction.target)?;
                ensure_category_owned(tx, &owner, new_transaction.category_id.as_deref())?;

                let confirmed = new_transaction.status == TransactionStatus::Confirmed;
                let transaction = Transaction {
                    id: Uuid::new_v4().to_string(),
                    user_id: owner,
                    target: new_transaction.target,
                    category_id: new_transaction.category_id,
                    kind: new_transaction.kind,
                    amount: new_transaction.amount,
                    description: new_transaction.description.trim().to_string(),
                    date: new_transaction.date,
                    status: new_transaction.status,
                    confirmed_at: confirmed.then_some(now),
                    recurrence_id: None,
                    installment_number: None,
                    installment_total: None,
                    is_investment_transfer: false,
                    is_card_payment: false,
                    transfer_to_account_id: None,
                    created_at: now,
                    updated_at: now,
                };
                tx.insert_transaction(&transaction)?;
                if confirmed {
                    apply_money_effect(tx, &transaction)?;
                }
                Ok(transaction)
            })
            .await?;
        debug!(
            "Created {} {} transaction {}",
            transaction.status, transaction.kind, transaction.id
        );
        Ok(transaction)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(user_id, transaction_id)
    }

    fn list_transactions(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        filter.validate()?;
        self.repository.list(user_id, &filter)
    }

    fn list_pending(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_pending(user_id)
    }

    async fn confirm_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        settlement_account_id: Option<String>,
    ) -> Result<ConfirmedTransaction> {
        let now = self.clock.now();
        let today = self.clock.today();
        let owner = user_id.to_string();
        let id = transaction_id.to_string();
        let confirmed = self
            .ledger
            .run(move |tx| confirm_occurrence(tx, &owner, &id, settlement_account_id, today, now))
            .await?;
        info!(
            "Transaction {} confirmed{}",
            transaction_id,
            confirmed
                .next_transaction
                .as_ref()
                .map(|next| format!(", next occurrence {} on {}", next.id, next.date))
                .unwrap_or_default()
        );
        Ok(confirmed)
    }

    async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let now = self.clock.now();
        let owner = user_id.to_string();
        let id = transaction_id.to_string();
        let replacement = self
            .ledger
            .run(move |tx| delete_occurrence(tx, &owner, &id, now))
            .await?;
        info!("Transaction {} deleted", transaction_id);
        Ok(replacement)
    }
}
