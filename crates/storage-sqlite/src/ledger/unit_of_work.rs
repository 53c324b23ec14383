use std::any::Any;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crate::accounts::{adjust_balance, find_account};
use crate::categories::find_category;
use crate::credit_cards::{adjust_used_amount, find_card};
use crate::db::WriteHandle;
use crate::errors::IntoCore;
use crate::recurrences::{find_recurrence, RecurrenceDB};
use crate::schema::{recurrences, transactions};
use crate::transactions::{find_transaction, load_by_recurrence, TransactionDB};
use crate::utils::target_columns;
use pocketledger_core::accounts::Account;
use pocketledger_core::categories::Category;
use pocketledger_core::credit_cards::CreditCard;
use pocketledger_core::errors::{Error, Result};
use pocketledger_core::ledger::{LedgerJob, LedgerTx, LedgerUnitOfWork};
use pocketledger_core::recurrences::Recurrence;
use pocketledger_core::transactions::{SettlementTarget, Transaction, TransactionStatus};

/// Runs each ledger job as one immediate transaction on the writer
/// connection; any `Err` from the job rolls every step back.
#[derive(Clone)]
pub struct SqliteLedger {
    writer: WriteHandle,
}

impl SqliteLedger {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl LedgerUnitOfWork for SqliteLedger {
    async fn execute_boxed(&self, job: LedgerJob) -> Result<Box<dyn Any + Send>> {
        self.writer
            .exec(move |conn| {
                let mut tx = SqliteLedgerTx { conn };
                job(&mut tx)
            })
            .await
    }
}

/// [`LedgerTx`] over a connection that is already inside a transaction.
pub struct SqliteLedgerTx<'a> {
    conn: &'a mut SqliteConnection,
}

impl LedgerTx for SqliteLedgerTx<'_> {
    fn get_account(&mut self, user_id: &str, account_id: &str) -> Result<Account> {
        find_account(self.conn, user_id, account_id)
    }

    fn adjust_account_balance(&mut self, account_id: &str, delta: Decimal) -> Result<Account> {
        adjust_balance(self.conn, account_id, delta)
    }

    fn get_credit_card(&mut self, user_id: &str, card_id: &str) -> Result<CreditCard> {
        find_card(self.conn, user_id, card_id)
    }

    fn adjust_card_used_amount(&mut self, card_id: &str, delta: Decimal) -> Result<CreditCard> {
        adjust_used_amount(self.conn, card_id, delta)
    }

    fn get_category(&mut self, user_id: &str, category_id: &str) -> Result<Category> {
        find_category(self.conn, user_id, category_id)
    }

    fn get_transaction(&mut self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        find_transaction(self.conn, user_id, transaction_id)
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        diesel::insert_into(transactions::table)
            .values(TransactionDB::from(transaction))
            .execute(self.conn)
            .into_core()?;
        Ok(())
    }

    fn update_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        let row = TransactionDB::from(transaction);
        let updated = diesel::update(transactions::table.find(&transaction.id))
            .set(&row)
            .execute(self.conn)
            .into_core()?;
        if updated == 0 {
            return Err(Error::not_found("Transaction"));
        }
        Ok(())
    }

    fn set_transaction_target(
        &mut self,
        transaction_id: &str,
        target: &SettlementTarget,
    ) -> Result<()> {
        let (account_id, credit_card_id) = target_columns(target);
        let updated = diesel::update(transactions::table.find(transaction_id))
            .set((
                transactions::account_id.eq(account_id),
                transactions::credit_card_id.eq(credit_card_id),
                transactions::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(self.conn)
            .into_core()?;
        if updated == 0 {
            return Err(Error::not_found("Transaction"));
        }
        Ok(())
    }

    fn confirm_if_pending(
        &mut self,
        transaction_id: &str,
        date: NaiveDate,
        confirmed_at: NaiveDateTime,
    ) -> Result<bool> {
        let updated = diesel::update(
            transactions::table
                .filter(transactions::id.eq(transaction_id))
                .filter(transactions::status.eq(TransactionStatus::Pending.as_str())),
        )
        .set((
            transactions::status.eq(TransactionStatus::Confirmed.as_str()),
            transactions::date.eq(date),
            transactions::confirmed_at.eq(Some(confirmed_at)),
            transactions::updated_at.eq(confirmed_at),
        ))
        .execute(self.conn)
        .into_core()?;
        Ok(updated == 1)
    }

    fn delete_transaction_if_status(
        &mut self,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> Result<bool> {
        let deleted = diesel::delete(
            transactions::table
                .filter(transactions::id.eq(transaction_id))
                .filter(transactions::status.eq(status.as_str())),
        )
        .execute(self.conn)
        .into_core()?;
        Ok(deleted == 1)
    }

    fn list_recurrence_transactions(&mut self, recurrence_id: &str) -> Result<Vec<Transaction>> {
        load_by_recurrence(self.conn, recurrence_id)
    }

    fn delete_recurrence_transactions(&mut self, recurrence_id: &str) -> Result<usize> {
        diesel::delete(transactions::table.filter(transactions::recurrence_id.eq(recurrence_id)))
            .execute(self.conn)
            .into_core()
    }

    fn get_recurrence(&mut self, user_id: &str, recurrence_id: &str) -> Result<Recurrence> {
        find_recurrence(self.conn, user_id, recurrence_id)
    }

    fn insert_recurrence(&mut self, recurrence: &Recurrence) -> Result<()> {
        diesel::insert_into(recurrences::table)
            .values(RecurrenceDB::from(recurrence))
            .execute(self.conn)
            .into_core()?;
        Ok(())
    }

    fn update_recurrence(&mut self, recurrence: &Recurrence) -> Result<()> {
        let row = RecurrenceDB::from(recurrence);
        let updated = diesel::update(recurrences::table.find(&recurrence.id))
            .set(&row)
            .execute(self.conn)
            .into_core()?;
        if updated == 0 {
            return Err(Error::not_found("Recurrence"));
        }
        Ok(())
    }

    fn delete_recurrence(&mut self, recurrence_id: &str) -> Result<usize> {
        diesel::delete(recurrences::table.find(recurrence_id))
            .execute(self.conn)
            .into_core()
    }
}
