use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::transactions;
use pocketledger_core::errors::{Error, Result};
use pocketledger_core::transactions::{
    Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionStatus,
};
use pocketledger_core::utils::time_utils::month_bounds;

fn into_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
    rows.into_iter()
        .map(|row| Transaction::try_from(row).map_err(Error::from))
        .collect()
}

pub(crate) fn find_transaction(
    conn: &mut SqliteConnection,
    user: &str,
    transaction_id: &str,
) -> Result<Transaction> {
    let row = or_not_found(
        transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user))
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(conn),
        "Transaction",
    )?;
    Ok(Transaction::try_from(row)?)
}

/// Every transaction of a series in schedule order.
pub(crate) fn load_by_recurrence(
    conn: &mut SqliteConnection,
    recurrence_id: &str,
) -> Result<Vec<Transaction>> {
    let rows = transactions::table
        .filter(transactions::recurrence_id.eq(recurrence_id))
        .select(TransactionDB::as_select())
        .order((
            transactions::date.asc(),
            transactions::installment_number.asc(),
        ))
        .load::<TransactionDB>(conn)
        .into_core()?;
    into_domain(rows)
}

/// Inclusive date range selected by a month/year filter.
fn filter_range(filter: &TransactionFilter) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let invalid = || Error::invalid("Invalid month or year");
    match (filter.month, filter.year) {
        (Some(month), Some(year)) => month_bounds(year, month).map(Some).ok_or_else(invalid),
        (None, Some(year)) => {
            let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
            Ok(Some((first, last)))
        }
        (Some(_), None) => Err(Error::invalid("A month filter requires a year")),
        (None, None) => Ok(None),
    }
}

/// Read side of the transaction store. Writes go through the ledger unit of
/// work so balance effects commit with the row.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        find_transaction(&mut conn, user_id, transaction_id)
    }

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();
        if let Some((first, last)) = filter_range(filter)? {
            query = query.filter(transactions::date.between(first, last));
        }
        if let Some(status) = filter.status {
            query = query.filter(transactions::status.eq(status.as_str()));
        }
        if let Some(account_id) = filter.account_id.as_deref() {
            query = query.filter(transactions::account_id.eq(account_id));
        }
        if let Some(card_id) = filter.credit_card_id.as_deref() {
            query = query.filter(transactions::credit_card_id.eq(card_id));
        }

        let rows = query
            .select(TransactionDB::as_select())
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn list_pending(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::status.eq(TransactionStatus::Pending.as_str()))
            .select(TransactionDB::as_select())
            .order((transactions::date.asc(), transactions::created_at.asc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn list_by_recurrence(&self, user_id: &str, recurrence_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_by_recurrence(&mut conn, recurrence_id)?
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect())
    }
}
