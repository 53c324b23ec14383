use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_enum, target_columns, target_from_columns};
use pocketledger_core::transactions::Transaction;

/// Row shape of `transactions`; the settlement target is split into two
/// nullable columns of which exactly one is set.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub account_id: Option<String>,
    pub credit_card_id: Option<String>,
    pub category_id: Option<String>,
    pub kind: String,
    pub amount: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: String,
    pub confirmed_at: Option<NaiveDateTime>,
    pub recurrence_id: Option<String>,
    pub installment_number: Option<i32>,
    pub installment_total: Option<i32>,
    pub is_investment_transfer: bool,
    pub is_card_payment: bool,
    pub transfer_to_account_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target: target_from_columns(db.account_id, db.credit_card_id)?,
            kind: parse_enum(&db.kind, "transactions.kind")?,
            amount: parse_decimal(&db.amount, "transactions.amount")?,
            status: parse_enum(&db.status, "transactions.status")?,
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            description: db.description,
            date: db.date,
            confirmed_at: db.confirmed_at,
            recurrence_id: db.recurrence_id,
            installment_number: db.installment_number,
            installment_total: db.installment_total,
            is_investment_transfer: db.is_investment_transfer,
            is_card_payment: db.is_card_payment,
            transfer_to_account_id: db.transfer_to_account_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Transaction> for TransactionDB {
    fn from(domain: &Transaction) -> Self {
        let (account_id, credit_card_id) = target_columns(&domain.target);
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.clone(),
            account_id,
            credit_card_id,
            category_id: domain.category_id.clone(),
            kind: domain.kind.as_str().to_string(),
            amount: domain.amount.to_string(),
            description: domain.description.clone(),
            date: domain.date,
            status: domain.status.as_str().to_string(),
            confirmed_at: domain.confirmed_at,
            recurrence_id: domain.recurrence_id.clone(),
            installment_number: domain.installment_number,
            installment_total: domain.installment_total,
            is_investment_transfer: domain.is_investment_transfer,
            is_card_payment: domain.is_card_payment,
            transfer_to_account_id: domain.transfer_to_account_id.clone(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
