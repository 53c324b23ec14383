use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_enum, target_columns, target_from_columns};
use pocketledger_core::recurrences::Recurrence;

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
#[diesel(table_name = crate::schema::recurrences)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct RecurrenceDB {
    pub id: String,
    pub user_id: String,
    pub account_id: Option<String>,
    pub credit_card_id: Option<String>,
    pub category_id: String,
    pub kind: String,
    pub amount: String,
    pub description: String,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub installments: Option<i32>,
    pub is_active: bool,
    pub next_execution_date: NaiveDate,
    pub last_executed_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<RecurrenceDB> for Recurrence {
    type Error = StorageError;

    fn try_from(db: RecurrenceDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target: target_from_columns(db.account_id, db.credit_card_id)?,
            kind: parse_enum(&db.kind, "recurrences.kind")?,
            amount: parse_decimal(&db.amount, "recurrences.amount")?,
            frequency: parse_enum(&db.frequency, "recurrences.frequency")?,
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            description: db.description,
            start_date: db.start_date,
            end_date: db.end_date,
            installments: db.installments,
            is_active: db.is_active,
            next_execution_date: db.next_execution_date,
            last_executed_date: db.last_executed_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Recurrence> for RecurrenceDB {
    fn from(domain: &Recurrence) -> Self {
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
            frequency: domain.frequency.as_str().to_string(),
            start_date: domain.start_date,
            end_date: domain.end_date,
            installments: domain.installments,
            is_active: domain.is_active,
            next_execution_date: domain.next_execution_date,
            last_executed_date: domain.last_executed_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
