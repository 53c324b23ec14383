use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use pocketledger_core::credit_cards::CreditCard;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::credit_cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CreditCardDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub credit_limit: String,
    pub used_amount: String,
    pub closing_day: i32,
    pub due_day: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CreditCardDB> for CreditCard {
    type Error = StorageError;

    fn try_from(db: CreditCardDB) -> Result<Self, Self::Error> {
        Ok(Self {
            credit_limit: parse_decimal(&db.credit_limit, "credit_cards.credit_limit")?,
            used_amount: parse_decimal(&db.used_amount, "credit_cards.used_amount")?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            closing_day: db.closing_day,
            due_day: db.due_day,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&CreditCard> for CreditCardDB {
    fn from(domain: &CreditCard) -> Self {
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.clone(),
            name: domain.name.clone(),
            credit_limit: domain.credit_limit.to_string(),
            used_amount: domain.used_amount.to_string(),
            closing_day: domain.closing_day,
            due_day: domain.due_day,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
