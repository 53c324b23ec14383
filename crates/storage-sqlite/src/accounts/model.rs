//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_enum};
use pocketledger_core::accounts::Account;

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
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub balance: String,
    pub currency: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = StorageError;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(Self {
            account_type: parse_enum(&db.account_type, "accounts.account_type")?,
            balance: parse_decimal(&db.balance, "accounts.balance")?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            currency: db.currency,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Account> for AccountDB {
    fn from(domain: &Account) -> Self {
        Self {
            id: domain.id.clone(),
            user_id: domain.user_id.clone(),
            name: domain.name.clone(),
            account_type: domain.account_type.as_str().to_string(),
            balance: domain.balance.to_string(),
            currency: domain.currency.clone(),
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
