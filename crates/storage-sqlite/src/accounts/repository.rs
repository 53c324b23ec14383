use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::accounts;
use pocketledger_core::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use pocketledger_core::errors::{Error, Result};

pub(crate) fn find_account(
    conn: &mut SqliteConnection,
    user: &str,
    account_id: &str,
) -> Result<Account> {
    let row = or_not_found(
        accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(user))
            .select(AccountDB::as_select())
            .first::<AccountDB>(conn),
        "Account",
    )?;
    Ok(Account::try_from(row)?)
}

/// Adds `delta` to the stored balance and returns the updated account.
pub(crate) fn adjust_balance(
    conn: &mut SqliteConnection,
    account_id: &str,
    delta: Decimal,
) -> Result<Account> {
    let row = or_not_found(
        accounts::table
            .find(account_id)
            .select(AccountDB::as_select())
            .first::<AccountDB>(conn),
        "Account",
    )?;
    let mut account = Account::try_from(row)?;
    account.balance += delta;
    account.updated_at = Utc::now().naive_utc();

    diesel::update(accounts::table.find(account_id))
        .set((
            accounts::balance.eq(account.balance.to_string()),
            accounts::updated_at.eq(account.updated_at),
        ))
        .execute(conn)
        .into_core()?;
    debug!("Account {} balance now {}", account_id, account.balance);
    Ok(account)
}

pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        let now = Utc::now().naive_utc();
        let account = Account {
            id: new_account
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: new_account.name.clone(),
            account_type: new_account.account_type,
            balance: new_account.balance.unwrap_or(Decimal::ZERO),
            currency: new_account.currency_or_default(),
            is_active: new_account.is_active,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn| {
                diesel::insert_into(accounts::table)
                    .values(AccountDB::from(&account))
                    .execute(conn)
                    .into_core()?;
                Ok(account)
            })
            .await
    }

    async fn update(&self, user_id: &str, account_update: AccountUpdate) -> Result<Account> {
        let user = user_id.to_string();
        let account_id = account_update
            .id
            .clone()
            .ok_or_else(|| Error::invalid("Account id is required for updates"))?;

        self.writer
            .exec(move |conn| {
                let mut account = find_account(conn, &user, &account_id)?;
                account.name = account_update.name;
                account.account_type = account_update.account_type;
                account.is_active = account_update.is_active;
                account.updated_at = Utc::now().naive_utc();

                diesel::update(accounts::table.find(&account.id))
                    .set((
                        accounts::name.eq(&account.name),
                        accounts::account_type.eq(account.account_type.as_str()),
                        accounts::is_active.eq(account.is_active),
                        accounts::updated_at.eq(account.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(account)
            })
            .await
    }

    async fn delete(&self, user_id: &str, account_id: &str) -> Result<usize> {
        let user = user_id.to_string();
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    accounts::table
                        .filter(accounts::id.eq(&account_id))
                        .filter(accounts::user_id.eq(&user)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        find_account(&mut conn, user_id, account_id)
    }

    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .into_boxed();
        if let Some(active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(active));
        }

        let rows = query
            .select(AccountDB::as_select())
            .order((accounts::is_active.desc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| Account::try_from(row).map_err(Error::from))
            .collect()
    }
}
