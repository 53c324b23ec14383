use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::model::CreditCardDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::credit_cards;
use pocketledger_core::credit_cards::{
    CreditCard, CreditCardRepositoryTrait, CreditCardUpdate, NewCreditCard,
};
use pocketledger_core::errors::{Error, Result};

pub(crate) fn find_card(
    conn: &mut SqliteConnection,
    user: &str,
    card_id: &str,
) -> Result<CreditCard> {
    let row = or_not_found(
        credit_cards::table
            .filter(credit_cards::id.eq(card_id))
            .filter(credit_cards::user_id.eq(user))
            .select(CreditCardDB::as_select())
            .first::<CreditCardDB>(conn),
        "Credit card",
    )?;
    Ok(CreditCard::try_from(row)?)
}

/// Adds `delta` to the used amount, never letting it drop below zero.
pub(crate) fn adjust_used_amount(
    conn: &mut SqliteConnection,
    card_id: &str,
    delta: Decimal,
) -> Result<CreditCard> {
    let row = or_not_found(
        credit_cards::table
            .find(card_id)
            .select(CreditCardDB::as_select())
            .first::<CreditCardDB>(conn),
        "Credit card",
    )?;
    let mut card = CreditCard::try_from(row)?;
    card.used_amount = (card.used_amount + delta).max(Decimal::ZERO);
    card.updated_at = Utc::now().naive_utc();

    diesel::update(credit_cards::table.find(card_id))
        .set((
            credit_cards::used_amount.eq(card.used_amount.to_string()),
            credit_cards::updated_at.eq(card.updated_at),
        ))
        .execute(conn)
        .into_core()?;
    debug!("Card {} used amount now {}", card_id, card.used_amount);
    Ok(card)
}

pub struct CreditCardRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CreditCardRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CreditCardRepositoryTrait for CreditCardRepository {
    async fn create(&self, user_id: &str, new_card: NewCreditCard) -> Result<CreditCard> {
        let now = Utc::now().naive_utc();
        let card = CreditCard {
            id: new_card
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: new_card.name,
            credit_limit: new_card.credit_limit,
            used_amount: Decimal::ZERO,
            closing_day: new_card.closing_day,
            due_day: new_card.due_day,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn| {
                diesel::insert_into(credit_cards::table)
                    .values(CreditCardDB::from(&card))
                    .execute(conn)
                    .into_core()?;
                Ok(card)
            })
            .await
    }

    async fn update(&self, user_id: &str, card_update: CreditCardUpdate) -> Result<CreditCard> {
        let user = user_id.to_string();
        let card_id = card_update
            .id
            .clone()
            .ok_or_else(|| Error::invalid("Credit card id is required for updates"))?;

        self.writer
            .exec(move |conn| {
                let mut card = find_card(conn, &user, &card_id)?;
                card.name = card_update.name;
                card.credit_limit = card_update.credit_limit;
                card.closing_day = card_update.closing_day;
                card.due_day = card_update.due_day;
                card.is_active = card_update.is_active;
                card.updated_at = Utc::now().naive_utc();

                diesel::update(credit_cards::table.find(&card.id))
                    .set((
                        credit_cards::name.eq(&card.name),
                        credit_cards::credit_limit.eq(card.credit_limit.to_string()),
                        credit_cards::closing_day.eq(card.closing_day),
                        credit_cards::due_day.eq(card.due_day),
                        credit_cards::is_active.eq(card.is_active),
                        credit_cards::updated_at.eq(card.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(card)
            })
            .await
    }

    async fn delete(&self, user_id: &str, card_id: &str) -> Result<usize> {
        let user = user_id.to_string();
        let card_id = card_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    credit_cards::table
                        .filter(credit_cards::id.eq(&card_id))
                        .filter(credit_cards::user_id.eq(&user)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn get_by_id(&self, user_id: &str, card_id: &str) -> Result<CreditCard> {
        let mut conn = get_connection(&self.pool)?;
        find_card(&mut conn, user_id, card_id)
    }

    fn list(&self, user_id: &str) -> Result<Vec<CreditCard>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = credit_cards::table
            .filter(credit_cards::user_id.eq(user_id))
            .select(CreditCardDB::as_select())
            .order(credit_cards::name.asc())
            .load::<CreditCardDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| CreditCard::try_from(row).map_err(Error::from))
            .collect()
    }
}
