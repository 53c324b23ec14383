use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::model::RecurrenceDB;
use crate::db::{get_connection, DbPool};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::recurrences;
use pocketledger_core::errors::{Error, Result};
use pocketledger_core::recurrences::{Recurrence, RecurrenceRepositoryTrait};

pub(crate) fn find_recurrence(
    conn: &mut SqliteConnection,
    user: &str,
    recurrence_id: &str,
) -> Result<Recurrence> {
    let row = or_not_found(
        recurrences::table
            .filter(recurrences::id.eq(recurrence_id))
            .filter(recurrences::user_id.eq(user))
            .select(RecurrenceDB::as_select())
            .first::<RecurrenceDB>(conn),
        "Recurrence",
    )?;
    Ok(Recurrence::try_from(row)?)
}

pub struct RecurrenceRepository {
    pool: Arc<DbPool>,
}

impl RecurrenceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl RecurrenceRepositoryTrait for RecurrenceRepository {
    fn get_by_id(&self, user_id: &str, recurrence_id: &str) -> Result<Recurrence> {
        let mut conn = get_connection(&self.pool)?;
        find_recurrence(&mut conn, user_id, recurrence_id)
    }

    fn list_active(&self, user_id: &str) -> Result<Vec<Recurrence>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = recurrences::table
            .filter(recurrences::user_id.eq(user_id))
            .filter(recurrences::is_active.eq(true))
            .select(RecurrenceDB::as_select())
            .order(recurrences::next_execution_date.asc())
            .load::<RecurrenceDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Recurrence::try_from(row).map_err(Error::from))
            .collect()
    }
}
