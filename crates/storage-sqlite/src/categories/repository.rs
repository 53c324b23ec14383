use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::{categories, recurrences, transactions};
use pocketledger_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use pocketledger_core::errors::{Error, Result};

pub(crate) fn find_category(
    conn: &mut SqliteConnection,
    user: &str,
    category_id: &str,
) -> Result<Category> {
    let row = or_not_found(
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::user_id.eq(user))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(conn),
        "Category",
    )?;
    Ok(Category::try_from(row)?)
}

/// True when any transaction or recurrence still points at the category.
fn category_in_use(conn: &mut SqliteConnection, category_id: &str) -> Result<bool> {
    let in_transactions: i64 = transactions::table
        .filter(transactions::category_id.eq(category_id))
        .count()
        .get_result(conn)
        .into_core()?;
    if in_transactions > 0 {
        return Ok(true);
    }
    let in_recurrences: i64 = recurrences::table
        .filter(recurrences::category_id.eq(category_id))
        .count()
        .get_result(conn)
        .into_core()?;
    Ok(in_recurrences > 0)
}

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_category.name,
            kind: new_category.kind,
            budget_group: new_category.budget_group,
            color: new_category.color,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn| {
                diesel::insert_into(categories::table)
                    .values(CategoryDB::from(&category))
                    .execute(conn)
                    .into_core()?;
                Ok(category)
            })
            .await
    }

    async fn delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let user = user_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn| {
                if category_in_use(conn, &category_id)? {
                    return Err(Error::ConstraintViolation(
                        "Category is still in use".to_string(),
                    ));
                }
                diesel::delete(
                    categories::table
                        .filter(categories::id.eq(&category_id))
                        .filter(categories::user_id.eq(&user)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        find_category(&mut conn, user_id, category_id)
    }

    fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::user_id.eq(user_id))
            .select(CategoryDB::as_select())
            .order((categories::kind.asc(), categories::name.asc()))
            .load::<CategoryDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Category::try_from(row).map_err(Error::from))
            .collect()
    }
}
