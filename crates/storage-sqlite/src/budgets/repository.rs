use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;
use pocketledger_core::budgets::{Budget, BudgetRepositoryTrait, BudgetUpsert};
use pocketledger_core::errors::{Error, Result};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn find_specific(&self, user_id: &str, month: u32, year: i32) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::is_default.eq(false))
            .filter(budgets::month.eq(month as i32))
            .filter(budgets::year.eq(year))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Budget::try_from).transpose()?)
    }

    fn list_defaults(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::is_default.eq(true))
            .select(BudgetDB::as_select())
            .order(budgets::created_at.desc())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Budget::try_from(row).map_err(Error::from))
            .collect()
    }

    async fn upsert(
        &self,
        user_id: &str,
        budget: BudgetUpsert,
        now: NaiveDateTime,
    ) -> Result<Budget> {
        let user = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing_id = budgets::table
                    .filter(budgets::user_id.eq(&user))
                    .filter(budgets::month.eq(budget.month))
                    .filter(budgets::year.eq(budget.year))
                    .filter(budgets::is_default.eq(budget.is_default))
                    .select(budgets::id)
                    .first::<String>(conn)
                    .optional()
                    .into_core()?;

                let stored = match existing_id {
                    Some(id) => {
                        debug!("Updating budget {} for {}/{}", id, budget.month, budget.year);
                        diesel::update(budgets::table.find(&id))
                            .set((
                                budgets::total_income.eq(budget.total_income.to_string()),
                                budgets::necessities_budget
                                    .eq(budget.necessities_budget.to_string()),
                                budgets::wants_budget.eq(budget.wants_budget.to_string()),
                                budgets::savings_budget.eq(budget.savings_budget.to_string()),
                                budgets::updated_at.eq(now),
                            ))
                            .returning(BudgetDB::as_returning())
                            .get_result(conn)
                            .into_core()?
                    }
                    None => {
                        let zero = Decimal::ZERO.to_string();
                        let row = BudgetDB {
                            id: Uuid::new_v4().to_string(),
                            user_id: user.clone(),
                            month: budget.month,
                            year: budget.year,
                            total_income: budget.total_income.to_string(),
                            necessities_budget: budget.necessities_budget.to_string(),
                            necessities_spent: zero.clone(),
                            wants_budget: budget.wants_budget.to_string(),
                            wants_spent: zero.clone(),
                            savings_budget: budget.savings_budget.to_string(),
                            savings_spent: zero,
                            is_default: budget.is_default,
                            created_at: now,
                            updated_at: now,
                        };
                        diesel::insert_into(budgets::table)
                            .values(&row)
                            .execute(conn)
                            .into_core()?;
                        row
                    }
                };
                Ok(Budget::try_from(stored)?)
            })
            .await
    }
}
