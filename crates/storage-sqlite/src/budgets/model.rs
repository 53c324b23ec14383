use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use pocketledger_core::budgets::Budget;

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
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub month: i32,
    pub year: i32,
    pub total_income: String,
    pub necessities_budget: String,
    pub necessities_spent: String,
    pub wants_budget: String,
    pub wants_spent: String,
    pub savings_budget: String,
    pub savings_spent: String,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = StorageError;

    fn try_from(db: BudgetDB) -> Result<Self, Self::Error> {
        Ok(Self {
            total_income: parse_decimal(&db.total_income, "budgets.total_income")?,
            necessities_budget: parse_decimal(&db.necessities_budget, "budgets.necessities_budget")?,
            necessities_spent: parse_decimal(&db.necessities_spent, "budgets.necessities_spent")?,
            wants_budget: parse_decimal(&db.wants_budget, "budgets.wants_budget")?,
            wants_spent: parse_decimal(&db.wants_spent, "budgets.wants_spent")?,
            savings_budget: parse_decimal(&db.savings_budget, "budgets.savings_budget")?,
            savings_spent: parse_decimal(&db.savings_spent, "budgets.savings_spent")?,
            id: db.id,
            user_id: db.user_id,
            month: db.month,
            year: db.year,
            is_default: db.is_default,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
