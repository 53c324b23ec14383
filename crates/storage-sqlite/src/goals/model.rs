//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use pocketledger_core::goals::{Goal, NewGoal};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<NaiveDate>,
    pub is_achieved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[serde(rename_all = "camelCase")]
pub struct NewGoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<NaiveDate>,
    pub is_achieved: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target_amount: parse_decimal(&db.target_amount, "goals.target_amount")?,
            current_amount: parse_decimal(&db.current_amount, "goals.current_amount")?,
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            deadline: db.deadline,
            is_achieved: db.is_achieved,
            created_at: db.created_at,
        })
    }
}

impl NewGoalDB {
    pub fn from_domain(id: String, user_id: String, goal: NewGoal, now: NaiveDateTime) -> Self {
        Self {
            is_achieved: goal.is_achieved(),
            id,
            user_id,
            title: goal.title,
            description: goal.description,
            target_amount: goal.target_amount.to_string(),
            current_amount: goal.current_amount.to_string(),
            deadline: goal.deadline,
            created_at: now,
        }
    }
}
