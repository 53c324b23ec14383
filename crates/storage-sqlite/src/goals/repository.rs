use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::goals;
use pocketledger_core::errors::{Error, Result};
use pocketledger_core::goals::{Goal, GoalRepositoryTrait, GoalUpdate, NewGoal};

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Goal::try_from(row).map_err(Error::from))
            .collect()
    }

    async fn insert_new_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let row = NewGoalDB::from_domain(
            Uuid::new_v4().to_string(),
            user_id.to_string(),
            new_goal,
            Utc::now().naive_utc(),
        );

        self.writer
            .exec(move |conn| {
                let stored = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::try_from(stored)?)
            })
            .await
    }

    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        let user = user_id.to_string();
        let goal_id = goal_update
            .id
            .clone()
            .ok_or_else(|| Error::invalid("Goal id is required"))?;
        let is_achieved = goal_update.is_achieved();

        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal_id))
                        .filter(goals::user_id.eq(&user)),
                )
                .set((
                    goals::title.eq(&goal_update.title),
                    goals::description.eq(&goal_update.description),
                    goals::target_amount.eq(goal_update.target_amount.to_string()),
                    goals::current_amount.eq(goal_update.current_amount.to_string()),
                    goals::deadline.eq(goal_update.deadline),
                    goals::is_achieved.eq(is_achieved),
                ))
                .returning(GoalDB::as_returning())
                .get_result(conn);
                Ok(Goal::try_from(or_not_found(updated, "Goal")?)?)
            })
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user = user_id.to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    goals::table
                        .filter(goals::id.eq(&goal_id))
                        .filter(goals::user_id.eq(&user)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
