use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{or_not_found, IntoCore};
use crate::schema::users;
use pocketledger_core::errors::{DatabaseError, Error, Result};
use pocketledger_core::users::{NewUser, User, UserRepositoryTrait};

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let row = UserDB {
            id: Uuid::new_v4().to_string(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn| {
                diesel::insert_into(users::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()
                    .map_err(|e| match e {
                        Error::Database(DatabaseError::UniqueViolation(_)) => {
                            Error::Conflict("Email is already registered".to_string())
                        }
                        other => other,
                    })?;
                Ok(User::from(row))
            })
            .await
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let row = or_not_found(
            users::table
                .find(user_id)
                .select(UserDB::as_select())
                .first::<UserDB>(&mut conn),
            "User",
        )?;
        Ok(User::from(row))
    }
}
