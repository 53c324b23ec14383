//! Temporary database wiring for the storage tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;
use pocketledger_core::users::{NewUser, UserRepositoryTrait};

pub struct TestDb {
    _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

/// Migrated database in a fresh temp dir. Must run inside a tokio runtime.
pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let path = path.to_str().unwrap().to_string();
    init(&path).unwrap();
    let pool = create_pool(&path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.as_ref().clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

impl TestDb {
    pub async fn seed_user(&self, email: &str) -> String {
        UserRepository::new(self.pool.clone(), self.writer.clone())
            .create(NewUser {
                email: email.to_string(),
                name: "Test".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }
}
