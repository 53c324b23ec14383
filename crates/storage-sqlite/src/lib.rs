//! SQLite storage implementation for Pocketledger.
//!
//! This crate is the only place where Diesel is used. It implements the
//! repository traits and the ledger unit of work defined in
//! `pocketledger-core`, and owns:
//! - connection pooling and the single-writer actor
//! - embedded Diesel migrations
//! - row models with their conversions to domain types
//!
//! ```text
//!        core (domain, traits)
//!                │
//!                ▼
//!   storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod credit_cards;
pub mod goals;
pub mod ledger;
pub mod recurrences;
pub mod transactions;
pub mod users;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from pocketledger-core for convenience
pub use pocketledger_core::errors::{DatabaseError, Error, Result};
