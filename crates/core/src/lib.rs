//! Pocketledger Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Pocketledger: accounts, credit
//! cards, the transaction lifecycle, the recurrence engine, the budget
//! resolver and transfer orchestration. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod constants;
pub mod credit_cards;
pub mod dashboard;
pub mod errors;
pub mod goals;
pub mod ledger;
pub mod recurrences;
pub mod transactions;
pub mod transfers;
pub mod users;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
