//! Ledger unit of work backed by the single-writer actor.

mod unit_of_work;

pub use unit_of_work::{SqliteLedger, SqliteLedgerTx};
