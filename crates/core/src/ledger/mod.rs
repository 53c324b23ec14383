//! Ledger module - the atomic write boundary shared by every operation that
//! touches more than one row, plus the balance mutator built on top of it.

mod balance_mutator;
mod ledger_traits;

pub use balance_mutator::{
    apply_money_effect, ensure_category_owned, ensure_target_owned, reverse_money_effect,
};
pub use ledger_traits::{LedgerJob, LedgerTx, LedgerUnitOfWork};
