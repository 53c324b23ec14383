//! SQLite storage implementation for accounts.

mod model;
mod repository;

pub use model::AccountDB;
pub(crate) use repository::{adjust_balance, find_account};
pub use repository::AccountRepository;
