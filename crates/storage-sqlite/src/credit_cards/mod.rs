//! SQLite storage implementation for credit cards.

mod model;
mod repository;

pub use model::CreditCardDB;
pub(crate) use repository::{adjust_used_amount, find_card};
pub use repository::CreditCardRepository;
