//! Transactions module - the transaction lifecycle.

mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use transactions_model::{
    MoneyEffect, NewTransaction, SettlementTarget, Transaction, TransactionFilter,
    TransactionKind, TransactionStatus,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{
    ConfirmedTransaction, TransactionRepositoryTrait, TransactionServiceTrait,
};
