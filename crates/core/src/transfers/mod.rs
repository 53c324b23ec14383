//! Transfers module - inter-account transfers and credit-card invoice payments.

mod transfers_model;
mod transfers_service;
mod transfers_traits;

#[cfg(test)]
mod transfers_service_tests;

pub use transfers_model::{CardPayment, CardPaymentResult, TransferRequest, TransferResult};
pub use transfers_service::TransferService;
pub use transfers_traits::TransferServiceTrait;
