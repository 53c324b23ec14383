//! Credit cards module - domain models, services, and traits.

mod credit_cards_model;
mod credit_cards_service;
mod credit_cards_traits;

pub use credit_cards_model::{CreditCard, CreditCardUpdate, NewCreditCard};
pub use credit_cards_service::CreditCardService;
pub use credit_cards_traits::{CreditCardRepositoryTrait, CreditCardServiceTrait};
