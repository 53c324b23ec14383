use async_trait::async_trait;

use super::credit_cards_model::{CreditCard, CreditCardUpdate, NewCreditCard};
use crate::errors::Result;

/// Persistence contract for credit cards, scoped by owning user.
#[async_trait]
pub trait CreditCardRepositoryTrait: Send + Sync {
    async fn create(&self, user_id: &str, new_card: NewCreditCard) -> Result<CreditCard>;
    async fn update(&self, user_id: &str, card_update: CreditCardUpdate) -> Result<CreditCard>;
    async fn delete(&self, user_id: &str, card_id: &str) -> Result<usize>;
    fn get_by_id(&self, user_id: &str, card_id: &str) -> Result<CreditCard>;
    fn list(&self, user_id: &str) -> Result<Vec<CreditCard>>;
}

#[async_trait]
pub trait CreditCardServiceTrait: Send + Sync {
    async fn create_card(&self, user_id: &str, new_card: NewCreditCard) -> Result<CreditCard>;
    async fn update_card(&self, user_id: &str, card_update: CreditCardUpdate)
        -> Result<CreditCard>;
    async fn delete_card(&self, user_id: &str, card_id: &str) -> Result<()>;
    fn get_card(&self, user_id: &str, card_id: &str) -> Result<CreditCard>;
    fn list_cards(&self, user_id: &str) -> Result<Vec<CreditCard>>;
}
