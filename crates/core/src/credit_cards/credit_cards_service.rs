use log::debug;
use std::sync::Arc;

use super::credit_cards_model::{CreditCard, CreditCardUpdate, NewCreditCard};
use super::credit_cards_traits::{CreditCardRepositoryTrait, CreditCardServiceTrait};
use crate::errors::{Error, Result};

pub struct CreditCardService {
    repository: Arc<dyn CreditCardRepositoryTrait>,
}

impl CreditCardService {
    pub fn new(repository: Arc<dyn CreditCardRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CreditCardServiceTrait for CreditCardService {
    async fn create_card(&self, user_id: &str, new_card: NewCreditCard) -> Result<CreditCard> {
        new_card.validate()?;
        debug!("Creating credit card '{}' for user {}", new_card.name, user_id);
        self.repository.create(user_id, new_card).await
    }

    async fn update_card(
        &self,
        user_id: &str,
        card_update: CreditCardUpdate,
    ) -> Result<CreditCard> {
        card_update.validate()?;
        self.repository.update(user_id, card_update).await
    }

    async fn delete_card(&self, user_id: &str, card_id: &str) -> Result<()> {
        if self.repository.delete(user_id, card_id).await? == 0 {
            return Err(Error::not_found("Credit card"));
        }
        Ok(())
    }

    fn get_card(&self, user_id: &str, card_id: &str) -> Result<CreditCard> {
        self.repository.get_by_id(user_id, card_id)
    }

    fn list_cards(&self, user_id: &str) -> Result<Vec<CreditCard>> {
        self.repository.list(user_id)
    }
}
