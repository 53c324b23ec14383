use async_trait::async_trait;

use super::transfers_model::{CardPayment, CardPaymentResult, TransferRequest, TransferResult};
use crate::errors::Result;

#[async_trait]
pub trait TransferServiceTrait: Send + Sync {
    /// Moves money between two of the caller's accounts.
    async fn transfer_between_accounts(
        &self,
        user_id: &str,
        request: TransferRequest,
    ) -> Result<TransferResult>;

    /// Pays down a card's used amount from one of the caller's accounts.
    async fn pay_credit_card_invoice(
        &self,
        user_id: &str,
        card_id: &str,
        payment: CardPayment,
    ) -> Result<CardPaymentResult>;
}
