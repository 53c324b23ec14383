use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::transfers_model::{CardPayment, CardPaymentResult, TransferRequest, TransferResult};
use super::transfers_traits::TransferServiceTrait;
use crate::errors::{Error, Result};
use crate::ledger::LedgerUnitOfWork;
use crate::transactions::{SettlementTarget, Transaction, TransactionKind, TransactionStatus};
use crate::utils::Clock;

pub struct TransferService {
    ledger: Arc<dyn LedgerUnitOfWork>,
    clock: Arc<dyn Clock>,
}

impl TransferService {
    pub fn new(ledger: Arc<dyn LedgerUnitOfWork>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }
}

/// Confirmed record of money that was already moved explicitly.
struct Movement {
    user_id: String,
    target: SettlementTarget,
    kind: TransactionKind,
    amount: Decimal,
    description: String,
    date: NaiveDate,
    now: NaiveDateTime,
}

impl Movement {
    fn record(self) -> Transaction {
        Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            target: self.target,
            category_id: None,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            date: self.date,
            status: TransactionStatus::Confirmed,
            confirmed_at: Some(self.now),
            recurrence_id: None,
            installment_number: None,
            installment_total: None,
            is_investment_transfer: false,
            is_card_payment: false,
            transfer_to_account_id: None,
            created_at: self.now,
            updated_at: self.now,
        }
    }
}

fn insufficient_balance() -> Error {
    Error::Conflict("Insufficient balance".to_string())
}

#[async_trait::async_trait]
impl TransferServiceTrait for TransferService {
    async fn transfer_between_accounts(
        &self,
        user_id: &str,
        request: TransferRequest,
    ) -> Result<TransferResult> {
        request.validate()?;
        let amount = request.amount;
        let now = self.clock.now();
        let today = self.clock.today();
        let owner = user_id.to_string();

        let result = self
            .ledger
            .run(move |tx| {
                let from = tx.get_account(&owner, &request.from_account_id)?;
                let to = tx.get_account(&owner, &request.to_account_id)?;
                if from.balance < request.amount {
                    return Err(insufficient_balance());
                }

                let from_account = tx.adjust_account_balance(&from.id, -request.amount)?;
                let to_account = tx.adjust_account_balance(&to.id, request.amount)?;

                let description = request
                    .description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| format!("Transfer to {}", to.name));
                let movement = |target, kind, description| Movement {
                    user_id: owner.clone(),
                    target,
                    kind,
                    amount: request.amount,
                    description,
                    date: today,
                    now,
                };

                let transactions = if to.is_investment() {
                    let mut outgoing = movement(
                        SettlementTarget::Account(from.id.clone()),
                        TransactionKind::Expense,
                        description.clone(),
                    )
                    .record();
                    outgoing.is_investment_transfer = true;
                    outgoing.transfer_to_account_id = Some(to.id.clone());

                    let mut incoming = movement(
                        SettlementTarget::Account(to.id.clone()),
                        TransactionKind::Income,
                        description,
                    )
                    .record();
                    incoming.is_investment_transfer = true;
                    vec![outgoing, incoming]
                } else {
                    let mut transfer = movement(
                        SettlementTarget::Account(from.id.clone()),
                        TransactionKind::Transfer,
                        description,
                    )
                    .record();
                    transfer.transfer_to_account_id = Some(to.id.clone());
                    vec![transfer]
                };
                for transaction in &transactions {
                    tx.insert_transaction(transaction)?;
                }

                Ok(TransferResult {
                    from_account,
                    to_account,
                    transactions,
                })
            })
            .await?;

        info!(
            "Transferred {} from account {} to account {}",
            amount, result.from_account.id, result.to_account.id
        );
        Ok(result)
    }

    async fn pay_credit_card_invoice(
        &self,
        user_id: &str,
        card_id: &str,
        payment: CardPayment,
    ) -> Result<CardPaymentResult> {
        payment.validate()?;
        let amount = payment.amount;
        let now = self.clock.now();
        let today = self.clock.today();
        let owner = user_id.to_string();
        let card_id = card_id.to_string();

        let result = self
            .ledger
            .run(move |tx| {
                let card = tx.get_credit_card(&owner, &card_id)?;
                let account = tx.get_account(&owner, &payment.account_id)?;
                if account.balance < payment.amount {
                    return Err(insufficient_balance());
                }

                let account = tx.adjust_account_balance(&account.id, -payment.amount)?;
                let used_before = card.used_amount;
                let card = tx.adjust_card_used_amount(&card.id, -payment.amount)?;
                // The card record holds the amount actually released.
                let released = used_before - card.used_amount;

                let description = payment
                    .description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| format!("Invoice payment {}", card.name));
                let mut sides = vec![(
                    SettlementTarget::Account(account.id.clone()),
                    TransactionKind::Expense,
                    payment.amount,
                )];
                if released > Decimal::ZERO {
                    sides.push((
                        SettlementTarget::CreditCard(card.id.clone()),
                        TransactionKind::Income,
                        released,
                    ));
                }
                let mut transactions = Vec::with_capacity(sides.len());
                for (target, kind, amount) in sides {
                    let mut record = Movement {
                        user_id: owner.clone(),
                        target,
                        kind,
                        amount,
                        description: description.clone(),
                        date: today,
                        now,
                    }
                    .record();
                    record.is_card_payment = true;
                    tx.insert_transaction(&record)?;
                    transactions.push(record);
                }

                Ok(CardPaymentResult {
                    account,
                    card,
                    transactions,
                })
            })
            .await?;

        info!(
            "Paid {} on card {} from account {}",
            amount, result.card.id, result.account.id
        );
        Ok(result)
    }
}
