#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::accounts::AccountType;
    use crate::ledger::LedgerUnitOfWork;
    use crate::testing::{noon, FixedClock, InMemoryStore};
    use crate::transactions::{SettlementTarget, TransactionKind};
    use crate::transfers::{CardPayment, TransferRequest, TransferService, TransferServiceTrait};
    use crate::Error;

    const USER: &str = "user-1";

    fn setup() -> (Arc<InMemoryStore>, TransferService) {
        let store = InMemoryStore::new();
        let ledger: Arc<dyn LedgerUnitOfWork> = store.clone();
        let service = TransferService::new(ledger, FixedClock::at(noon(2025, 5, 5)));
        (store, service)
    }

    fn transfer(from: &str, to: &str, amount: rust_decimal::Decimal) -> TransferRequest {
        TransferRequest {
            from_account_id: from.to_string(),
            to_account_id: to.to_string(),
            amount,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_transfer_conserves_total_balance() {
        let (store, service) = setup();
        let a = store.seed_account(USER, AccountType::Checking, dec!(1000));
        let b = store.seed_account(USER, AccountType::Savings, dec!(250));

        let result = service
            .transfer_between_accounts(USER, transfer(&a.id, &b.id, dec!(400.25)))
            .await
            .unwrap();
        assert_eq!(result.from_account.balance, dec!(599.75));
        assert_eq!(result.to_account.balance, dec!(650.25));
        assert_eq!(
            result.from_account.balance + result.to_account.balance,
            a.balance + b.balance
        );

        assert_eq!(result.transactions.len(), 1);
        let record = &result.transactions[0];
        assert_eq!(record.kind, TransactionKind::Transfer);
        assert_eq!(record.transfer_to_account_id.as_deref(), Some(b.id.as_str()));
        assert_eq!(record.money_effects().len(), 2);
    }

    #[tokio::test]
    async fn test_transfer_to_investment_records_tagged_pair() {
        let (store, service) = setup();
        let a = store.seed_account(USER, AccountType::Checking, dec!(1000));
        let broker = store.seed_account(USER, AccountType::Investment, dec!(0));

        let result = service
            .transfer_between_accounts(USER, transfer(&a.id, &broker.id, dec!(300)))
            .await
            .unwrap();
        assert_eq!(result.transactions.len(), 2);
        assert!(result
            .transactions
            .iter()
            .all(|t| t.is_investment_transfer && !t.counts_in_totals()));
        assert_eq!(result.transactions[0].kind, TransactionKind::Expense);
        assert_eq!(
            result.transactions[1].target,
            SettlementTarget::Account(broker.id.clone())
        );
        assert_eq!(store.account(&broker.id).balance, dec!(300));
    }

    #[tokio::test]
    async fn test_transfer_rejections_leave_balances_alone() {
        let (store, service) = setup();
        let a = store.seed_account(USER, AccountType::Checking, dec!(100));
        let b = store.seed_account(USER, AccountType::Checking, dec!(0));
        let foreign = store.seed_account("user-2", AccountType::Checking, dec!(0));

        assert!(matches!(
            service
                .transfer_between_accounts(USER, transfer(&a.id, &b.id, dec!(100.01)))
                .await,
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            service
                .transfer_between_accounts(USER, transfer(&a.id, &a.id, dec!(10)))
                .await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            service
                .transfer_between_accounts(USER, transfer(&a.id, &b.id, dec!(0)))
                .await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            service
                .transfer_between_accounts(USER, transfer(&a.id, &foreign.id, dec!(10)))
                .await,
            Err(Error::NotFound(_))
        ));

        let state = store.snapshot();
        assert_eq!(state.accounts[&a.id].balance, dec!(100));
        assert_eq!(state.accounts[&b.id].balance, dec!(0));
        assert!(state.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_card_payment_floors_used_amount() {
        let (store, service) = setup();
        let account = store.seed_account(USER, AccountType::Checking, dec!(1000));
        let card = store.seed_card(USER, dec!(2000), dec!(150));

        let result = service
            .pay_credit_card_invoice(
                USER,
                &card.id,
                CardPayment {
                    account_id: account.id.clone(),
                    amount: dec!(400),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(result.card.used_amount, dec!(0));
        assert_eq!(result.account.balance, dec!(600));
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[0].kind, TransactionKind::Expense);
        assert_eq!(result.transactions[1].kind, TransactionKind::Income);
        // Only the 150 that was owed is released on the card side.
        assert_eq!(result.transactions[0].amount, dec!(400));
        assert_eq!(result.transactions[1].amount, dec!(150));
        assert!(result.transactions.iter().all(|t| t.is_card_payment));
    }

    #[tokio::test]
    async fn test_card_payment_needs_funds() {
        let (store, service) = setup();
        let account = store.seed_account(USER, AccountType::Checking, dec!(50));
        let card = store.seed_card(USER, dec!(2000), dec!(150));

        let result = service
            .pay_credit_card_invoice(
                USER,
                &card.id,
                CardPayment {
                    account_id: account.id.clone(),
                    amount: dec!(100),
                    description: None,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(store.card(&card.id).used_amount, dec!(150));
    }
}
