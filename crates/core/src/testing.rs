//! In-memory store and clock shared by the service tests.
//!
//! `InMemoryStore` implements every repository trait plus the ledger unit of
//! work. A job runs against a clone of the state which only replaces the
//! live state when the job succeeds, mirroring a rolled-back transaction.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::accounts::{Account, AccountRepositoryTrait, AccountType, AccountUpdate, NewAccount};
use crate::budgets::{Budget, BudgetRepositoryTrait, BudgetUpsert};
use crate::categories::{BudgetGroup, Category, CategoryKind, CategoryRepositoryTrait, NewCategory};
use crate::credit_cards::{
    CreditCard, CreditCardRepositoryTrait, CreditCardUpdate, NewCreditCard,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::ledger::{LedgerJob, LedgerTx, LedgerUnitOfWork};
use crate::recurrences::{Recurrence, RecurrenceRepositoryTrait};
use crate::transactions::{
    SettlementTarget, Transaction, TransactionFilter, TransactionRepositoryTrait,
    TransactionStatus,
};
use crate::utils::Clock;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
}

pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    pub accounts: BTreeMap<String, Account>,
    pub cards: BTreeMap<String, CreditCard>,
    pub categories: BTreeMap<String, Category>,
    pub transactions: BTreeMap<String, Transaction>,
    pub recurrences: BTreeMap<String, Recurrence>,
    pub budgets: Vec<Budget>,
    /// Number of transaction inserts allowed before the next one fails.
    pub inserts_before_failure: Option<usize>,
}

fn missing(entity: &str) -> Error {
    Error::not_found(entity)
}

impl LedgerState {
    pub fn pending_of(&self, recurrence_id: &str) -> Vec<Transaction> {
        let mut pending: Vec<_> = self
            .transactions
            .values()
            .filter(|t| t.recurrence_id.as_deref() == Some(recurrence_id) && t.is_pending())
            .cloned()
            .collect();
        pending.sort_by_key(|t| t.date);
        pending
    }

    pub fn linked_to(&self, recurrence_id: &str) -> Vec<Transaction> {
        let mut linked: Vec<_> = self
            .transactions
            .values()
            .filter(|t| t.recurrence_id.as_deref() == Some(recurrence_id))
            .cloned()
            .collect();
        linked.sort_by_key(|t| (t.date, t.installment_number));
        linked
    }
}

impl LedgerTx for LedgerState {
    fn get_account(&mut self, user_id: &str, account_id: &str) -> Result<Account> {
        self.accounts
            .get(account_id)
            .filter(|a| a.user_id == user_id)
            .cloned()
            .ok_or_else(|| missing("Account"))
    }

    fn adjust_account_balance(&mut self, account_id: &str, delta: Decimal) -> Result<Account> {
        let account = self
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| missing("Account"))?;
        account.balance += delta;
        Ok(account.clone())
    }

    fn get_credit_card(&mut self, user_id: &str, card_id: &str) -> Result<CreditCard> {
        self.cards
            .get(card_id)
            .filter(|c| c.user_id == user_id)
            .cloned()
            .ok_or_else(|| missing("Credit card"))
    }

    fn adjust_card_used_amount(&mut self, card_id: &str, delta: Decimal) -> Result<CreditCard> {
        let card = self
            .cards
            .get_mut(card_id)
            .ok_or_else(|| missing("Credit card"))?;
        card.used_amount = (card.used_amount + delta).max(Decimal::ZERO);
        Ok(card.clone())
    }

    fn get_category(&mut self, user_id: &str, category_id: &str) -> Result<Category> {
        self.categories
            .get(category_id)
            .filter(|c| c.user_id == user_id)
            .cloned()
            .ok_or_else(|| missing("Category"))
    }

    fn get_transaction(&mut self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.transactions
            .get(transaction_id)
            .filter(|t| t.user_id == user_id)
            .cloned()
            .ok_or_else(|| missing("Transaction"))
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        if let Some(remaining) = self.inserts_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "injected insert failure".to_string(),
                )));
            }
            *remaining -= 1;
        }
        self.transactions
            .insert(transaction.id.clone(), transaction.clone());
        Ok(())
    }

    fn update_transaction(&mut self, transaction: &Transaction) -> Result<()> {
        match self.transactions.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(())
            }
            None => Err(missing("Transaction")),
        }
    }

    fn set_transaction_target(
        &mut self,
        transaction_id: &str,
        target: &SettlementTarget,
    ) -> Result<()> {
        let transaction = self
            .transactions
            .get_mut(transaction_id)
            .ok_or_else(|| missing("Transaction"))?;
        transaction.target = target.clone();
        Ok(())
    }

    fn confirm_if_pending(
        &mut self,
        transaction_id: &str,
        date: NaiveDate,
        confirmed_at: NaiveDateTime,
    ) -> Result<bool> {
        match self.transactions.get_mut(transaction_id) {
            Some(t) if t.is_pending() => {
                t.status = TransactionStatus::Confirmed;
                t.date = date;
                t.confirmed_at = Some(confirmed_at);
                t.updated_at = confirmed_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn delete_transaction_if_status(
        &mut self,
        transaction_id: &str,
        status: TransactionStatus,
    ) -> Result<bool> {
        let matches = self
            .transactions
            .get(transaction_id)
            .is_some_and(|t| t.status == status);
        if matches {
            self.transactions.remove(transaction_id);
        }
        Ok(matches)
    }

    fn list_recurrence_transactions(&mut self, recurrence_id: &str) -> Result<Vec<Transaction>> {
        Ok(self.linked_to(recurrence_id))
    }

    fn delete_recurrence_transactions(&mut self, recurrence_id: &str) -> Result<usize> {
        let before = self.transactions.len();
        self.transactions
            .retain(|_, t| t.recurrence_id.as_deref() != Some(recurrence_id));
        Ok(before - self.transactions.len())
    }

    fn get_recurrence(&mut self, user_id: &str, recurrence_id: &str) -> Result<Recurrence> {
        self.recurrences
            .get(recurrence_id)
            .filter(|r| r.user_id == user_id)
            .cloned()
            .ok_or_else(|| missing("Recurrence"))
    }

    fn insert_recurrence(&mut self, recurrence: &Recurrence) -> Result<()> {
        self.recurrences
            .insert(recurrence.id.clone(), recurrence.clone());
        Ok(())
    }

    fn update_recurrence(&mut self, recurrence: &Recurrence) -> Result<()> {
        match self.recurrences.get_mut(&recurrence.id) {
            Some(existing) => {
                *existing = recurrence.clone();
                Ok(())
            }
            None => Err(missing("Recurrence")),
        }
    }

    fn delete_recurrence(&mut self, recurrence_id: &str) -> Result<usize> {
        Ok(usize::from(self.recurrences.remove(recurrence_id).is_some()))
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<LedgerState>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> LedgerState {
        self.state.lock().unwrap().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut LedgerState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn seed_account(&self, user_id: &str, account_type: AccountType, balance: Decimal) -> Account {
        let now = noon(2025, 1, 1);
        let account = Account {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: format!("{} account", account_type),
            account_type,
            balance,
            currency: "BRL".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.with_state(|s| s.accounts.insert(account.id.clone(), account.clone()));
        account
    }

    pub fn seed_card(&self, user_id: &str, credit_limit: Decimal, used_amount: Decimal) -> CreditCard {
        let now = noon(2025, 1, 1);
        let card = CreditCard {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: "Visa".to_string(),
            credit_limit,
            used_amount,
            closing_day: 3,
            due_day: 10,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.with_state(|s| s.cards.insert(card.id.clone(), card.clone()));
        card
    }

    pub fn seed_category(
        &self,
        user_id: &str,
        kind: CategoryKind,
        budget_group: Option<BudgetGroup>,
    ) -> Category {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: format!("{} category", kind),
            kind,
            budget_group,
            color: None,
            created_at: noon(2025, 1, 1),
        };
        self.with_state(|s| s.categories.insert(category.id.clone(), category.clone()));
        category
    }

    pub fn account(&self, account_id: &str) -> Account {
        self.snapshot().accounts[account_id].clone()
    }

    pub fn card(&self, card_id: &str) -> CreditCard {
        self.snapshot().cards[card_id].clone()
    }
}

#[async_trait]
impl LedgerUnitOfWork for InMemoryStore {
    async fn execute_boxed(&self, job: LedgerJob) -> Result<Box<dyn Any + Send>> {
        let mut guard = self.state.lock().unwrap();
        let mut working = guard.clone();
        let result = job(&mut working)?;
        *guard = working;
        Ok(result)
    }
}

#[async_trait]
impl AccountRepositoryTrait for InMemoryStore {
    async fn create(&self, user_id: &str, new_account: NewAccount) -> Result<Account> {
        let now = noon(2025, 1, 1);
        let account = Account {
            id: new_account.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: new_account.name.clone(),
            account_type: new_account.account_type,
            balance: new_account.balance.unwrap_or_default(),
            currency: new_account.currency_or_default(),
            is_active: new_account.is_active,
            created_at: now,
            updated_at: now,
        };
        self.with_state(|s| s.accounts.insert(account.id.clone(), account.clone()));
        Ok(account)
    }

    async fn update(&self, user_id: &str, account_update: AccountUpdate) -> Result<Account> {
        self.with_state(|s| {
            let id = account_update.id.clone().unwrap_or_default();
            let account = s
                .accounts
                .get_mut(&id)
                .filter(|a| a.user_id == user_id)
                .ok_or_else(|| missing("Account"))?;
            account.name = account_update.name;
            account.account_type = account_update.account_type;
            account.is_active = account_update.is_active;
            Ok(account.clone())
        })
    }

    async fn delete(&self, user_id: &str, account_id: &str) -> Result<usize> {
        self.with_state(|s| match s.accounts.get(account_id) {
            Some(a) if a.user_id == user_id => {
                s.accounts.remove(account_id);
                Ok(1)
            }
            _ => Ok(0),
        })
    }

    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account> {
        self.with_state(|s| s.get_account(user_id, account_id))
    }

    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        Ok(self.with_state(|s| {
            s.accounts
                .values()
                .filter(|a| a.user_id == user_id)
                .filter(|a| is_active_filter.map_or(true, |active| a.is_active == active))
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl CreditCardRepositoryTrait for InMemoryStore {
    async fn create(&self, user_id: &str, new_card: NewCreditCard) -> Result<CreditCard> {
        let card = self.seed_card(user_id, new_card.credit_limit, Decimal::ZERO);
        self.with_state(|s| {
            let stored = s.cards.get_mut(&card.id).ok_or_else(|| missing("Credit card"))?;
            stored.name = new_card.name;
            stored.closing_day = new_card.closing_day;
            stored.due_day = new_card.due_day;
            Ok(stored.clone())
        })
    }

    async fn update(&self, user_id: &str, card_update: CreditCardUpdate) -> Result<CreditCard> {
        self.with_state(|s| {
            let id = card_update.id.clone().unwrap_or_default();
            let card = s
                .cards
                .get_mut(&id)
                .filter(|c| c.user_id == user_id)
                .ok_or_else(|| missing("Credit card"))?;
            card.name = card_update.name;
            card.credit_limit = card_update.credit_limit;
            card.closing_day = card_update.closing_day;
            card.due_day = card_update.due_day;
            card.is_active = card_update.is_active;
            Ok(card.clone())
        })
    }

    async fn delete(&self, user_id: &str, card_id: &str) -> Result<usize> {
        self.with_state(|s| match s.cards.get(card_id) {
            Some(c) if c.user_id == user_id => {
                s.cards.remove(card_id);
                Ok(1)
            }
            _ => Ok(0),
        })
    }

    fn get_by_id(&self, user_id: &str, card_id: &str) -> Result<CreditCard> {
        self.with_state(|s| s.get_credit_card(user_id, card_id))
    }

    fn list(&self, user_id: &str) -> Result<Vec<CreditCard>> {
        Ok(self.with_state(|s| {
            s.cards
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryStore {
    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        let category = self.seed_category(user_id, new_category.kind, new_category.budget_group);
        self.with_state(|s| {
            let stored = s
                .categories
                .get_mut(&category.id)
                .ok_or_else(|| missing("Category"))?;
            stored.name = new_category.name;
            stored.color = new_category.color;
            Ok(stored.clone())
        })
    }

    async fn delete(&self, user_id: &str, category_id: &str) -> Result<usize> {
        self.with_state(|s| {
            let referenced = s
                .transactions
                .values()
                .any(|t| t.category_id.as_deref() == Some(category_id))
                || s.recurrences.values().any(|r| r.category_id == category_id);
            if referenced {
                return Err(Error::ConstraintViolation(
                    "Category is still in use".to_string(),
                ));
            }
            match s.categories.get(category_id) {
                Some(c) if c.user_id == user_id => {
                    s.categories.remove(category_id);
                    Ok(1)
                }
                _ => Ok(0),
            }
        })
    }

    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.with_state(|s| s.get_category(user_id, category_id))
    }

    fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        Ok(self.with_state(|s| {
            s.categories
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect()
        }))
    }
}

impl TransactionRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.with_state(|s| s.get_transaction(user_id, transaction_id))
    }

    fn list(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut found: Vec<Transaction> = self.with_state(|s| {
            s.transactions
                .values()
                .filter(|t| t.user_id == user_id)
                .filter(|t| filter.year.map_or(true, |y| t.date.year() == y))
                .filter(|t| filter.month.map_or(true, |m| t.date.month() == m))
                .filter(|t| filter.status.map_or(true, |st| t.status == st))
                .filter(|t| {
                    filter
                        .account_id
                        .as_deref()
                        .map_or(true, |id| t.target.account_id() == Some(id))
                })
                .filter(|t| {
                    filter
                        .credit_card_id
                        .as_deref()
                        .map_or(true, |id| t.target.credit_card_id() == Some(id))
                })
                .cloned()
                .collect()
        });
        found.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(found)
    }

    fn list_pending(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut pending: Vec<Transaction> = self.with_state(|s| {
            s.transactions
                .values()
                .filter(|t| t.user_id == user_id && t.is_pending())
                .cloned()
                .collect()
        });
        pending.sort_by_key(|t| t.date);
        Ok(pending)
    }

    fn list_by_recurrence(&self, user_id: &str, recurrence_id: &str) -> Result<Vec<Transaction>> {
        Ok(self.with_state(|s| {
            s.linked_to(recurrence_id)
                .into_iter()
                .filter(|t| t.user_id == user_id)
                .collect()
        }))
    }
}

impl RecurrenceRepositoryTrait for InMemoryStore {
    fn get_by_id(&self, user_id: &str, recurrence_id: &str) -> Result<Recurrence> {
        self.with_state(|s| s.get_recurrence(user_id, recurrence_id))
    }

    fn list_active(&self, user_id: &str) -> Result<Vec<Recurrence>> {
        Ok(self.with_state(|s| {
            s.recurrences
                .values()
                .filter(|r| r.user_id == user_id && r.is_active)
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    fn find_specific(&self, user_id: &str, month: u32, year: i32) -> Result<Option<Budget>> {
        Ok(self.with_state(|s| {
            s.budgets
                .iter()
                .find(|b| {
                    b.user_id == user_id
                        && !b.is_default
                        && b.month == month as i32
                        && b.year == year
                })
                .cloned()
        }))
    }

    fn list_defaults(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut defaults: Vec<Budget> = self.with_state(|s| {
            s.budgets
                .iter()
                .filter(|b| b.user_id == user_id && b.is_default)
                .cloned()
                .collect()
        });
        defaults.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(defaults)
    }

    async fn upsert(
        &self,
        user_id: &str,
        budget: BudgetUpsert,
        now: NaiveDateTime,
    ) -> Result<Budget> {
        self.with_state(|s| {
            let existing = s.budgets.iter_mut().find(|b| {
                b.user_id == user_id
                    && b.month == budget.month
                    && b.year == budget.year
                    && b.is_default == budget.is_default
            });
            let stored = match existing {
                Some(row) => {
                    row.total_income = budget.total_income;
                    row.necessities_budget = budget.necessities_budget;
                    row.wants_budget = budget.wants_budget;
                    row.savings_budget = budget.savings_budget;
                    row.updated_at = now;
                    row.clone()
                }
                None => {
                    let row = Budget {
                        id: Uuid::new_v4().to_string(),
                        user_id: user_id.to_string(),
                        month: budget.month,
                        year: budget.year,
                        total_income: budget.total_income,
                        necessities_budget: budget.necessities_budget,
                        necessities_spent: Decimal::ZERO,
                        wants_budget: budget.wants_budget,
                        wants_spent: Decimal::ZERO,
                        savings_budget: budget.savings_budget,
                        savings_spent: Decimal::ZERO,
                        is_default: budget.is_default,
                        created_at: now,
                        updated_at: now,
                    };
                    s.budgets.push(row.clone());
                    row
                }
            };
            Ok(stored)
        })
    }
}
