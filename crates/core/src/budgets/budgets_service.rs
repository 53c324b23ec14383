use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetOverview, BucketUsage, NewBudget};
use super::budgets_resolver::resolve_budget;
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::{BudgetGroup, CategoryRepositoryTrait};
use crate::errors::{Error, Result};
use crate::transactions::{
    TransactionFilter, TransactionKind, TransactionRepositoryTrait, TransactionStatus,
};
use crate::utils::Clock;

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    categories: Arc<dyn CategoryRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        categories: Arc<dyn CategoryRepositoryTrait>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            transactions,
            categories,
            clock,
        }
    }
}

fn check_period(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid("Month must be between 1 and 12"));
    }
    Ok(())
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    fn resolve_budget(&self, user_id: &str, month: u32, year: i32) -> Result<Option<Budget>> {
        check_period(month)?;
        let specific = self.repository.find_specific(user_id, month, year)?;
        if specific.is_some() {
            return Ok(specific);
        }
        let defaults = self.repository.list_defaults(user_id)?;
        Ok(resolve_budget(None, defaults, month, year))
    }

    async fn upsert_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        let upsert = new_budget.into_upsert();
        debug!(
            "Upserting {} budget {}/{} for user {}",
            if upsert.is_default { "default" } else { "specific" },
            upsert.month,
            upsert.year,
            user_id
        );
        self.repository
            .upsert(user_id, upsert, self.clock.now())
            .await
    }

    fn get_budget_overview(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<BudgetOverview> {
        let budget = self.resolve_budget(user_id, month, year)?;

        let groups: HashMap<String, Option<BudgetGroup>> = self
            .categories
            .list(user_id)?
            .into_iter()
            .map(|c| (c.id, c.budget_group))
            .collect();

        let filter = TransactionFilter {
            status: Some(TransactionStatus::Confirmed),
            ..TransactionFilter::for_month(month, year)
        };
        let mut spent: HashMap<BudgetGroup, Decimal> = HashMap::new();
        let mut unassigned_spent = Decimal::ZERO;
        for transaction in self.transactions.list(user_id, &filter)? {
            if transaction.kind != TransactionKind::Expense || !transaction.counts_in_totals() {
                continue;
            }
            let group = transaction
                .category_id
                .as_ref()
                .and_then(|id| groups.get(id).copied().flatten());
            match group {
                Some(group) => *spent.entry(group).or_default() += transaction.amount,
                None => unassigned_spent += transaction.amount,
            }
        }

        let spent_in = |group: BudgetGroup| spent.get(&group).copied().unwrap_or_default();
        let usage = |group: BudgetGroup, budgeted: Option<Decimal>| {
            BucketUsage::new(budgeted.unwrap_or_default(), spent_in(group))
        };
        // Spent figures on the returned budget are the month's actuals.
        let budget = budget.map(|mut b| {
            b.necessities_spent = spent_in(BudgetGroup::Necessities);
            b.wants_spent = spent_in(BudgetGroup::Wants);
            b.savings_spent = spent_in(BudgetGroup::Savings);
            b
        });
        Ok(BudgetOverview {
            month,
            year,
            necessities: usage(
                BudgetGroup::Necessities,
                budget.as_ref().map(|b| b.necessities_budget),
            ),
            wants: usage(BudgetGroup::Wants, budget.as_ref().map(|b| b.wants_budget)),
            savings: usage(BudgetGroup::Savings, budget.as_ref().map(|b| b.savings_budget)),
            unassigned_spent,
            budget,
        })
    }
}
