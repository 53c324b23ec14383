//! Property-based tests for the budget resolver.
//!
//! The resolver is a pure function over a specific budget and a set of
//! defaults, so its temporal fallback rules can be checked on arbitrary
//! histories.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use pocketledger_core::budgets::{resolve_budget, Budget};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

fn default_budget(index: usize, created_at: NaiveDateTime) -> Budget {
    Budget {
        id: format!("default-{index}"),
        user_id: "u1".to_string(),
        month: created_at.month() as i32,
        year: created_at.year(),
        total_income: Decimal::from(1000 + index as i64),
        necessities_budget: Decimal::ZERO,
        necessities_spent: Decimal::ZERO,
        wants_budget: Decimal::ZERO,
        wants_spent: Decimal::ZERO,
        savings_budget: Decimal::ZERO,
        savings_spent: Decimal::ZERO,
        is_default: true,
        created_at,
        updated_at: created_at,
    }
}

/// Creation instants spread over 2020..2030, distinct to the second.
fn arb_created_at() -> impl Strategy<Value = NaiveDateTime> {
    (2020i32..2030, 1u32..=12, 1u32..=28, 0u32..86_400).prop_map(|(y, m, d, secs)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(secs / 3600, (secs / 60) % 60, secs % 60)
            .unwrap()
    })
}

proptest! {
    #[test]
    fn prop_resolved_default_is_newest_applicable(
        created in prop::collection::vec(arb_created_at(), 0..12),
        year in 2019i32..2031,
        month in 1u32..=12,
    ) {
        let defaults: Vec<Budget> = created
            .iter()
            .enumerate()
            .map(|(i, at)| default_budget(i, *at))
            .collect();
        let requested = month_index(year, month);

        let resolved = resolve_budget(None, defaults.clone(), month, year);
        let applicable: Vec<&Budget> = defaults
            .iter()
            .filter(|b| month_index(b.created_at.year(), b.created_at.month()) <= requested)
            .collect();

        match resolved {
            None => prop_assert!(applicable.is_empty()),
            Some(found) => {
                prop_assert!(month_index(found.created_at.year(), found.created_at.month()) <= requested);
                prop_assert!(applicable.iter().all(|b| b.created_at <= found.created_at));
            }
        }
    }

    #[test]
    fn prop_input_order_does_not_matter(
        created in prop::collection::vec(arb_created_at(), 1..10),
        year in 2019i32..2031,
        month in 1u32..=12,
    ) {
        let defaults: Vec<Budget> = created
            .iter()
            .enumerate()
            .map(|(i, at)| default_budget(i, *at))
            .collect();
        let mut reversed = defaults.clone();
        reversed.reverse();

        let forward = resolve_budget(None, defaults, month, year).map(|b| b.created_at);
        let backward = resolve_budget(None, reversed, month, year).map(|b| b.created_at);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_specific_budget_always_wins(
        created in prop::collection::vec(arb_created_at(), 0..6),
        specific_at in arb_created_at(),
    ) {
        let defaults: Vec<Budget> = created
            .iter()
            .enumerate()
            .map(|(i, at)| default_budget(i, *at))
            .collect();
        let mut specific = default_budget(99, specific_at);
        specific.id = "specific".to_string();
        specific.is_default = false;

        let resolved = resolve_budget(
            Some(specific),
            defaults,
            specific_at.month(),
            specific_at.year(),
        );
        prop_assert_eq!(resolved.map(|b| b.id), Some("specific".to_string()));
    }
}
