//! Recurrence engine: the writes behind recurrence creation, regeneration,
//! propagation and cascade deletion.
//!
//! Everything here runs inside a [`LedgerTx`], so callers decide the unit of
//! work and every step commits or rolls back together.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::recurrences_model::{
    NewRecurrence, Recurrence, RecurrenceCreated, RecurrenceUpdate, RecurrenceUpdated,
};
use super::recurrences_schedule::{advance, advance_anchored, occurrence_date};
use crate::constants::{INSTALLMENT_LABEL, MAX_MATERIALIZED_OCCURRENCES};
use crate::ledger::{ensure_category_owned, ensure_target_owned, LedgerTx};
use crate::transactions::{Transaction, TransactionStatus};
use crate::{Error, Result};

/// Description of the `number`-th of `total` installments.
pub fn installment_description(description: &str, number: i32, total: i32) -> String {
    format!("{} ({}/{} {})", description, number, total, INSTALLMENT_LABEL)
}

fn pending_occurrence(
    recurrence: &Recurrence,
    date: NaiveDate,
    installment: Option<(i32, i32)>,
    now: NaiveDateTime,
) -> Transaction {
    let description = match installment {
        Some((number, total)) => installment_description(&recurrence.description, number, total),
        None => recurrence.description.clone(),
    };
    Transaction {
        id: Uuid::new_v4().to_string(),
        user_id: recurrence.user_id.clone(),
        target: recurrence.target.clone(),
        category_id: Some(recurrence.category_id.clone()),
        kind: recurrence.kind,
        amount: recurrence.amount,
        description,
        date,
        status: TransactionStatus::Pending,
        confirmed_at: None,
        recurrence_id: Some(recurrence.id.clone()),
        installment_number: installment.map(|(number, _)| number),
        installment_total: installment.map(|(_, total)| total),
        is_investment_transfer: false,
        is_card_payment: false,
        transfer_to_account_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// Occurrence dates of a bounded recurrence, `start..=end`.
fn bounded_dates(new: &NewRecurrence, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut n = 0u32;
    loop {
        let date = occurrence_date(new.start_date, new.frequency, n)?;
        if date > end {
            break;
        }
        if dates.len() == MAX_MATERIALIZED_OCCURRENCES {
            return Err(Error::invalid(format!(
                "A bounded recurrence may produce at most {} occurrences",
                MAX_MATERIALIZED_OCCURRENCES
            )));
        }
        dates.push(date);
        n += 1;
    }
    if dates.len() < 2 {
        return Err(Error::invalid(
            "A single payment is not a recurrence; the end date allows only one occurrence",
        ));
    }
    Ok(dates)
}

/// Persists a new recurrence and the transactions it materialises.
pub(crate) fn create_recurrence(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    new: NewRecurrence,
    now: NaiveDateTime,
) -> Result<RecurrenceCreated> {
    ensure_target_owned(tx, user_id, &new.target)?;
    ensure_category_owned(tx, user_id, Some(&new.category_id))?;

    // (date, installment) pairs to materialise, plus the stored end date.
    let (plan, end_date): (Vec<(NaiveDate, Option<(i32, i32)>)>, Option<NaiveDate>) =
        match (new.installments, new.end_date) {
            (Some(n), _) => {
                let total = n as i32;
                let plan = (0..n)
                    .map(|i| {
                        occurrence_date(new.start_date, new.frequency, i)
                            .map(|date| (date, Some((i as i32 + 1, total))))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let last = plan.last().map(|(date, _)| *date);
                (plan, last)
            }
            (None, Some(end)) => {
                let plan = bounded_dates(&new, end)?
                    .into_iter()
                    .map(|date| (date, None))
                    .collect();
                (plan, Some(end))
            }
            (None, None) => {
                let first = if new.first_occurrence_paid {
                    advance(new.start_date, new.frequency)?
                } else {
                    new.start_date
                };
                (vec![(first, None)], None)
            }
        };

    let next_execution_date = plan
        .first()
        .map(|(date, _)| *date)
        .unwrap_or(new.start_date);

    let recurrence = Recurrence {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        target: new.target,
        category_id: new.category_id,
        kind: new.kind,
        amount: new.amount,
        description: new.description.trim().to_string(),
        frequency: new.frequency,
        start_date: new.start_date,
        end_date,
        installments: new.installments.map(|n| n as i32),
        is_active: true,
        next_execution_date,
        last_executed_date: None,
        created_at: now,
        updated_at: now,
    };
    tx.insert_recurrence(&recurrence)?;

    let mut transactions = Vec::with_capacity(plan.len());
    for (date, installment) in plan {
        let transaction = pending_occurrence(&recurrence, date, installment, now);
        tx.insert_transaction(&transaction)?;
        transactions.push(transaction);
    }

    let total_value = recurrence.amount * Decimal::from(transactions.len());
    debug!(
        "Created recurrence {} with {} pending transaction(s)",
        recurrence.id,
        transactions.len()
    );
    Ok(RecurrenceCreated {
        recurrence,
        transactions,
        total_value,
    })
}

/// Births the next pending occurrence of a forever recurrence.
///
/// Returns `None` without writing anything when the recurrence is inactive
/// or bounded.
pub fn create_next_pending_transaction(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    recurrence_id: &str,
    now: NaiveDateTime,
) -> Result<Option<Transaction>> {
    let mut recurrence = tx.get_recurrence(user_id, recurrence_id)?;
    if !recurrence.is_active || !recurrence.is_forever() {
        return Ok(None);
    }

    let next = advance_anchored(
        recurrence.start_date,
        recurrence.next_execution_date,
        recurrence.frequency,
    )?;
    let transaction = pending_occurrence(&recurrence, next, None, now);
    tx.insert_transaction(&transaction)?;

    recurrence.last_executed_date = Some(recurrence.next_execution_date);
    recurrence.next_execution_date = next;
    recurrence.updated_at = now;
    tx.update_recurrence(&recurrence)?;

    debug!(
        "Recurrence {} advanced to {} (transaction {})",
        recurrence.id, next, transaction.id
    );
    Ok(Some(transaction))
}

/// Patches a recurrence and pushes the changed fields to its pending
/// transactions. Confirmed transactions are never rewritten.
pub(crate) fn update_recurrence(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    recurrence_id: &str,
    update: RecurrenceUpdate,
    now: NaiveDateTime,
) -> Result<RecurrenceUpdated> {
    let mut recurrence = tx.get_recurrence(user_id, recurrence_id)?;
    let was_active = recurrence.is_active;

    if let Some(target) = &update.target {
        ensure_target_owned(tx, user_id, target)?;
    }
    ensure_category_owned(tx, user_id, update.category_id.as_deref())?;

    if let Some(amount) = update.amount {
        recurrence.amount = amount;
    }
    if let Some(description) = &update.description {
        recurrence.description = description.trim().to_string();
    }
    if let Some(category_id) = &update.category_id {
        recurrence.category_id = category_id.clone();
    }
    if let Some(target) = &update.target {
        recurrence.target = target.clone();
    }
    if let Some(kind) = update.kind {
        recurrence.kind = kind;
    }
    if let Some(is_active) = update.is_active {
        recurrence.is_active = is_active;
    }
    recurrence.updated_at = now;
    tx.update_recurrence(&recurrence)?;

    let mut updated_transactions = Vec::new();
    let linked = tx.list_recurrence_transactions(&recurrence.id)?;
    let has_pending = linked.iter().any(Transaction::is_pending);
    if update.touches_transactions() {
        for mut transaction in linked {
            if !transaction.is_pending() {
                continue;
            }
            if update.amount.is_some() {
                transaction.amount = recurrence.amount;
            }
            if update.description.is_some() {
                transaction.description =
                    match (transaction.installment_number, transaction.installment_total) {
                        (Some(number), Some(total)) => {
                            installment_description(&recurrence.description, number, total)
                        }
                        _ => recurrence.description.clone(),
                    };
            }
            if update.category_id.is_some() {
                transaction.category_id = Some(recurrence.category_id.clone());
            }
            if update.target.is_some() {
                transaction.target = recurrence.target.clone();
            }
            if update.kind.is_some() {
                transaction.kind = recurrence.kind;
            }
            transaction.updated_at = now;
            tx.update_transaction(&transaction)?;
            updated_transactions.push(transaction);
        }
    }

    // A forever series that comes back on must have one pending occurrence.
    let mut next_transaction = None;
    if !was_active && recurrence.is_active && recurrence.is_forever() && !has_pending {
        next_transaction = create_next_pending_transaction(tx, user_id, &recurrence.id, now)?;
        recurrence = tx.get_recurrence(user_id, &recurrence.id)?;
    }

    debug!(
        "Updated recurrence {} and {} pending transaction(s)",
        recurrence.id,
        updated_transactions.len()
    );
    Ok(RecurrenceUpdated {
        recurrence,
        updated_transactions,
        next_transaction,
    })
}

/// Hard-deletes a recurrence with every transaction linked to it. Balances
/// are not adjusted for confirmed transactions removed this way.
pub(crate) fn delete_recurrence(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    recurrence_id: &str,
) -> Result<usize> {
    let recurrence = tx.get_recurrence(user_id, recurrence_id)?;
    let removed = tx.delete_recurrence_transactions(&recurrence.id)?;
    tx.delete_recurrence(&recurrence.id)?;
    debug!(
        "Deleted recurrence {} and {} transaction(s)",
        recurrence.id, removed
    );
    Ok(removed)
}
