use log::debug;

use super::ledger_traits::LedgerTx;
use crate::errors::Result;
use crate::transactions::{MoneyEffect, SettlementTarget, Transaction};

fn apply(tx: &mut dyn LedgerTx, effect: MoneyEffect) -> Result<()> {
    match effect {
        MoneyEffect::AccountBalance { account_id, delta } => {
            debug!("Adjusting account {} balance by {}", account_id, delta);
            tx.adjust_account_balance(&account_id, delta)?;
        }
        MoneyEffect::CardUsedAmount { card_id, delta } => {
            debug!("Adjusting card {} used amount by {}", card_id, delta);
            tx.adjust_card_used_amount(&card_id, delta)?;
        }
    }
    Ok(())
}

/// Applies the balance change of a confirmed transaction.
pub fn apply_money_effect(tx: &mut dyn LedgerTx, transaction: &Transaction) -> Result<()> {
    for effect in transaction.money_effects() {
        apply(tx, effect)?;
    }
    Ok(())
}

/// Undoes the balance change of a confirmed transaction that is being removed.
pub fn reverse_money_effect(tx: &mut dyn LedgerTx, transaction: &Transaction) -> Result<()> {
    for effect in transaction.money_effects() {
        apply(tx, effect.inverse())?;
    }
    Ok(())
}

/// Fails with `NotFound` unless the account or card belongs to the user.
pub fn ensure_target_owned(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    target: &SettlementTarget,
) -> Result<()> {
    match target {
        SettlementTarget::Account(id) => tx.get_account(user_id, id).map(|_| ()),
        SettlementTarget::CreditCard(id) => tx.get_credit_card(user_id, id).map(|_| ()),
    }
}

pub fn ensure_category_owned(
    tx: &mut dyn LedgerTx,
    user_id: &str,
    category_id: Option<&str>,
) -> Result<()> {
    match category_id {
        Some(id) => tx.get_category(user_id, id).map(|_| ()),
        None => Ok(()),
    }
}
