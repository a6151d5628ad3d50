//! Replays the transaction ledger to reconstruct open positions as of a date.
//!
//! Pure function of the ledger: no network or storage access. Cheap enough to
//! call once per trading day per portfolio during a historical backfill
//! (thousands of invocations for a multi-year recompute).

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::{LedgerError, Result};
use crate::positions::{is_quantity_significant, Position};
use crate::transactions::{Transaction, TransactionSide};

/// Replays all transactions dated on or before `date` and returns the open
/// positions, keyed by ticker.
///
/// A buy folds the new units into the weighted-average cost (fees included);
/// a sell reduces quantity and leaves the average cost untouched. A ticker
/// whose quantity reaches zero is removed. A sell exceeding the held
/// quantity returns [`LedgerError::Oversell`] rather than clamping, since a
/// clamp would corrupt every PnL value derived from the position.
///
/// `transactions` need not be pre-sorted; the replay orders them by trade
/// date with ties broken by insertion order.
pub fn positions_as_of(
    transactions: &[Transaction],
    date: NaiveDate,
) -> Result<HashMap<String, Position>> {
    let mut ledger: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.side.affects_position() && tx.effective_date() <= date)
        .collect();
    ledger.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut positions: HashMap<String, Position> = HashMap::new();

    for tx in ledger {
        if tx.quantity.is_sign_negative() {
            return Err(LedgerError::InvalidTransaction(format!(
                "transaction {} has negative quantity {}",
                tx.id, tx.quantity
            ))
            .into());
        }
        match tx.side {
            TransactionSide::Buy => apply_buy(&mut positions, tx),
            TransactionSide::Sell => apply_sell(&mut positions, tx)?,
            _ => {}
        }
    }

    Ok(positions)
}

fn apply_buy(positions: &mut HashMap<String, Position>, tx: &Transaction) {
    if tx.quantity.is_zero() {
        warn!("Skipping buy {} with zero quantity", tx.id);
        return;
    }
    let position = positions.entry(tx.ticker.clone()).or_insert_with(|| {
        Position::new(tx.ticker.clone(), tx.currency.clone(), tx.transaction_date)
    });

    if position.currency != tx.currency {
        warn!(
            "Transaction {} currency {} differs from position currency {} for {}; keeping the position currency",
            tx.id, tx.currency, position.currency, tx.ticker
        );
    }

    let new_quantity = position.quantity + tx.quantity;
    // (existing_qty*existing_avg + new_qty*new_price + fees) / total_qty
    position.average_cost = (position.quantity * position.average_cost
        + tx.quantity * tx.unit_price
        + tx.fee)
        / new_quantity;
    position.quantity = new_quantity;
}

fn apply_sell(positions: &mut HashMap<String, Position>, tx: &Transaction) -> Result<()> {
    let held = positions
        .get(&tx.ticker)
        .map(|p| p.quantity)
        .unwrap_or(Decimal::ZERO);

    let remaining = held - tx.quantity;
    if remaining.is_sign_negative() && is_quantity_significant(&remaining) {
        return Err(LedgerError::Oversell {
            ticker: tx.ticker.clone(),
            date: tx.effective_date(),
            held,
            sold: tx.quantity,
        }
        .into());
    }

    if !is_quantity_significant(&remaining) || remaining.is_sign_negative() {
        // Fully closed (decimal dust absorbed by the significance threshold).
        positions.remove(&tx.ticker);
    } else if let Some(position) = positions.get_mut(&tx.ticker) {
        position.quantity = remaining;
    }

    Ok(())
}
