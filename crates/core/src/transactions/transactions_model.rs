//! Ledger domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The side of a ledger entry.
///
/// Only `Buy` and `Sell` affect reconstructed positions; the remaining
/// variants are cash movements carried for completeness of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionSide {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
    Dividend,
    Fee,
}

impl TransactionSide {
    /// Whether this side changes the quantity of a security position.
    pub fn affects_position(&self) -> bool {
        matches!(self, TransactionSide::Buy | TransactionSide::Sell)
    }
}

/// An immutable ledger entry.
///
/// Transactions are append-only; an edit replaces the row and triggers a
/// downstream PnL recompute. Ordering within a portfolio is by
/// `transaction_date`, ties broken by `created_at` then `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub portfolio_id: String,
    pub ticker: String,
    pub side: TransactionSide,
    pub quantity: Decimal,
    /// Price per unit in the trade currency.
    pub unit_price: Decimal,
    /// Trade currency (e.g. "USD", "EUR").
    pub currency: String,
    /// FX rate to the reporting currency at trade time, when known.
    #[serde(default)]
    pub fx_rate: Option<Decimal>,
    #[serde(default)]
    pub fee: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Calendar date of the trade, used as the reconstruction axis.
    pub fn effective_date(&self) -> NaiveDate {
        self.transaction_date.date_naive()
    }
}

/// Sorts a ledger slice into replay order: by trade date, ties broken by
/// insertion order (`created_at`, then `id`).
pub fn sort_ledger(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}
