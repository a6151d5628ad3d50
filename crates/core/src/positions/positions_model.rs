use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::QUANTITY_THRESHOLD;

pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 8));
    quantity.abs() >= threshold
}

/// A reconstructed position as of a given date.
///
/// Derived, never persisted: re-running the reconstruction for any historical
/// date reproduces it deterministically from the ledger, including dates
/// before the live position existed or after it was closed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub ticker: String,
    pub quantity: Decimal,
    /// Weighted-average cost per unit in the trade currency.
    /// Recomputed on every buy; a sell never changes it.
    pub average_cost: Decimal,
    /// The currency of the instrument and its cost basis (e.g. "USD").
    pub currency: String,
    /// Date of the first acquisition still reflected in this position.
    pub first_acquired: DateTime<Utc>,
}

impl Position {
    pub fn new(ticker: String, currency: String, date: DateTime<Utc>) -> Self {
        Position {
            ticker,
            quantity: Decimal::ZERO,
            average_cost: Decimal::ZERO,
            currency,
            first_acquired: date,
        }
    }

    /// Total cost basis of the open quantity, in the trade currency.
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.average_cost
    }
}
