use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cached trading-day PnL value.
///
/// Unique per (portfolio, date); a rerun overwrites rather than duplicates,
/// which keeps the recompute idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPnl {
    pub id: String,
    pub portfolio_id: String,
    pub date: NaiveDate,
    /// Unrealized PnL in the reporting currency.
    pub unrealized_pnl: Decimal,
    pub calculated_at: DateTime<Utc>,
}

impl DailyPnl {
    /// Deterministic row id so reruns upsert instead of appending.
    pub fn make_id(portfolio_id: &str, date: NaiveDate) -> String {
        format!("{}_{}", portfolio_id, date)
    }
}

/// One point of the cached PnL series as read back by reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}
