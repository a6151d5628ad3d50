//! Reference-data domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observed daily close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// One observed daily FX rate for a currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRatePoint {
    pub date: NaiveDate,
    pub rate: Decimal,
}

/// A point-in-time quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub currency: String,
}

/// Approximate balance-sheet and income aggregates for one instrument.
///
/// These are proxies derived from whatever aggregate figures the provider
/// exposes, not GAAP line items; the solvency scoring treats them as such.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundamentals {
    pub market_cap: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    /// Working-capital proxy (current assets minus current liabilities).
    pub working_capital: Option<f64>,
    /// Retained-earnings proxy.
    pub retained_earnings: Option<f64>,
    /// EBIT proxy.
    pub ebit: Option<f64>,
    pub revenue: Option<f64>,
    pub total_cash: Option<f64>,
    pub total_debt: Option<f64>,
    pub free_cash_flow: Option<f64>,
    /// Year-over-year revenue growth as a fraction (0.15 = 15%).
    pub revenue_growth: Option<f64>,
    pub trailing_pe: Option<f64>,
}

/// Analyst recommendation buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl RecommendationKind {
    pub fn is_bullish(&self) -> bool {
        matches!(self, RecommendationKind::StrongBuy | RecommendationKind::Buy)
    }
}

/// Aggregated analyst view of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystConsensus {
    pub recommendation: RecommendationKind,
    pub target_price: Option<f64>,
}

/// Builds the FX series symbol for a currency pair, e.g. "USD/EUR".
pub fn fx_pair_symbol(from_currency: &str, to_currency: &str) -> String {
    format!("{}/{}", from_currency, to_currency)
}
