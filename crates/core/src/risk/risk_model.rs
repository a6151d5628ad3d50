use serde::{Deserialize, Serialize};

/// Altman-Z classification zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolvencyZone {
    Safe,
    Grey,
    Distress,
}

impl SolvencyZone {
    pub fn label(&self) -> &'static str {
        match self {
            SolvencyZone::Safe => "Low bankruptcy risk",
            SolvencyZone::Grey => "Some financial stress possible",
            SolvencyZone::Distress => "Elevated financial distress risk",
        }
    }
}

/// Solvency verdict derived from approximate fundamentals.
///
/// The z-score inputs are proxies, not audited filings; treat the verdict as
/// a screening signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvencyVerdict {
    pub z_score: f64,
    pub zone: SolvencyZone,
    pub label: String,
}

/// Maximum drawdown with the peak/trough pair that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownStats {
    /// Largest peak-to-trough decline, as a percentage.
    pub max_drawdown: f64,
    pub peak_index: usize,
    pub trough_index: usize,
}

impl DrawdownStats {
    pub const ZERO: DrawdownStats = DrawdownStats {
        max_drawdown: 0.0,
        peak_index: 0,
        trough_index: 0,
    };
}

/// The full battery of risk measures for one instrument.
///
/// Ephemeral result of a pure computation over a price series; callers may
/// cache it with a TTL but this core does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub symbol: String,
    /// Annualized volatility, percent.
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Largest peak-to-trough decline, percent.
    pub max_drawdown: f64,
    pub drawdown_peak_index: usize,
    pub drawdown_trough_index: usize,
    pub beta: f64,
    /// Parametric 95% daily Value-at-Risk, percent (negative = loss).
    pub var_95: f64,
    /// Composite 1-10 score; higher = riskier.
    pub risk_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solvency: Option<SolvencyVerdict>,
}
