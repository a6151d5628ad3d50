/// Reporting currency all portfolio-level PnL is normalized into.
pub const DEFAULT_REPORTING_CURRENCY: &str = "EUR";

/// Quantity threshold for significant positions
pub const QUANTITY_THRESHOLD: &str = "0.00000001";

/// Trading days per year, used to annualize daily return statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate used by the Sharpe and Sortino ratios.
pub const RISK_FREE_RATE: f64 = 0.05;

/// z-score of the 95th percentile, used by parametric VaR.
pub const VAR_95_Z: f64 = 1.645;

/// Sortino ratio reported for a series with no observed downside.
pub const SORTINO_NO_DOWNSIDE: f64 = 3.0;

/// Minimum number of price points for meaningful risk statistics.
pub const MIN_HISTORY_POINTS: usize = 30;

/// Benchmark symbol used for beta.
pub const BENCHMARK_SYMBOL: &str = "^GSPC";

/// Neutral midpoint of the 1-10 composite risk score.
pub const NEUTRAL_RISK_SCORE: i32 = 5;

/// Maximum retry rounds for failing items within one sync cycle.
pub const MAX_SYNC_RETRIES: u32 = 3;

/// Days of history recomputed by the daily PnL schedule.
pub const DAILY_RECOMPUTE_LOOKBACK_DAYS: i64 = 5;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for average prices in trade simulations.
pub const PRICE_DECIMAL_PRECISION: u32 = 4;
