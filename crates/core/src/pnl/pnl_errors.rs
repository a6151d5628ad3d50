use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the PnL calculator.
#[derive(Error, Debug)]
pub enum PnlError {
    /// A portfolio-wide recompute trigger arrived while one was active.
    /// Triggers are dropped, never queued, to avoid duplicate cache writes.
    #[error("a portfolio-wide PnL recompute is already running; trigger dropped")]
    RecomputeAlreadyRunning,

    #[error("invalid date range: start {0} is after end {1}")]
    InvalidRange(NaiveDate, NaiveDate),
}
