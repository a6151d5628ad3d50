//! Core error types for the analytics engine.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from whichever database the host application uses) are converted to these
//! types by the repository implementations.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::market_data::MarketDataError;
use crate::pnl::PnlError;
use crate::sync::SyncError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics engine.
///
/// Database-specific errors are wrapped in string form to keep this type
/// storage-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("PnL calculation failed: {0}")]
    Pnl(#[from] PnlError),

    #[error("Sync cycle failed: {0}")]
    Sync(#[from] SyncError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Data-integrity errors raised while replaying the transaction ledger.
///
/// These are hard failures: an oversell would silently corrupt every
/// historical PnL value derived from the affected position, so it is never
/// clamped away.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(
        "Sell of {sold} {ticker} on {date} exceeds held quantity {held}; ledger is inconsistent"
    )]
    Oversell {
        ticker: String,
        date: NaiveDate,
        held: Decimal,
        sold: Decimal,
    },

    #[error("Invalid transaction data: {0}")]
    InvalidTransaction(String),
}

// === From implementations for common error types ===

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
