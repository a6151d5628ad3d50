//! Ledgerlens Core - Historical PnL reconstruction and risk analytics.
//!
//! This crate contains the analytics engine of the portfolio tracker:
//! replaying the transaction ledger into point-in-time positions, deriving
//! the daily unrealized-PnL series in the reporting currency, scoring
//! instrument risk, and orchestrating batched reference-data refreshes.
//! It is storage- and transport-agnostic: persistence and market-data
//! access are expressed as traits implemented by the host application.

pub mod constants;
pub mod errors;
pub mod market_data;
pub mod pnl;
pub mod positions;
pub mod risk;
pub mod sync;
pub mod transactions;
pub mod utils;

// Re-export common types from the position and pnl modules
pub use pnl::*;
pub use positions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
