//! Daily unrealized-PnL derivation and its date-indexed cache.

pub mod pnl_calculator;
mod pnl_errors;
mod pnl_model;
pub mod pnl_service;
mod pnl_traits;

pub use pnl_calculator::*;
pub use pnl_errors::*;
pub use pnl_model::*;
pub use pnl_service::*;
pub use pnl_traits::*;
