//! Reference-data seam: quotes, historical closes, FX rates, fundamentals.
//!
//! The actual retrieval/caching client lives outside this crate; the engine
//! only consumes the trait defined here and treats every call as fallible.

mod market_data_errors;
mod market_data_model;
mod market_data_traits;

pub use market_data_errors::*;
pub use market_data_model::*;
pub use market_data_traits::*;
