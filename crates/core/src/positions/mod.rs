//! Point-in-time position reconstruction from the transaction ledger.

mod positions_model;
pub mod reconstructor;

pub use positions_model::*;
pub use reconstructor::*;
