//! Batched, retrying refresh cycles for external reference data.
//!
//! The same scheduling discipline drives every background refresh job:
//! bounded intra-batch concurrency, strict inter-batch throttling, bounded
//! retries, and a re-entrancy guard.

mod sync_errors;
mod sync_model;
mod sync_orchestrator;

pub use sync_errors::*;
pub use sync_model::*;
pub use sync_orchestrator::*;
