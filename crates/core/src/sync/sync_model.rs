use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The outcome of one full sync cycle, returned by value.
///
/// Carrying the result out of the cycle (rather than accumulating it in
/// shared mutable state) keeps cycles independent: a fresh cycle starts
/// from a clean slate and test runs cannot bleed into each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCycleReport {
    /// Size of the item universe this cycle processed.
    pub attempted: usize,
    /// Items that succeeded, in first-success order.
    pub succeeded: Vec<String>,
    /// Items still failing after the retry cap, with their attempt counts.
    pub failures: HashMap<String, u32>,
}

impl SyncCycleReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Observability snapshot of the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub cycle_running: bool,
    /// Failure map of the most recently completed cycle.
    pub failures: HashMap<String, u32>,
}
