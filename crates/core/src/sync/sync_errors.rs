use thiserror::Error;

/// Errors raised by the sync orchestrator.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A cycle trigger arrived while one was active. Triggers are dropped,
    /// never queued, to avoid duplicate writes and upstream rate limits.
    #[error("a sync cycle is already running; trigger dropped")]
    CycleAlreadyRunning,
}
