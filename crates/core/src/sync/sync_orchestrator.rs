use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::sync_errors::SyncError;
use super::sync_model::{SyncCycleReport, SyncStatus};
use crate::constants::MAX_SYNC_RETRIES;
use crate::errors::Result;
use crate::positions::reconstructor::positions_as_of;
use crate::transactions::TransactionRepositoryTrait;

/// Refreshes one item of the sync universe (e.g. the corporate calendar
/// events of a ticker). Implementations live with the reference-data
/// client; the orchestrator only cares whether the refresh succeeded.
#[async_trait]
pub trait SyncItemHandler: Send + Sync {
    async fn sync_item(&self, symbol: &str) -> Result<()>;
}

/// Drives periodic full-universe refresh cycles.
///
/// All state is owned by the instance and injected by the host: there are
/// no process-wide globals, so independent orchestrators (or test runs)
/// cannot share hidden state. Each batch runs with full intra-batch
/// concurrency; batches are strictly sequenced with a fixed delay between
/// them to respect rate-limited upstream APIs. Items that fail are retried
/// in batched rounds up to a fixed cap and then left recorded in the cycle
/// report.
pub struct SyncOrchestrator {
    handler: Arc<dyn SyncItemHandler>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    /// Fixed symbols refreshed every cycle regardless of holdings.
    watchlist: Vec<String>,
    running: AtomicBool,
    cancelled: AtomicBool,
    last_failures: RwLock<HashMap<String, u32>>,
}

impl SyncOrchestrator {
    pub fn new(
        handler: Arc<dyn SyncItemHandler>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        watchlist: Vec<String>,
    ) -> Self {
        Self {
            handler,
            transaction_repository,
            watchlist,
            running: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            last_failures: RwLock::new(HashMap::new()),
        }
    }

    /// Runs one full refresh cycle and returns its report by value.
    ///
    /// A trigger arriving while a cycle is active is rejected with
    /// [`SyncError::CycleAlreadyRunning`], never queued.
    pub async fn run_full_cycle(
        &self,
        batch_size: usize,
        interval: Duration,
    ) -> Result<SyncCycleReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("A sync cycle is already running; trigger dropped");
            return Err(SyncError::CycleAlreadyRunning.into());
        }
        self.cancelled.store(false, Ordering::SeqCst);

        let result = self.run_cycle_inner(batch_size.max(1), interval).await;

        if let Ok(report) = &result {
            match self.last_failures.write() {
                Ok(mut failures) => *failures = report.failures.clone(),
                Err(poisoned) => *poisoned.into_inner() = report.failures.clone(),
            }
        }
        self.running.store(false, Ordering::SeqCst);
        result
    }

    /// Whether a cycle is active, plus the failure map of the last
    /// completed cycle.
    pub fn status(&self) -> SyncStatus {
        let failures = match self.last_failures.read() {
            Ok(failures) => failures.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        SyncStatus {
            cycle_running: self.running.load(Ordering::SeqCst),
            failures,
        }
    }

    /// Requests cancellation; honored at the next batch boundary.
    pub fn cancel(&self) {
        info!("Sync cycle cancellation requested");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    async fn run_cycle_inner(
        &self,
        batch_size: usize,
        interval: Duration,
    ) -> Result<SyncCycleReport> {
        let universe = self.build_universe()?;
        if universe.is_empty() {
            debug!("Sync universe is empty; nothing to refresh");
            return Ok(SyncCycleReport {
                attempted: 0,
                succeeded: Vec::new(),
                failures: HashMap::new(),
            });
        }
        info!(
            "Starting sync cycle over {} items (batch size {})",
            universe.len(),
            batch_size
        );

        let mut succeeded: Vec<String> = Vec::new();
        let mut failure_counts: HashMap<String, u32> = HashMap::new();
        let mut pending = universe.clone();
        let mut round = 0u32;

        while !pending.is_empty() && round <= MAX_SYNC_RETRIES {
            if self.cancelled.load(Ordering::SeqCst) {
                info!("Sync cycle cancelled after {} rounds", round);
                break;
            }
            if round > 0 {
                info!("Sync retry round {} for {} items", round, pending.len());
            }

            let (processed, failed) = self.run_batch_pass(&pending, batch_size, interval).await;

            // Items in batches skipped by cancellation are neither
            // succeeded nor failed; they simply were not attempted.
            for symbol in &processed {
                if !failed.contains(symbol) {
                    succeeded.push(symbol.clone());
                }
            }
            for symbol in &failed {
                *failure_counts.entry(symbol.clone()).or_insert(0) += 1;
            }

            pending = failed;
            round += 1;
        }

        // Items that eventually succeeded drop out of the failure map.
        failure_counts.retain(|symbol, _| pending.contains(symbol));

        if failure_counts.is_empty() {
            info!("Sync cycle completed cleanly for {} items", universe.len());
        } else {
            warn!(
                "Sync cycle completed with {} items still failing: {:?}",
                failure_counts.len(),
                failure_counts.keys().collect::<Vec<_>>()
            );
        }

        Ok(SyncCycleReport {
            attempted: universe.len(),
            succeeded,
            failures: failure_counts,
        })
    }

    /// The item universe: the fixed watch-list plus every ticker held in
    /// any open position across all portfolios, deduplicated.
    fn build_universe(&self) -> Result<Vec<String>> {
        let mut universe: BTreeSet<String> = self.watchlist.iter().cloned().collect();
        let today = Utc::now().date_naive();

        for portfolio_id in self.transaction_repository.list_portfolio_ids()? {
            let transactions = self.transaction_repository.get_for_portfolio(&portfolio_id)?;
            match positions_as_of(&transactions, today) {
                Ok(positions) => universe.extend(positions.keys().cloned()),
                Err(e) => {
                    warn!(
                        "Skipping portfolio {} while building sync universe: {}",
                        portfolio_id, e
                    );
                }
            }
        }

        Ok(universe.into_iter().collect())
    }

    /// One pass over `items`: full concurrency inside each batch, a fixed
    /// delay between batches. Returns the items actually attempted and the
    /// subset of them that failed.
    async fn run_batch_pass(
        &self,
        items: &[String],
        batch_size: usize,
        interval: Duration,
    ) -> (Vec<String>, Vec<String>) {
        let mut processed = Vec::new();
        let mut failed = Vec::new();
        let batch_count = items.chunks(batch_size).count();

        for (index, chunk) in items.chunks(batch_size).enumerate() {
            if self.cancelled.load(Ordering::SeqCst) {
                warn!("Sync cancelled; skipping remaining batches");
                break;
            }
            processed.extend(chunk.iter().cloned());

            let futures: Vec<_> = chunk
                .iter()
                .map(|symbol| {
                    let symbol = symbol.clone();
                    async move {
                        match self.handler.sync_item(&symbol).await {
                            Ok(()) => Ok(symbol),
                            Err(e) => {
                                warn!("Sync failed for {}: {}", symbol, e);
                                Err(symbol)
                            }
                        }
                    }
                })
                .collect();

            for result in join_all(futures).await {
                if let Err(symbol) = result {
                    failed.push(symbol);
                }
            }

            if index + 1 < batch_count {
                tokio::time::sleep(interval).await;
            }
        }

        (processed, failed)
    }
}
