use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use dashmap::DashMap;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

use super::pnl_calculator::{
    trading_days, unrealized_pnl_for_day, CloseSeriesMap, FxSeriesMap,
};
use super::pnl_errors::PnlError;
use super::pnl_model::{DailyPnl, PnlPoint};
use super::pnl_traits::{PnlRepositoryTrait, PnlServiceTrait};
use crate::constants::{DAILY_RECOMPUTE_LOOKBACK_DAYS, DEFAULT_REPORTING_CURRENCY};
use crate::errors::Result;
use crate::market_data::{fx_pair_symbol, MarketDataProviderTrait};
use crate::positions::reconstructor::positions_as_of;
use crate::transactions::{sort_ledger, TransactionRepositoryTrait};
use crate::utils::Period;

/// Derives the daily unrealized-PnL series and maintains its cache.
///
/// Trading days for a single portfolio are processed strictly in
/// chronological order; independent portfolios carry no ordering guarantee.
/// Concurrent recomputes of the *same* portfolio serialize on a
/// per-portfolio lock so partial upserts never interleave.
pub struct PnlService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    pnl_repository: Arc<dyn PnlRepositoryTrait>,
    market_data: Arc<dyn MarketDataProviderTrait>,
    reporting_currency: Arc<RwLock<String>>,
    portfolio_locks: DashMap<String, Arc<Mutex<()>>>,
    batch_running: AtomicBool,
}

impl PnlService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        pnl_repository: Arc<dyn PnlRepositoryTrait>,
        market_data: Arc<dyn MarketDataProviderTrait>,
        reporting_currency: Arc<RwLock<String>>,
    ) -> Self {
        Self {
            transaction_repository,
            pnl_repository,
            market_data,
            reporting_currency,
            portfolio_locks: DashMap::new(),
            batch_running: AtomicBool::new(false),
        }
    }

    /// Convenience constructor reporting in the default currency.
    pub fn with_default_currency(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        pnl_repository: Arc<dyn PnlRepositoryTrait>,
        market_data: Arc<dyn MarketDataProviderTrait>,
    ) -> Self {
        Self::new(
            transaction_repository,
            pnl_repository,
            market_data,
            Arc::new(RwLock::new(DEFAULT_REPORTING_CURRENCY.to_string())),
        )
    }

    fn portfolio_lock(&self, portfolio_id: &str) -> Arc<Mutex<()>> {
        self.portfolio_locks
            .entry(portfolio_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn reporting_currency(&self) -> String {
        self.reporting_currency
            .read()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// How far back to ask the provider for history so it covers `start`.
    fn years_back_for(start: NaiveDate) -> u32 {
        let today = Utc::now().date_naive();
        let days = (today - start).num_days().max(0);
        (days / 365) as u32 + 1
    }

    /// Loads per-ticker close series. A ticker whose fetch fails is logged
    /// and skipped; its positions simply contribute nothing, the batch
    /// carries on.
    async fn load_close_series(&self, tickers: &BTreeSet<String>, years_back: u32) -> CloseSeriesMap {
        let mut closes = CloseSeriesMap::new();
        for ticker in tickers {
            match self.market_data.get_historical_closes(ticker, years_back).await {
                Ok(series) => {
                    closes.insert(
                        ticker.clone(),
                        series.into_iter().map(|p| (p.date, p.close)).collect(),
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to load close history for {}: {}. Its positions will not contribute.",
                        ticker, e
                    );
                }
            }
        }
        closes
    }

    /// Loads FX series for every foreign trade currency, "CCY/REPORT" pair
    /// convention. Missing series degrade the affected days to a zero
    /// contribution; they never abort the recompute.
    async fn load_fx_series(
        &self,
        currencies: &BTreeSet<String>,
        reporting_currency: &str,
        years_back: u32,
    ) -> FxSeriesMap {
        let mut fx = FxSeriesMap::new();
        for currency in currencies {
            let pair = fx_pair_symbol(currency, reporting_currency);
            match self.market_data.get_fx_series(&pair, years_back).await {
                Ok(series) => {
                    fx.insert(
                        currency.clone(),
                        series.into_iter().map(|p| (p.date, p.rate)).collect(),
                    );
                }
                Err(e) => {
                    warn!("Failed to load FX series {}: {}", pair, e);
                }
            }
        }
        fx
    }

    /// Runs `recompute_range` over every portfolio, guarded so a second
    /// schedule trigger while one is active is dropped with a warning.
    async fn recompute_all(&self, start: NaiveDate, end: NaiveDate, label: &str) -> Result<()> {
        if self
            .batch_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(
                "A portfolio-wide PnL recompute is already running; {} trigger dropped",
                label
            );
            return Err(PnlError::RecomputeAlreadyRunning.into());
        }

        let result = self.recompute_all_inner(start, end, label).await;
        self.batch_running.store(false, Ordering::SeqCst);
        result
    }

    async fn recompute_all_inner(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        label: &str,
    ) -> Result<()> {
        let portfolio_ids = self.transaction_repository.list_portfolio_ids()?;
        let mut failed = 0usize;

        for portfolio_id in &portfolio_ids {
            if let Err(e) = self.recompute_range(portfolio_id, start, end).await {
                error!(
                    "{} PnL recompute failed for portfolio {}: {}",
                    label, portfolio_id, e
                );
                failed += 1;
            }
        }

        if failed > 0 {
            warn!(
                "{} PnL recompute finished: {}/{} portfolios failed",
                label,
                failed,
                portfolio_ids.len()
            );
        } else {
            info!(
                "{} PnL recompute finished for {} portfolios",
                label,
                portfolio_ids.len()
            );
        }
        Ok(())
    }
}

#[async_trait]
impl PnlServiceTrait for PnlService {
    async fn recompute_range(
        &self,
        portfolio_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<()> {
        if start > end {
            return Err(PnlError::InvalidRange(start, end).into());
        }

        let lock = self.portfolio_lock(portfolio_id);
        let _guard = lock.lock().await;

        // The full ledger up to `end`: reconstruction for any day in the
        // range needs every earlier transaction, not just in-range ones.
        let mut transactions = self
            .transaction_repository
            .get_for_portfolio_until(portfolio_id, end)?;
        sort_ledger(&mut transactions);

        let tickers: BTreeSet<String> = transactions
            .iter()
            .filter(|tx| tx.side.affects_position())
            .map(|tx| tx.ticker.clone())
            .collect();
        if tickers.is_empty() {
            debug!(
                "Portfolio {} has no instrument transactions; nothing to recompute",
                portfolio_id
            );
            return Ok(());
        }

        let reporting_currency = self.reporting_currency();
        let years_back = Self::years_back_for(start);

        let closes = self.load_close_series(&tickers, years_back).await;

        let currencies: BTreeSet<String> = transactions
            .iter()
            .filter(|tx| tx.side.affects_position())
            .map(|tx| tx.currency.clone())
            .filter(|currency| currency != &reporting_currency)
            .collect();
        let fx = self
            .load_fx_series(&currencies, &reporting_currency, years_back)
            .await;

        let days = trading_days(&closes, start, end);
        if days.is_empty() {
            debug!(
                "No observed trading days for portfolio {} between {} and {}",
                portfolio_id, start, end
            );
            return Ok(());
        }

        let mut written = 0usize;
        for day in days {
            let positions = positions_as_of(&transactions, day)?;
            if positions.is_empty() {
                continue;
            }

            let pnl = unrealized_pnl_for_day(&positions, &closes, &fx, &reporting_currency, day);
            let entry = DailyPnl {
                id: DailyPnl::make_id(portfolio_id, day),
                portfolio_id: portfolio_id.to_string(),
                date: day,
                unrealized_pnl: pnl,
                calculated_at: Utc::now(),
            };
            self.pnl_repository.upsert(&entry)?;
            written += 1;
        }

        debug!(
            "Recomputed {} PnL days for portfolio {} ({} to {})",
            written, portfolio_id, start, end
        );
        Ok(())
    }

    async fn recompute_daily(&self) -> Result<()> {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(DAILY_RECOMPUTE_LOOKBACK_DAYS);
        self.recompute_all(start, end, "daily").await
    }

    async fn recompute_weekly(&self) -> Result<()> {
        let end = Utc::now().date_naive();
        let start = Period::SixMonths.start_date(end).unwrap_or(end);
        self.recompute_all(start, end, "weekly").await
    }

    async fn recompute_full_history(&self, portfolio_id: &str) -> Result<()> {
        let first = match self
            .transaction_repository
            .first_transaction_date(portfolio_id)?
        {
            Some(date) => date,
            None => {
                debug!(
                    "Portfolio {} has no transactions; skipping full-history recompute",
                    portfolio_id
                );
                return Ok(());
            }
        };
        self.recompute_range(portfolio_id, first, Utc::now().date_naive())
            .await
    }

    fn get_cached_pnl_series(
        &self,
        portfolio_id: &str,
        date_from: Option<NaiveDate>,
    ) -> Result<Vec<PnlPoint>> {
        let mut rows = self.pnl_repository.get_series(portfolio_id, date_from)?;
        rows.sort_by_key(|row| row.date);
        Ok(rows
            .into_iter()
            .map(|row| PnlPoint {
                date: row.date,
                value: row.unrealized_pnl,
            })
            .collect())
    }
}
