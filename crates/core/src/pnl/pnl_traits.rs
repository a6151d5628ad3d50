use async_trait::async_trait;
use chrono::NaiveDate;

use super::pnl_model::{DailyPnl, PnlPoint};
use crate::errors::Result;

/// Persistence seam for the (portfolio, date)-keyed PnL cache.
pub trait PnlRepositoryTrait: Send + Sync {
    /// Inserts or replaces the cache row for (portfolio, date).
    fn upsert(&self, entry: &DailyPnl) -> Result<()>;

    /// Cached rows for a portfolio from `date_from` onward (all when `None`).
    fn get_series(&self, portfolio_id: &str, date_from: Option<NaiveDate>)
        -> Result<Vec<DailyPnl>>;
}

#[async_trait]
pub trait PnlServiceTrait: Send + Sync {
    /// Recomputes and upserts the daily PnL cache for one portfolio over a
    /// date range. Idempotent; serialized per portfolio.
    async fn recompute_range(
        &self,
        portfolio_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<()>;

    /// Refreshes the last few days for every portfolio (daily schedule).
    async fn recompute_daily(&self) -> Result<()>;

    /// Refreshes the last six months for every portfolio (weekly schedule).
    async fn recompute_weekly(&self) -> Result<()>;

    /// Rebuilds one portfolio's cache from its first transaction date.
    async fn recompute_full_history(&self, portfolio_id: &str) -> Result<()>;

    /// Reads the cached PnL series back, ordered by date.
    fn get_cached_pnl_series(
        &self,
        portfolio_id: &str,
        date_from: Option<NaiveDate>,
    ) -> Result<Vec<PnlPoint>>;
}
