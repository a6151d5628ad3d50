use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{AnalystConsensus, Fundamentals, FxRatePoint, PricePoint, Quote};

/// The reference-data client consumed by the engine.
///
/// Implementations may hit network APIs and cache results; both concerns are
/// out of scope here. Series are returned ordered by ascending date.
#[async_trait]
pub trait MarketDataProviderTrait: Send + Sync {
    /// Historical daily closes for a ticker, going back `years_back` years.
    async fn get_historical_closes(
        &self,
        ticker: &str,
        years_back: u32,
    ) -> Result<Vec<PricePoint>, MarketDataError>;

    /// Historical daily FX rates for a pair in "FROM/TO" convention.
    async fn get_fx_series(
        &self,
        pair: &str,
        years_back: u32,
    ) -> Result<Vec<FxRatePoint>, MarketDataError>;

    /// Current price and currency for a ticker.
    async fn get_quote(&self, ticker: &str) -> Result<Quote, MarketDataError>;

    /// Approximate balance-sheet/income aggregates for a ticker.
    async fn get_fundamentals(&self, ticker: &str) -> Result<Fundamentals, MarketDataError>;

    /// Analyst recommendation and target price for a ticker.
    async fn get_analyst_consensus(
        &self,
        ticker: &str,
    ) -> Result<AnalystConsensus, MarketDataError>;
}
