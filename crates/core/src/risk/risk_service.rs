use async_trait::async_trait;
use log::{debug, warn};
use num_traits::ToPrimitive;
use std::sync::Arc;

use super::risk_calculator::compute_risk_metrics;
use super::risk_model::RiskMetrics;
use crate::constants::BENCHMARK_SYMBOL;
use crate::errors::Result;
use crate::market_data::MarketDataProviderTrait;

/// Years of close history used for the risk battery.
const RISK_HISTORY_YEARS: u32 = 1;

#[async_trait]
pub trait RiskServiceTrait: Send + Sync {
    /// Full risk battery for one instrument. Always returns a displayable
    /// result: upstream fetch failures degrade individual inputs to their
    /// neutral defaults instead of propagating.
    async fn get_risk_metrics(&self, ticker: &str) -> Result<RiskMetrics>;
}

/// Gathers the inputs of the pure risk layer from the reference-data client.
pub struct RiskService {
    market_data: Arc<dyn MarketDataProviderTrait>,
}

impl RiskService {
    pub fn new(market_data: Arc<dyn MarketDataProviderTrait>) -> Self {
        Self { market_data }
    }

    async fn load_prices(&self, symbol: &str) -> Vec<f64> {
        match self
            .market_data
            .get_historical_closes(symbol, RISK_HISTORY_YEARS)
            .await
        {
            Ok(series) => series.iter().filter_map(|p| p.close.to_f64()).collect(),
            Err(e) => {
                warn!("Failed to load close history for {}: {}", symbol, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RiskServiceTrait for RiskService {
    async fn get_risk_metrics(&self, ticker: &str) -> Result<RiskMetrics> {
        let prices = self.load_prices(ticker).await;

        let benchmark = self.load_prices(BENCHMARK_SYMBOL).await;
        let benchmark = (!benchmark.is_empty()).then_some(benchmark);

        let fundamentals = match self.market_data.get_fundamentals(ticker).await {
            Ok(f) => Some(f),
            Err(e) => {
                debug!("No fundamentals for {}: {}", ticker, e);
                None
            }
        };

        let consensus = match self.market_data.get_analyst_consensus(ticker).await {
            Ok(c) => Some(c),
            Err(e) => {
                debug!("No analyst consensus for {}: {}", ticker, e);
                None
            }
        };

        Ok(compute_risk_metrics(
            ticker,
            &prices,
            benchmark.as_deref(),
            fundamentals.as_ref(),
            consensus.as_ref(),
        ))
    }
}
