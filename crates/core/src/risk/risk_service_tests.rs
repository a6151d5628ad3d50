#[cfg(test)]
mod tests {
    use crate::market_data::{
        AnalystConsensus, Fundamentals, FxRatePoint, MarketDataError, MarketDataProviderTrait,
        PricePoint, Quote, RecommendationKind,
    };
    use crate::risk::risk_model::SolvencyZone;
    use crate::risk::risk_service::{RiskService, RiskServiceTrait};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct MockMarketDataProvider {
        closes: HashMap<String, Vec<PricePoint>>,
        fundamentals: Option<Fundamentals>,
        consensus: Option<AnalystConsensus>,
    }

    impl MockMarketDataProvider {
        fn with_series(mut self, symbol: &str, prices: &[f64]) -> Self {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            self.closes.insert(
                symbol.to_string(),
                prices
                    .iter()
                    .enumerate()
                    .map(|(i, p)| PricePoint {
                        date: start + chrono::Duration::days(i as i64),
                        close: Decimal::try_from(*p).unwrap(),
                    })
                    .collect(),
            );
            self
        }
    }

    #[async_trait]
    impl MarketDataProviderTrait for MockMarketDataProvider {
        async fn get_historical_closes(
            &self,
            ticker: &str,
            _years_back: u32,
        ) -> Result<Vec<PricePoint>, MarketDataError> {
            self.closes
                .get(ticker)
                .cloned()
                .ok_or_else(|| MarketDataError::NotFound(ticker.to_string()))
        }

        async fn get_fx_series(
            &self,
            pair: &str,
            _years_back: u32,
        ) -> Result<Vec<FxRatePoint>, MarketDataError> {
            Err(MarketDataError::NotFound(pair.to_string()))
        }

        async fn get_quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
            Err(MarketDataError::NotFound(ticker.to_string()))
        }

        async fn get_fundamentals(
            &self,
            ticker: &str,
        ) -> Result<Fundamentals, MarketDataError> {
            self.fundamentals
                .clone()
                .ok_or_else(|| MarketDataError::NotFound(ticker.to_string()))
        }

        async fn get_analyst_consensus(
            &self,
            ticker: &str,
        ) -> Result<AnalystConsensus, MarketDataError> {
            self.consensus
                .clone()
                .ok_or_else(|| MarketDataError::NotFound(ticker.to_string()))
        }
    }

    fn uptrend(len: usize) -> Vec<f64> {
        (0..len).map(|i| 100.0 + i as f64 * 0.3).collect()
    }

    #[tokio::test]
    async fn assembles_the_full_battery() {
        let mut provider = MockMarketDataProvider::default()
            .with_series("AAPL", &uptrend(60))
            .with_series("^GSPC", &uptrend(60));
        provider.fundamentals = Some(Fundamentals {
            total_assets: Some(100.0),
            total_liabilities: Some(0.0),
            ..Default::default()
        });
        provider.consensus = Some(AnalystConsensus {
            recommendation: RecommendationKind::Buy,
            target_price: Some(200.0),
        });

        let service = RiskService::new(Arc::new(provider));
        let metrics = service.get_risk_metrics("AAPL").await.unwrap();

        assert_eq!(metrics.symbol, "AAPL");
        assert!(metrics.volatility > 0.0);
        assert!((1..=10).contains(&metrics.risk_score));
        assert_eq!(metrics.solvency.unwrap().zone, SolvencyZone::Safe);
    }

    #[tokio::test]
    async fn missing_history_degrades_to_neutral_not_error() {
        let provider = MockMarketDataProvider::default();
        let service = RiskService::new(Arc::new(provider));

        let metrics = service.get_risk_metrics("UNKNOWN").await.unwrap();
        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.beta, 1.0);
        assert_eq!(metrics.risk_score, 5);
        assert!(metrics.solvency.is_none());
    }

    #[tokio::test]
    async fn missing_benchmark_defaults_beta_to_market() {
        let provider = MockMarketDataProvider::default().with_series("AAPL", &uptrend(60));
        let service = RiskService::new(Arc::new(provider));

        let metrics = service.get_risk_metrics("AAPL").await.unwrap();
        assert_eq!(metrics.beta, 1.0);
        assert!(metrics.volatility > 0.0);
    }
}
