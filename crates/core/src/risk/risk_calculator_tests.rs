#[cfg(test)]
mod tests {
    use crate::market_data::{AnalystConsensus, Fundamentals, RecommendationKind};
    use crate::risk::risk_calculator::{
        altman_z_score, beta, composite_risk_score, compute_risk_metrics, daily_returns,
        max_drawdown, sharpe_ratio, sortino_ratio, var_95, volatility,
    };
    use crate::risk::risk_model::SolvencyZone;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn daily_returns_skip_zero_price_transitions() {
        let returns = daily_returns(&[100.0, 0.0, 50.0]);
        // 100 -> 0 is a valid -100% return; 0 -> 50 is skipped.
        assert_eq!(returns, vec![-1.0]);
    }

    #[test]
    fn volatility_of_degenerate_series_is_zero() {
        assert_eq!(volatility(&[]), 0.0);
        assert_eq!(volatility(&[0.01]), 0.0);
    }

    #[test]
    fn volatility_is_annualized_sample_std_in_percent() {
        // Returns with sample std 0.02: deviations +-0.02 around mean 0.001.
        let returns = [0.021, -0.019, 0.021, -0.019, 0.001];
        assert_close(volatility(&returns), 0.02 * 252f64.sqrt() * 100.0, 1e-9);
    }

    #[test]
    fn sharpe_is_zero_when_volatility_is_zero() {
        assert_eq!(sharpe_ratio(&[0.01, 0.01, 0.01]), 0.0);
        assert_eq!(sharpe_ratio(&[]), 0.0);
    }

    #[test]
    fn sharpe_uses_annualized_mean_minus_risk_free() {
        let returns = [0.021, -0.019, 0.021, -0.019, 0.001];
        let expected = (0.001 * 252.0 - 0.05) / (0.02 * 252f64.sqrt());
        assert_close(sharpe_ratio(&returns), expected, 1e-9);
    }

    #[test]
    fn sortino_sentinel_for_no_downside() {
        assert_eq!(sortino_ratio(&[0.01, 0.0, 0.02]), 3.0);
        assert_eq!(sortino_ratio(&[]), 3.0);
    }

    #[test]
    fn sortino_uses_downside_deviation_only() {
        let returns = [0.02, -0.01, 0.03, -0.02];
        let downside = ((0.01f64.powi(2) + 0.02f64.powi(2)) / 2.0).sqrt() * 252f64.sqrt();
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let expected = (mean * 252.0 - 0.05) / downside;
        assert_close(sortino_ratio(&returns), expected, 1e-9);
    }

    #[test]
    fn max_drawdown_example() {
        let stats = max_drawdown(&[100.0, 120.0, 90.0, 95.0, 130.0]);
        assert_close(stats.max_drawdown, 25.0, 1e-9);
        assert_eq!(stats.peak_index, 1);
        assert_eq!(stats.trough_index, 2);
    }

    #[test]
    fn max_drawdown_of_rising_series_is_zero() {
        let stats = max_drawdown(&[100.0, 110.0, 120.0]);
        assert_eq!(stats.max_drawdown, 0.0);
    }

    #[test]
    fn max_drawdown_of_short_series_is_zero() {
        assert_eq!(max_drawdown(&[]).max_drawdown, 0.0);
        assert_eq!(max_drawdown(&[100.0]).max_drawdown, 0.0);
    }

    #[test]
    fn beta_of_identical_series_is_one() {
        let returns = [0.01, -0.02, 0.015, 0.005];
        assert_close(beta(&returns, &returns), 1.0, 1e-9);
    }

    #[test]
    fn beta_scales_with_amplified_returns() {
        let benchmark = [0.01, -0.02, 0.015, 0.005];
        let instrument: Vec<f64> = benchmark.iter().map(|r| r * 2.0).collect();
        assert_close(beta(&instrument, &benchmark), 2.0, 1e-9);
    }

    #[test]
    fn beta_right_aligns_mismatched_windows() {
        let instrument = [0.01, 0.02, -0.01];
        // Extra old benchmark history must be ignored.
        let benchmark = [0.5, -0.3, 0.01, 0.02, -0.01];
        assert_close(beta(&instrument, &benchmark), 1.0, 1e-9);
    }

    #[test]
    fn beta_defaults_to_market() {
        // Too short.
        assert_eq!(beta(&[0.01], &[0.01]), 1.0);
        assert_eq!(beta(&[], &[0.01, 0.02]), 1.0);
        // Flat benchmark has zero variance.
        assert_eq!(beta(&[0.01, -0.02, 0.03], &[0.01, 0.01, 0.01]), 1.0);
    }

    #[test]
    fn var_example() {
        // Mean 0.001, sample std 0.02 => (0.001 - 1.645*0.02)*100 = -3.19.
        let returns = [0.021, -0.019, 0.021, -0.019, 0.001];
        assert_close(var_95(&returns), -3.19, 1e-9);
    }

    #[test]
    fn var_of_degenerate_series_is_zero() {
        assert_eq!(var_95(&[]), 0.0);
        assert_eq!(var_95(&[0.01]), 0.0);
    }

    #[test]
    fn altman_z_zones() {
        let distress = Fundamentals {
            total_assets: Some(100.0),
            total_liabilities: Some(50.0),
            working_capital: Some(5.0),
            retained_earnings: Some(5.0),
            ebit: Some(5.0),
            market_cap: Some(10.0),
            revenue: Some(50.0),
            ..Default::default()
        };
        let verdict = altman_z_score(&distress).unwrap();
        assert_close(verdict.z_score, 0.915, 1e-9);
        assert_eq!(verdict.zone, SolvencyZone::Distress);

        let safe = Fundamentals {
            market_cap: Some(200.0),
            ..distress.clone()
        };
        let verdict = altman_z_score(&safe).unwrap();
        assert!(verdict.z_score >= 3.0);
        assert_eq!(verdict.zone, SolvencyZone::Safe);
    }

    #[test]
    fn altman_z_no_debt_is_automatically_safe() {
        let fundamentals = Fundamentals {
            total_assets: Some(100.0),
            total_liabilities: Some(0.0),
            ..Default::default()
        };
        let verdict = altman_z_score(&fundamentals).unwrap();
        assert_eq!(verdict.z_score, 10.0);
        assert_eq!(verdict.zone, SolvencyZone::Safe);
    }

    #[test]
    fn altman_z_indeterminate_without_assets() {
        let fundamentals = Fundamentals {
            total_assets: Some(0.0),
            total_liabilities: Some(10.0),
            ..Default::default()
        };
        assert!(altman_z_score(&fundamentals).is_none());
        assert!(altman_z_score(&Fundamentals::default()).is_none());
    }

    #[test]
    fn neutral_inputs_score_five() {
        // Every band is inside its neutral window; no fundamentals.
        assert_eq!(composite_risk_score(20.0, 15.0, 1.0, 0.5, None, None, None), 5);
    }

    #[test]
    fn high_risk_statistics_clamp_at_ten() {
        // +2 vol, +2 drawdown, +1 beta, +1 sharpe = 11, clamped.
        assert_eq!(composite_risk_score(45.0, 35.0, 1.6, -0.5, None, None, None), 10);
    }

    #[test]
    fn quality_and_sentiment_bonuses_clamp_at_one() {
        let fundamentals = Fundamentals {
            market_cap: Some(250e9),
            trailing_pe: Some(25.0),
            total_cash: Some(100e9),
            total_debt: Some(50e9),
            free_cash_flow: Some(10e9),
            revenue_growth: Some(0.2),
            ..Default::default()
        };
        let consensus = AnalystConsensus {
            recommendation: RecommendationKind::StrongBuy,
            target_price: Some(150.0),
        };
        // -1 vol, -1 drawdown, -1 beta, -1 sharpe, -7 bonuses from 5.
        let score = composite_risk_score(
            10.0,
            5.0,
            0.4,
            2.0,
            Some(&fundamentals),
            Some(&consensus),
            Some(100.0),
        );
        assert_eq!(score, 1);
    }

    #[test]
    fn large_cap_band_is_exclusive_of_mega_cap() {
        let large = Fundamentals {
            market_cap: Some(50e9),
            ..Default::default()
        };
        let mega = Fundamentals {
            market_cap: Some(250e9),
            ..Default::default()
        };
        let base = composite_risk_score(20.0, 15.0, 1.0, 0.5, None, None, None);
        let with_large = composite_risk_score(20.0, 15.0, 1.0, 0.5, Some(&large), None, None);
        let with_mega = composite_risk_score(20.0, 15.0, 1.0, 0.5, Some(&mega), None, None);
        assert_eq!(base - with_large, 1);
        assert_eq!(base - with_mega, 2);
    }

    #[test]
    fn target_upside_bonus_requires_ten_percent() {
        let consensus = AnalystConsensus {
            recommendation: RecommendationKind::Hold,
            target_price: Some(105.0),
        };
        // 5% upside: no bonus.
        assert_eq!(
            composite_risk_score(20.0, 15.0, 1.0, 0.5, None, Some(&consensus), Some(100.0)),
            5
        );
        let consensus = AnalystConsensus {
            recommendation: RecommendationKind::Hold,
            target_price: Some(115.0),
        };
        assert_eq!(
            composite_risk_score(20.0, 15.0, 1.0, 0.5, None, Some(&consensus), Some(100.0)),
            4
        );
    }

    #[test]
    fn short_history_yields_neutral_battery() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let metrics = compute_risk_metrics("AAPL", &prices, None, None, None);
        assert_eq!(metrics.volatility, 0.0);
        assert_eq!(metrics.beta, 1.0);
        assert_eq!(metrics.risk_score, 5);
        assert!(metrics.solvency.is_none());
    }

    #[test]
    fn short_history_still_derives_solvency_from_fundamentals() {
        let fundamentals = Fundamentals {
            total_assets: Some(100.0),
            total_liabilities: Some(0.0),
            ..Default::default()
        };
        let metrics = compute_risk_metrics("AAPL", &[], None, Some(&fundamentals), None);
        assert_eq!(metrics.risk_score, 5);
        assert_eq!(metrics.solvency.unwrap().zone, SolvencyZone::Safe);
    }

    #[test]
    fn full_battery_over_a_real_series() {
        // 40 closes, mild uptrend with a dip.
        let mut prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.5).collect();
        prices[20] = 95.0;
        let benchmark: Vec<f64> = (0..40).map(|i| 200.0 + i as f64 * 0.4).collect();

        let metrics = compute_risk_metrics("AAPL", &prices, Some(&benchmark), None, None);
        assert!(metrics.volatility > 0.0);
        assert!(metrics.max_drawdown > 0.0);
        assert!((1..=10).contains(&metrics.risk_score));
        assert!(metrics.var_95 < 0.0);
    }

    proptest! {
        #[test]
        fn volatility_is_never_negative(returns in proptest::collection::vec(-0.5f64..0.5, 0..100)) {
            prop_assert!(volatility(&returns) >= 0.0);
        }

        #[test]
        fn score_is_always_in_bounds(
            vol in -10.0f64..200.0,
            drawdown in -10.0f64..150.0,
            beta_value in -3.0f64..5.0,
            sharpe in -5.0f64..5.0,
            market_cap in proptest::option::of(0.0f64..1e13),
            growth in proptest::option::of(-1.0f64..3.0),
        ) {
            let fundamentals = Fundamentals {
                market_cap,
                revenue_growth: growth,
                ..Default::default()
            };
            let score = composite_risk_score(
                vol,
                drawdown,
                beta_value,
                sharpe,
                Some(&fundamentals),
                None,
                None,
            );
            prop_assert!((1..=10).contains(&score));
        }

        #[test]
        fn sortino_of_non_negative_series_is_sentinel(
            returns in proptest::collection::vec(0.0f64..0.5, 0..50)
        ) {
            prop_assert_eq!(sortino_ratio(&returns), 3.0);
        }
    }
}
