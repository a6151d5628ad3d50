//! Pure risk statistics over a daily close-price series.
//!
//! Everything here is synchronous, allocation-light f64 arithmetic: it runs
//! inside batch loops and must never suspend. Insufficient history yields
//! neutral defaults rather than errors, since risk scoring must always
//! return something displayable.

use crate::constants::{
    MIN_HISTORY_POINTS, NEUTRAL_RISK_SCORE, RISK_FREE_RATE, SORTINO_NO_DOWNSIDE,
    TRADING_DAYS_PER_YEAR, VAR_95_Z,
};
use crate::market_data::{AnalystConsensus, Fundamentals};
use crate::risk::risk_model::{DrawdownStats, RiskMetrics, SolvencyVerdict, SolvencyZone};

/// Simple daily returns `(p_i - p_{i-1}) / p_{i-1}`, skipping transitions
/// from a zero price.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample standard deviation; fewer than 2 values yields 0.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Annualized volatility of daily returns, as a percentage.
pub fn volatility(returns: &[f64]) -> f64 {
    sample_std(returns) * TRADING_DAYS_PER_YEAR.sqrt() * 100.0
}

/// Sharpe ratio over annualized mean return and volatility.
/// Zero volatility yields 0.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    let annualized_vol = sample_std(returns) * TRADING_DAYS_PER_YEAR.sqrt();
    if annualized_vol == 0.0 {
        return 0.0;
    }
    let annualized_mean = mean(returns) * TRADING_DAYS_PER_YEAR;
    (annualized_mean - RISK_FREE_RATE) / annualized_vol
}

/// Sortino ratio: same numerator as Sharpe, downside deviation denominator.
///
/// A series with no negative returns yields the fixed sentinel 3 ("excellent,
/// no downside observed"), not a division artifact.
pub fn sortino_ratio(returns: &[f64]) -> f64 {
    let negatives: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if negatives.is_empty() {
        return SORTINO_NO_DOWNSIDE;
    }
    let downside_deviation =
        (negatives.iter().map(|r| r * r).sum::<f64>() / negatives.len() as f64).sqrt()
            * TRADING_DAYS_PER_YEAR.sqrt();
    if downside_deviation == 0.0 {
        return 0.0;
    }
    let annualized_mean = mean(returns) * TRADING_DAYS_PER_YEAR;
    (annualized_mean - RISK_FREE_RATE) / downside_deviation
}

/// Maximum drawdown in a single forward pass tracking the running peak.
pub fn max_drawdown(prices: &[f64]) -> DrawdownStats {
    if prices.len() < 2 {
        return DrawdownStats::ZERO;
    }

    let mut peak = prices[0];
    let mut peak_index = 0usize;
    let mut stats = DrawdownStats::ZERO;

    for (i, price) in prices.iter().enumerate() {
        if *price > peak {
            peak = *price;
            peak_index = i;
        }
        if peak > 0.0 {
            let drawdown = (peak - price) / peak;
            if drawdown > stats.max_drawdown {
                stats = DrawdownStats {
                    max_drawdown: drawdown,
                    peak_index,
                    trough_index: i,
                };
            }
        }
    }

    DrawdownStats {
        max_drawdown: stats.max_drawdown * 100.0,
        ..stats
    }
}

/// Beta of instrument returns against benchmark returns over equal-length,
/// right-aligned (most-recent) windows. Defaults to market beta 1.0 when the
/// windows are too short or benchmark variance is zero.
pub fn beta(returns: &[f64], benchmark_returns: &[f64]) -> f64 {
    let n = returns.len().min(benchmark_returns.len());
    if n < 2 {
        return 1.0;
    }
    let instrument = &returns[returns.len() - n..];
    let benchmark = &benchmark_returns[benchmark_returns.len() - n..];

    let mean_i = mean(instrument);
    let mean_b = mean(benchmark);

    let mut covariance = 0.0;
    let mut benchmark_variance = 0.0;
    for k in 0..n {
        covariance += (instrument[k] - mean_i) * (benchmark[k] - mean_b);
        benchmark_variance += (benchmark[k] - mean_b) * (benchmark[k] - mean_b);
    }

    if benchmark_variance == 0.0 {
        return 1.0;
    }
    covariance / benchmark_variance
}

/// Parametric 95% daily VaR: `mean - 1.645 * std`, as a percentage.
/// Fewer than 2 returns yields 0.
pub fn var_95(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    (mean(returns) - VAR_95_Z * sample_std(returns)) * 100.0
}

/// Altman-Z solvency score from approximate fundamentals:
/// `Z = 1.2A + 1.4B + 3.3C + 0.6D + 1.0E` with `D = marketCap / totalLiabilities`.
///
/// Zero or negative total assets leave the verdict indeterminate. A company
/// with no liabilities is automatically safe (sentinel Z = 10).
pub fn altman_z_score(fundamentals: &Fundamentals) -> Option<SolvencyVerdict> {
    let total_assets = fundamentals.total_assets.unwrap_or(0.0);
    if total_assets <= 0.0 {
        return None;
    }

    let total_liabilities = fundamentals.total_liabilities.unwrap_or(0.0);
    if total_liabilities <= 0.0 {
        return Some(SolvencyVerdict {
            z_score: 10.0,
            zone: SolvencyZone::Safe,
            label: SolvencyZone::Safe.label().to_string(),
        });
    }

    let a = fundamentals.working_capital.unwrap_or(0.0) / total_assets;
    let b = fundamentals.retained_earnings.unwrap_or(0.0) / total_assets;
    let c = fundamentals.ebit.unwrap_or(0.0) / total_assets;
    let d = fundamentals.market_cap.unwrap_or(0.0) / total_liabilities;
    let e = fundamentals.revenue.unwrap_or(0.0) / total_assets;

    let z = 1.2 * a + 1.4 * b + 3.3 * c + 0.6 * d + 1.0 * e;

    let zone = if z >= 3.0 {
        SolvencyZone::Safe
    } else if z >= 1.8 {
        SolvencyZone::Grey
    } else {
        SolvencyZone::Distress
    };

    Some(SolvencyVerdict {
        z_score: z,
        zone,
        label: zone.label().to_string(),
    })
}

/// Composite 1-10 risk score.
///
/// Starts neutral at 5, adds statistical risk, subtracts quality and
/// sentiment bonuses, clamps to [1, 10]. Band thresholds and their order
/// are fixed; historical scores depend on them.
pub fn composite_risk_score(
    volatility_pct: f64,
    max_drawdown_pct: f64,
    beta_value: f64,
    sharpe: f64,
    fundamentals: Option<&Fundamentals>,
    consensus: Option<&AnalystConsensus>,
    last_price: Option<f64>,
) -> u8 {
    let mut score = NEUTRAL_RISK_SCORE;

    if volatility_pct > 40.0 {
        score += 2;
    } else if volatility_pct > 25.0 {
        score += 1;
    } else if volatility_pct < 15.0 {
        score -= 1;
    }

    if max_drawdown_pct > 30.0 {
        score += 2;
    } else if max_drawdown_pct > 20.0 {
        score += 1;
    } else if max_drawdown_pct < 10.0 {
        score -= 1;
    }

    if beta_value > 1.5 {
        score += 1;
    } else if beta_value < 0.5 {
        score -= 1;
    }

    if sharpe < 0.0 {
        score += 1;
    } else if sharpe > 1.5 {
        score -= 1;
    }

    if let Some(f) = fundamentals {
        if let Some(market_cap) = f.market_cap {
            if market_cap >= 200e9 {
                score -= 2;
            } else if market_cap >= 10e9 {
                score -= 1;
            }
        }
        if let Some(pe) = f.trailing_pe {
            if pe > 0.0 && pe < 200.0 {
                score -= 1;
            }
        }
        if let (Some(cash), Some(debt)) = (f.total_cash, f.total_debt) {
            if cash > debt {
                score -= 1;
            }
        }
        if let Some(fcf) = f.free_cash_flow {
            if fcf > 0.0 {
                score -= 1;
            }
        }
        if let Some(growth) = f.revenue_growth {
            if growth > 0.15 {
                score -= 1;
            }
        }
    }

    if let Some(c) = consensus {
        if c.recommendation.is_bullish() {
            score -= 1;
        }
        if let (Some(target), Some(price)) = (c.target_price, last_price) {
            if price > 0.0 && (target - price) / price > 0.10 {
                score -= 1;
            }
        }
    }

    score.clamp(1, 10) as u8
}

/// Assembles the full metrics battery for one instrument.
///
/// Fewer than [`MIN_HISTORY_POINTS`] closes yields the neutral battery
/// (zero statistics, beta 1.0, score 5); solvency is independent of price
/// history and is still derived when fundamentals are present.
pub fn compute_risk_metrics(
    symbol: &str,
    prices: &[f64],
    benchmark_prices: Option<&[f64]>,
    fundamentals: Option<&Fundamentals>,
    consensus: Option<&AnalystConsensus>,
) -> RiskMetrics {
    let solvency = fundamentals.and_then(altman_z_score);

    if prices.len() < MIN_HISTORY_POINTS {
        return RiskMetrics {
            symbol: symbol.to_string(),
            volatility: 0.0,
            sharpe_ratio: 0.0,
            sortino_ratio: 0.0,
            max_drawdown: 0.0,
            drawdown_peak_index: 0,
            drawdown_trough_index: 0,
            beta: 1.0,
            var_95: 0.0,
            risk_score: NEUTRAL_RISK_SCORE as u8,
            solvency,
        };
    }

    let returns = daily_returns(prices);
    let vol = volatility(&returns);
    let sharpe = sharpe_ratio(&returns);
    let sortino = sortino_ratio(&returns);
    let drawdown = max_drawdown(prices);
    let beta_value = benchmark_prices
        .map(|b| beta(&returns, &daily_returns(b)))
        .unwrap_or(1.0);
    let var = var_95(&returns);
    let score = composite_risk_score(
        vol,
        drawdown.max_drawdown,
        beta_value,
        sharpe,
        fundamentals,
        consensus,
        prices.last().copied(),
    );

    RiskMetrics {
        symbol: symbol.to_string(),
        volatility: vol,
        sharpe_ratio: sharpe,
        sortino_ratio: sortino,
        max_drawdown: drawdown.max_drawdown,
        drawdown_peak_index: drawdown.peak_index,
        drawdown_trough_index: drawdown.trough_index,
        beta: beta_value,
        var_95: var,
        risk_score: score,
        solvency,
    }
}
