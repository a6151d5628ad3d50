//! Pure per-day PnL arithmetic over pre-fetched price and FX series.
//!
//! The service layer fetches and caches series; everything here is a plain
//! function so the day math stays testable without any I/O.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::positions::Position;

/// ticker -> (date -> close), in the instrument's trade currency.
pub type CloseSeriesMap = HashMap<String, BTreeMap<NaiveDate, Decimal>>;

/// currency -> (date -> rate to the reporting currency).
pub type FxSeriesMap = HashMap<String, BTreeMap<NaiveDate, Decimal>>;

/// The trading-day axis for a portfolio: every date inside the range on
/// which *any* of its instruments has an observed close. Iterating the
/// returned set walks the days in chronological order.
pub fn trading_days(
    closes: &CloseSeriesMap,
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeSet<NaiveDate> {
    closes
        .values()
        .flat_map(|series| series.range(start..=end).map(|(date, _)| *date))
        .collect()
}

/// Rate from `currency` into the reporting currency on `date`, exact-match
/// only. The 1.0 fallback applies to the reporting currency itself and to
/// nothing else: a foreign currency with no observed rate yields `None`,
/// which the caller treats as a data-quality gap.
pub fn rate_for_currency(
    fx: &FxSeriesMap,
    currency: &str,
    reporting_currency: &str,
    date: NaiveDate,
) -> Option<Decimal> {
    if currency == reporting_currency {
        return Some(Decimal::ONE);
    }
    fx.get(currency)
        .and_then(|series| series.get(&date))
        .copied()
}

/// Unrealized PnL of the open positions on one trading day, in the
/// reporting currency:
/// `Σ(quantity·close·rate) − Σ(quantity·average_cost·rate)`.
///
/// A position whose close or FX rate is missing on that exact date (no
/// forward/backward fill) contributes zero for the day.
pub fn unrealized_pnl_for_day(
    positions: &HashMap<String, Position>,
    closes: &CloseSeriesMap,
    fx: &FxSeriesMap,
    reporting_currency: &str,
    date: NaiveDate,
) -> Decimal {
    let mut market_value = Decimal::ZERO;
    let mut cost_basis = Decimal::ZERO;

    for (ticker, position) in positions {
        let close = match closes.get(ticker).and_then(|series| series.get(&date)) {
            Some(close) => *close,
            None => {
                debug!(
                    "No close for {} on {}; position contributes zero that day",
                    ticker, date
                );
                continue;
            }
        };

        let rate = match rate_for_currency(fx, &position.currency, reporting_currency, date) {
            Some(rate) => rate,
            None => {
                warn!(
                    "No FX rate {}->{} on {}; {} contributes zero that day",
                    position.currency, reporting_currency, date, ticker
                );
                continue;
            }
        };

        market_value += position.quantity * close * rate;
        cost_basis += position.cost_basis() * rate;
    }

    market_value - cost_basis
}
