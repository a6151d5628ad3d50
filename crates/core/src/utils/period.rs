//! Closed enumeration of reporting periods.
//!
//! Replaces the loose "1M"/"3M"/"1Y" period strings with an explicit
//! mapping to month offsets.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    ThreeYears,
    FiveYears,
    All,
}

impl Period {
    /// Month offset of the period; `None` for `All`.
    pub fn months(&self) -> Option<u32> {
        match self {
            Period::OneMonth => Some(1),
            Period::ThreeMonths => Some(3),
            Period::SixMonths => Some(6),
            Period::OneYear => Some(12),
            Period::ThreeYears => Some(36),
            Period::FiveYears => Some(60),
            Period::All => None,
        }
    }

    /// Start date of the period ending at `today`; `None` for `All`.
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.months()
            .map(|months| today.checked_sub_months(Months::new(months)).unwrap_or(today))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::ThreeYears => "3Y",
            Period::FiveYears => "5Y",
            Period::All => "ALL",
        };
        f.write_str(label)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1M" => Ok(Period::OneMonth),
            "3M" => Ok(Period::ThreeMonths),
            "6M" => Ok(Period::SixMonths),
            "1Y" => Ok(Period::OneYear),
            "3Y" => Ok(Period::ThreeYears),
            "5Y" => Ok(Period::FiveYears),
            "ALL" => Ok(Period::All),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_offsets() {
        assert_eq!(Period::OneMonth.months(), Some(1));
        assert_eq!(Period::OneYear.months(), Some(12));
        assert_eq!(Period::All.months(), None);
    }

    #[test]
    fn start_date_subtracts_months() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(
            Period::SixMonths.start_date(today),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(Period::All.start_date(today), None);
    }

    #[test]
    fn parses_wire_labels() {
        assert_eq!("3M".parse::<Period>().unwrap(), Period::ThreeMonths);
        assert_eq!(Period::ThreeMonths.to_string(), "3M");
        assert!("2W".parse::<Period>().is_err());
    }
}
