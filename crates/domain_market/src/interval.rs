//! Kline interval handling
//!
//! Clients request chart data at one of four granularities. Several alias
//! spellings are accepted for each ("1w", "weekly", "week"); the API layer
//! falls back to [`Interval::Day`] for anything unrecognized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an interval string matches no known alias
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kline interval: {0}")]
pub struct ParseIntervalError(pub String);

/// Aggregation granularity for kline data
///
/// Daily rows are the storage unit; the other intervals are aggregated from
/// daily rows at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One candle per trading day
    #[default]
    Day,
    /// One candle per ISO week
    Week,
    /// One candle per calendar month
    Month,
    /// One candle per calendar year
    Year,
}

impl Interval {
    /// Returns the canonical lowercase name ("day", "week", "month", "year")
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
            Interval::Year => "year",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1d" | "daily" | "day" => Ok(Interval::Day),
            "1w" | "weekly" | "week" => Ok(Interval::Week),
            "1m" | "monthly" | "month" => Ok(Interval::Month),
            "1y" | "yearly" | "year" => Ok(Interval::Year),
            other => Err(ParseIntervalError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_aliases() {
        for s in ["1d", "daily", "day", "DAY"] {
            assert_eq!(s.parse::<Interval>().unwrap(), Interval::Day);
        }
        for s in ["1w", "weekly", "week"] {
            assert_eq!(s.parse::<Interval>().unwrap(), Interval::Week);
        }
        for s in ["1m", "monthly", "month"] {
            assert_eq!(s.parse::<Interval>().unwrap(), Interval::Month);
        }
        for s in ["1y", "yearly", "year"] {
            assert_eq!(s.parse::<Interval>().unwrap(), Interval::Year);
        }
    }

    #[test]
    fn test_rejects_unknown_interval() {
        let err = "fortnight".parse::<Interval>().unwrap_err();
        assert_eq!(err, ParseIntervalError("fortnight".to_string()));
    }

    #[test]
    fn test_default_is_day() {
        assert_eq!(Interval::default(), Interval::Day);
    }

    #[test]
    fn test_display_round_trips() {
        for interval in [Interval::Day, Interval::Week, Interval::Month, Interval::Year] {
            assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
        }
    }
}
