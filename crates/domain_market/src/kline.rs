//! OHLCV candle aggregation
//!
//! Daily candles are stored one row per trading day; week, month, and year
//! views are derived by folding consecutive daily candles into buckets:
//!
//! - open: first candle in the bucket
//! - close: last candle in the bucket
//! - high / low: bucket max / min
//! - volume: bucket sum
//! - date: first trading day in the bucket
//!
//! Results are returned newest-first, truncated to the requested limit.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// A single OHLCV candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
}

impl Candle {
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<i64>,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Grouping key for a date under the given interval
///
/// Week buckets use the ISO week calendar, so a week spanning a year
/// boundary keys on the ISO year (e.g. "2024-W01" may include late-December
/// dates).
fn group_key(date: NaiveDate, interval: Interval) -> String {
    match interval {
        Interval::Day => date.to_string(),
        Interval::Week => {
            let iso = date.iso_week();
            format!("{}-W{:02}", iso.year(), iso.week())
        }
        Interval::Month => format!("{}-{:02}", date.year(), date.month()),
        Interval::Year => date.year().to_string(),
    }
}

/// Aggregates ascending daily candles into interval buckets
///
/// # Arguments
///
/// * `daily` - Daily candles in ascending date order
/// * `interval` - Target granularity
/// * `limit` - Maximum number of candles to return
///
/// # Returns
///
/// At most `limit` candles, newest-first. For [`Interval::Day`] this is the
/// newest `limit` daily candles reversed; other intervals are bucketed per
/// the module rules before the cut.
pub fn aggregate(daily: &[Candle], interval: Interval, limit: usize) -> Vec<Candle> {
    if interval == Interval::Day {
        let start = daily.len().saturating_sub(limit);
        return daily[start..].iter().rev().cloned().collect();
    }

    // Insertion-ordered buckets; input is ascending so each bucket sees its
    // days in order.
    let mut buckets: Vec<(String, Candle)> = Vec::new();
    for candle in daily {
        let key = group_key(candle.date, interval);
        match buckets.last_mut() {
            Some((last_key, bucket)) if *last_key == key => {
                bucket.high = bucket.high.max(candle.high);
                bucket.low = bucket.low.min(candle.low);
                bucket.close = candle.close;
                bucket.volume = match (bucket.volume, candle.volume) {
                    (Some(a), Some(b)) => Some(a + b),
                    (Some(a), None) => Some(a),
                    (None, b) => b,
                };
            }
            _ => buckets.push((key, candle.clone())),
        }
    }

    buckets
        .into_iter()
        .rev()
        .take(limit)
        .map(|(_, candle)| candle)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn candle(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, vol: i64) -> Candle {
        Candle::new(date, open, high, low, close, Some(vol))
    }

    #[test]
    fn test_daily_returns_newest_first_with_limit() {
        let daily = vec![
            candle(day(2024, 1, 2), 1.0, 2.0, 0.5, 1.5, 10),
            candle(day(2024, 1, 3), 1.5, 2.5, 1.0, 2.0, 20),
            candle(day(2024, 1, 4), 2.0, 3.0, 1.5, 2.5, 30),
        ];

        let out = aggregate(&daily, Interval::Day, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date, day(2024, 1, 4));
        assert_eq!(out[1].date, day(2024, 1, 3));
    }

    #[test]
    fn test_weekly_bucket_rules() {
        // 2024-01-01 (Mon) through 2024-01-08 (next Mon): two ISO weeks
        let daily = vec![
            candle(day(2024, 1, 1), 10.0, 12.0, 9.0, 11.0, 100),
            candle(day(2024, 1, 3), 11.0, 15.0, 10.5, 14.0, 200),
            candle(day(2024, 1, 5), 14.0, 14.5, 8.0, 9.0, 300),
            candle(day(2024, 1, 8), 9.0, 10.0, 8.5, 9.5, 50),
        ];

        let out = aggregate(&daily, Interval::Week, 52);
        assert_eq!(out.len(), 2);

        // Newest week first
        assert_eq!(out[0].date, day(2024, 1, 8));

        let first_week = &out[1];
        assert_eq!(first_week.date, day(2024, 1, 1));
        assert_eq!(first_week.open, 10.0);
        assert_eq!(first_week.close, 9.0);
        assert_eq!(first_week.high, 15.0);
        assert_eq!(first_week.low, 8.0);
        assert_eq!(first_week.volume, Some(600));
    }

    #[test]
    fn test_monthly_and_yearly_keys() {
        let daily = vec![
            candle(day(2023, 12, 29), 1.0, 1.0, 1.0, 1.0, 1),
            candle(day(2024, 1, 2), 2.0, 2.0, 2.0, 2.0, 1),
            candle(day(2024, 2, 1), 3.0, 3.0, 3.0, 3.0, 1),
        ];

        let monthly = aggregate(&daily, Interval::Month, 12);
        assert_eq!(monthly.len(), 3);

        let yearly = aggregate(&daily, Interval::Year, 10);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly[0].date, day(2024, 1, 2));
        assert_eq!(yearly[0].close, 3.0);
        assert_eq!(yearly[1].close, 1.0);
    }

    #[test]
    fn test_missing_volume_does_not_poison_sum() {
        let daily = vec![
            Candle::new(day(2024, 3, 4), 1.0, 2.0, 1.0, 2.0, None),
            candle(day(2024, 3, 5), 2.0, 3.0, 2.0, 3.0, 40),
        ];

        let out = aggregate(&daily, Interval::Week, 1);
        assert_eq!(out[0].volume, Some(40));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], Interval::Week, 52).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_candles() -> impl Strategy<Value = Vec<Candle>> {
            prop::collection::vec((0u32..730, 1.0f64..1000.0, 0.0f64..500.0, 0i64..100_000), 1..60)
                .prop_map(|rows| {
                    let base = day(2023, 1, 2);
                    let mut out: Vec<Candle> = rows
                        .into_iter()
                        .map(|(offset, mid, spread, vol)| {
                            let date = base + chrono::Days::new(offset as u64);
                            candle(date, mid, mid + spread, (mid - spread).max(0.0), mid, vol)
                        })
                        .collect();
                    out.sort_by_key(|c| c.date);
                    out.dedup_by_key(|c| c.date);
                    out
                })
        }

        proptest! {
            #[test]
            fn aggregated_high_bounds_every_member(daily in arb_candles()) {
                let out = aggregate(&daily, Interval::Month, usize::MAX);
                for bucket in &out {
                    let key = group_key(bucket.date, Interval::Month);
                    for c in daily.iter().filter(|c| group_key(c.date, Interval::Month) == key) {
                        prop_assert!(bucket.high >= c.high);
                        prop_assert!(bucket.low <= c.low);
                    }
                }
            }

            #[test]
            fn bucket_count_never_exceeds_input(daily in arb_candles()) {
                for interval in [Interval::Week, Interval::Month, Interval::Year] {
                    let out = aggregate(&daily, interval, usize::MAX);
                    prop_assert!(out.len() <= daily.len());
                }
            }

            #[test]
            fn limit_is_respected(daily in arb_candles(), limit in 0usize..10) {
                for interval in [Interval::Day, Interval::Week, Interval::Month, Interval::Year] {
                    prop_assert!(aggregate(&daily, interval, limit).len() <= limit);
                }
            }
        }
    }
}
