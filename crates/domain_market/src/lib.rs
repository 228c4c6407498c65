//! Market Data Domain Logic
//!
//! This crate holds the pure domain logic for the Octave market-data API:
//! kline interval handling and OHLCV candle aggregation. It performs no I/O
//! and knows nothing about the database or the HTTP layer.
//!
//! # Example
//!
//! ```rust
//! use domain_market::{aggregate, Candle, Interval};
//! use chrono::NaiveDate;
//!
//! let daily = vec![
//!     Candle::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 10.0, 12.0, 9.0, 11.0, Some(100)),
//!     Candle::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 11.0, 13.0, 10.0, 12.5, Some(150)),
//! ];
//!
//! let weekly = aggregate(&daily, Interval::Week, 52);
//! assert_eq!(weekly.len(), 1);
//! assert_eq!(weekly[0].high, 13.0);
//! ```

pub mod interval;
pub mod kline;

pub use interval::{Interval, ParseIntervalError};
pub use kline::{aggregate, Candle};
