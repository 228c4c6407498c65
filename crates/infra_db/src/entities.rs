//! Row entities
//!
//! In-process representations of database rows. These are storage-side
//! shapes only; the API layer maps them to transfer schemas and never
//! exposes them on the wire directly.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// One row of the `stocks` table: the static profile for a ticker
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StockRow {
    pub id: i32,
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// One row of the `stock_records` table: a daily OHLCV candle for a symbol
///
/// The id is assigned by the database at first successful persistence and
/// never changes afterwards. Rows are unique per (symbol, date).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StockRecordRow {
    pub id: i32,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
}

/// Field set for inserting a new stock record; no id, the database assigns it
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
}
