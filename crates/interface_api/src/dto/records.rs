//! Stock record DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use infra_db::{NewStockRecord, StockRecordRow};

/// Request body for creating a daily OHLCV record
///
/// Carries exactly the fields a client must supply; the identifier is
/// assigned by the storage layer. Prices are checked individually but not
/// against each other: exchange exports routinely contain rows where open
/// or close sits outside the [low, high] band, and the offline importer
/// accepts them, so the API does too.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStockRecordRequest {
    #[validate(length(min = 1, max = 20))]
    pub symbol: String,
    pub date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub open: f64,
    #[validate(range(min = 0.0))]
    pub high: f64,
    #[validate(range(min = 0.0))]
    pub low: f64,
    #[validate(range(min = 0.0))]
    pub close: f64,
    #[validate(range(min = 0))]
    pub volume: Option<i64>,
}

impl From<CreateStockRecordRequest> for NewStockRecord {
    fn from(req: CreateStockRecordRequest) -> Self {
        NewStockRecord {
            symbol: req.symbol,
            date: req.date,
            open: req.open,
            high: req.high,
            low: req.low,
            close: req.close,
            volume: req.volume,
        }
    }
}

/// Response for a single stock record, including the server-assigned id
#[derive(Debug, Clone, Serialize)]
pub struct StockRecordResponse {
    pub id: i32,
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
}

impl From<StockRecordRow> for StockRecordResponse {
    fn from(row: StockRecordRow) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol,
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}
