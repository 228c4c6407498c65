//! Stock profile and kline DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_market::Candle;
use infra_db::{StockRecordRow, StockRow};

/// Stock profile returned by list and detail endpoints
#[derive(Debug, Clone, Serialize)]
pub struct StockResponse {
    pub id: i32,
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<StockRow> for StockResponse {
    fn from(row: StockRow) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol,
            name: row.name,
            exchange: row.exchange,
            currency: row.currency,
            sector: row.sector,
            industry: row.industry,
            last_updated: row.last_updated,
        }
    }
}

/// Single result from the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StockSearchResult {
    pub id: i32,
    pub symbol: String,
    pub name: Option<String>,
    pub sector: Option<String>,
}

impl From<StockRow> for StockSearchResult {
    fn from(row: StockRow) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol,
            name: row.name,
            sector: row.sector,
        }
    }
}

/// Query parameters for the paginated stock list
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListParams {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl ListParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(10)
    }
}

/// Query parameters for stock search
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 1))]
    pub q: String,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

/// Summary of a related stock (same sector)
#[derive(Debug, Clone, Serialize)]
pub struct RelatedStockResponse {
    pub stock_id: i32,
    pub symbol: String,
    pub name: Option<String>,
    pub sector: Option<String>,
}

impl From<StockRow> for RelatedStockResponse {
    fn from(row: StockRow) -> Self {
        Self {
            stock_id: row.id,
            symbol: row.symbol,
            name: row.name,
            sector: row.sector,
        }
    }
}

/// Query parameters for the bulk compare endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompareQuery {
    /// Comma-separated stock symbols
    pub symbols: String,
    pub interval: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,
}

impl CompareQuery {
    /// Requested symbols, trimmed, empties dropped
    pub fn symbol_list(&self) -> Vec<&str> {
        self.symbols
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(52) as usize
    }
}

/// Kline bundle for one stock in a bulk comparison
#[derive(Debug, Clone, Serialize)]
pub struct BulkComparisonItem {
    pub stock_id: i32,
    pub symbol: String,
    pub klines: Vec<KlineData>,
}

/// Response wrapper for the bulk compare endpoint
#[derive(Debug, Clone, Serialize)]
pub struct BulkComparisonResponse {
    pub comparisons: Vec<BulkComparisonItem>,
}

/// Query parameters for the klines endpoint
///
/// An unrecognized interval string falls back to daily rather than being
/// rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KlineQuery {
    pub interval: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u32>,
}

impl KlineQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(500) as usize
    }
}

/// Single OHLCV candle on the wire
#[derive(Debug, Clone, Serialize)]
pub struct KlineData {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<Candle> for KlineData {
    fn from(candle: Candle) -> Self {
        Self {
            date: candle.date,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume.unwrap_or(0) as f64,
        }
    }
}

/// Response wrapper for a list of klines
#[derive(Debug, Clone, Serialize)]
pub struct KlineResponse {
    pub stock_id: i32,
    pub symbol: String,
    pub interval: String,
    pub klines: Vec<KlineData>,
}

/// Converts a daily record row into an aggregation candle
pub fn candle_from_row(row: &StockRecordRow) -> Candle {
    Candle::new(row.date, row.open, row.high, row.low, row.close, row.volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams {
            page: None,
            limit: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_list_params_bounds() {
        let params = ListParams {
            page: Some(0),
            limit: Some(500),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_search_params_require_query() {
        let params = SearchParams {
            q: String::new(),
            limit: None,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_compare_symbol_list_trims_and_drops_empties() {
        let query = CompareQuery {
            symbols: " GTCO , DANGCEM,, ".to_string(),
            interval: None,
            limit: None,
        };
        assert_eq!(query.symbol_list(), vec!["GTCO", "DANGCEM"]);
        assert_eq!(query.limit(), 52);
    }

    #[test]
    fn test_kline_data_defaults_missing_volume_to_zero() {
        let candle = Candle::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            1.0,
            2.0,
            0.5,
            1.5,
            None,
        );
        assert_eq!(KlineData::from(candle).volume, 0.0);
    }
}
