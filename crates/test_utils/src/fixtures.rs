//! Pre-built test data for common entities

use chrono::NaiveDate;
use sqlx::PgPool;

use infra_db::NewStockRecord;

/// Builds a plausible daily record for the given symbol and date
pub fn stock_record(symbol: &str, date: NaiveDate) -> NewStockRecord {
    NewStockRecord {
        symbol: symbol.to_string(),
        date,
        open: 100.0,
        high: 102.0,
        low: 99.0,
        close: 101.5,
        volume: Some(1_000_000),
    }
}

/// Shorthand for a test date
pub fn trading_day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Inserts a stock profile row and returns its id
pub async fn seed_stock(
    pool: &PgPool,
    symbol: &str,
    sector: Option<&str>,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO stocks (symbol, sector) VALUES ($1, $2) RETURNING id",
    )
    .bind(symbol)
    .bind(sector)
    .fetch_one(pool)
    .await
}
