//! Offline stock data importer
//!
//! Loads historical OHLCV rows from a CSV export straight into the database,
//! bypassing the HTTP API. Expected headers (extra columns are ignored):
//!
//! ```text
//! Date,Price,Open,High,Low,Vol.,Change %,symbol,Name
//! ```
//!
//! `Price` is the close. Symbols may carry a `Stock\` export prefix, which is
//! stripped. Unseen symbols are registered in the `stocks` table before their
//! records are inserted. Rows commit in batches of 1000; a row that fails to
//! parse is skipped with a warning, and a duplicate (symbol, date) is counted
//! and left untouched.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run --bin import-stocks -- all_stocks.csv
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{Connection, PgConnection};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use infra_db::{create_pool, DatabaseConfig, NewStockRecord};

/// Rows per transaction
const BATCH_SIZE: usize = 1000;

/// One line of the CSV export, as raw text fields
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Price")]
    close: String,
    #[serde(rename = "Open")]
    open: String,
    #[serde(rename = "High")]
    high: String,
    #[serde(rename = "Low")]
    low: String,
    #[serde(rename = "Vol.")]
    volume: Option<String>,
    #[serde(rename = "symbol")]
    symbol: String,
}

/// Counters reported at the end of a run
#[derive(Debug, Default, PartialEq)]
struct ImportStats {
    inserted: u64,
    duplicates: u64,
    skipped: u64,
    symbols_registered: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "all_stocks.csv".to_string());

    info!(path = %path, "Starting stock import");

    let pool = create_pool(DatabaseConfig::from_env()?)
        .await
        .context("failed to create database pool")?;

    let mut conn = pool
        .acquire()
        .await
        .context("failed to acquire database session")?;

    let stats = import_file(Path::new(&path), &mut conn).await?;

    info!(
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        skipped = stats.skipped,
        symbols = stats.symbols_registered,
        "Import complete"
    );
    Ok(())
}

/// Streams the CSV file into the database in batched transactions
async fn import_file(path: &Path, conn: &mut PgConnection) -> anyhow::Result<ImportStats> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open CSV file {}", path.display()))?;

    let mut stats = ImportStats::default();
    let mut seen_symbols: HashSet<String> = HashSet::new();
    let mut batch: Vec<NewStockRecord> = Vec::with_capacity(BATCH_SIZE);

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line = line + 2, error = %e, "Skipping malformed CSV row");
                stats.skipped += 1;
                continue;
            }
        };

        let record = match parse_row(&row) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line + 2, error = %e, "Skipping unparseable row");
                stats.skipped += 1;
                continue;
            }
        };

        if seen_symbols.insert(record.symbol.clone()) {
            infra_db::repositories::stocks::ensure_symbol(conn, &record.symbol).await?;
            stats.symbols_registered += 1;
        }

        batch.push(record);
        if batch.len() >= BATCH_SIZE {
            flush_batch(conn, &mut batch, &mut stats).await?;
            info!(inserted = stats.inserted, "Imported records...");
        }
    }

    flush_batch(conn, &mut batch, &mut stats).await?;
    Ok(stats)
}

/// Writes one batch inside a transaction; duplicates are counted, not fatal
async fn flush_batch(
    conn: &mut PgConnection,
    batch: &mut Vec<NewStockRecord>,
    stats: &mut ImportStats,
) -> anyhow::Result<()> {
    if batch.is_empty() {
        return Ok(());
    }

    let mut tx = conn.begin().await?;
    for record in batch.iter() {
        let result = sqlx::query(
            r#"
            INSERT INTO stock_records (symbol, date, open, high, low, close, volume)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (symbol, date) DO NOTHING
            "#,
        )
        .bind(&record.symbol)
        .bind(record.date)
        .bind(record.open)
        .bind(record.high)
        .bind(record.low)
        .bind(record.close)
        .bind(record.volume)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            stats.duplicates += 1;
        } else {
            stats.inserted += 1;
        }
    }
    tx.commit().await?;

    batch.clear();
    Ok(())
}

/// Converts a raw CSV row into an insertable record
fn parse_row(row: &CsvRow) -> anyhow::Result<NewStockRecord> {
    Ok(NewStockRecord {
        symbol: clean_symbol(&row.symbol)?,
        date: parse_date(&row.date)?,
        open: parse_price(&row.open)?,
        high: parse_price(&row.high)?,
        low: parse_price(&row.low)?,
        close: parse_price(&row.close)?,
        volume: parse_volume(row.volume.as_deref()),
    })
}

/// Strips the `Stock\` export prefix and surrounding whitespace
fn clean_symbol(raw: &str) -> anyhow::Result<String> {
    let symbol = raw.trim().trim_start_matches("Stock\\").to_string();
    if symbol.is_empty() {
        anyhow::bail!("empty symbol");
    }
    Ok(symbol)
}

/// Accepts both date formats seen in the export
fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .with_context(|| format!("unrecognized date '{}'", raw))
}

/// Parses a price field, tolerating thousands separators
fn parse_price(raw: &str) -> anyhow::Result<f64> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .with_context(|| format!("unrecognized price '{}'", raw))
}

/// Parses a volume field like "243.19K" or "1.2M"; absent or dash means none
fn parse_volume(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "-" {
        return None;
    }

    let (digits, scale) = match raw.chars().last()? {
        'K' | 'k' => (&raw[..raw.len() - 1], 1_000.0),
        'M' | 'm' => (&raw[..raw.len() - 1], 1_000_000.0),
        'B' | 'b' => (&raw[..raw.len() - 1], 1_000_000_000.0),
        _ => (raw, 1.0),
    };

    digits
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .map(|v| (v * scale).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_symbol_strips_export_prefix() {
        assert_eq!(clean_symbol("Stock\\DANGCEM").unwrap(), "DANGCEM");
        assert_eq!(clean_symbol("  GTCO ").unwrap(), "GTCO");
        assert!(clean_symbol("Stock\\").is_err());
    }

    #[test]
    fn test_parse_date_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date("2024-01-31").unwrap(), expected);
        assert_eq!(parse_date("01/31/2024").unwrap(), expected);
        assert!(parse_date("31.01.2024").is_err());
    }

    #[test]
    fn test_parse_price_strips_separators() {
        assert_eq!(parse_price("1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_price(" 42 ").unwrap(), 42.0);
        assert!(parse_price("n/a").is_err());
    }

    #[test]
    fn test_parse_volume_scales_suffixes() {
        assert_eq!(parse_volume(Some("243.19K")), Some(243_190));
        assert_eq!(parse_volume(Some("1.2M")), Some(1_200_000));
        assert_eq!(parse_volume(Some("3B")), Some(3_000_000_000));
        assert_eq!(parse_volume(Some("1,500")), Some(1500));
        assert_eq!(parse_volume(Some("-")), None);
        assert_eq!(parse_volume(None), None);
    }

    #[test]
    fn test_parse_row_maps_price_to_close() {
        let row = CsvRow {
            date: "2024-01-31".to_string(),
            close: "101.50".to_string(),
            open: "100.00".to_string(),
            high: "102.00".to_string(),
            low: "99.00".to_string(),
            volume: Some("500K".to_string()),
            symbol: "Stock\\ZENITHBANK".to_string(),
        };

        let record = parse_row(&row).unwrap();
        assert_eq!(record.symbol, "ZENITHBANK");
        assert_eq!(record.close, 101.5);
        assert_eq!(record.open, 100.0);
        assert_eq!(record.volume, Some(500_000));
    }
}
