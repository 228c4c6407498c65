//! Stock record repository
//!
//! Database access for daily OHLCV records. Inserts run inside an explicit
//! transaction so the returned row always reflects a committed record.

use sqlx::{Connection, PgConnection};
use tracing::debug;

use crate::entities::{NewStockRecord, StockRecordRow};
use crate::error::DatabaseError;

/// Inserts a new stock record and returns the persisted row
///
/// The row is written and committed inside a transaction; the returned
/// entity carries the server-assigned id, which the database generates
/// exactly once. Concurrent inserts therefore never observe the same id.
///
/// # Arguments
///
/// * `conn` - Session handle for this unit of work
/// * `record` - Validated field set to persist
///
/// # Errors
///
/// Returns `DatabaseError::DuplicateEntry` when a record for the same
/// (symbol, date) already exists.
pub async fn insert(
    conn: &mut PgConnection,
    record: &NewStockRecord,
) -> Result<StockRecordRow, DatabaseError> {
    let mut tx = conn.begin().await.map_err(DatabaseError::from_sqlx)?;

    let row = sqlx::query_as::<_, StockRecordRow>(
        r#"
        INSERT INTO stock_records (symbol, date, open, high, low, close, volume)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, symbol, date, open, high, low, close, volume
        "#,
    )
    .bind(&record.symbol)
    .bind(record.date)
    .bind(record.open)
    .bind(record.high)
    .bind(record.low)
    .bind(record.close)
    .bind(record.volume)
    .fetch_one(&mut *tx)
    .await
    .map_err(DatabaseError::from_sqlx)?;

    tx.commit().await.map_err(DatabaseError::from_sqlx)?;

    debug!(id = row.id, symbol = %row.symbol, date = %row.date, "Inserted stock record");
    Ok(row)
}

/// Fetches a stock record by id
///
/// Returns `Ok(None)` when no record exists; absence is a result, not an
/// error.
pub async fn get(
    conn: &mut PgConnection,
    id: i32,
) -> Result<Option<StockRecordRow>, DatabaseError> {
    sqlx::query_as::<_, StockRecordRow>(
        r#"
        SELECT id, symbol, date, open, high, low, close, volume
        FROM stock_records
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}

/// Fetches all daily records for a symbol in ascending date order
///
/// Ascending order is what the kline aggregation expects.
pub async fn daily_for_symbol(
    conn: &mut PgConnection,
    symbol: &str,
) -> Result<Vec<StockRecordRow>, DatabaseError> {
    sqlx::query_as::<_, StockRecordRow>(
        r#"
        SELECT id, symbol, date, open, high, low, close, volume
        FROM stock_records
        WHERE upper(symbol) = upper($1)
        ORDER BY date ASC
        "#,
    )
    .bind(symbol)
    .fetch_all(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}
