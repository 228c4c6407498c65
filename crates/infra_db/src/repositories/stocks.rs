//! Stock profile repository
//!
//! Lookups over the `stocks` table: by id, paginated listing, and
//! case-insensitive search by symbol or company name.

use sqlx::PgConnection;

use crate::entities::StockRow;
use crate::error::DatabaseError;

const COLUMNS: &str = "id, symbol, name, exchange, currency, sector, industry, last_updated";

/// Fetches a stock profile by id; `Ok(None)` when absent
pub async fn get(conn: &mut PgConnection, id: i32) -> Result<Option<StockRow>, DatabaseError> {
    sqlx::query_as::<_, StockRow>(&format!(
        "SELECT {} FROM stocks WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}

/// Returns a page of stock profiles ordered by id
///
/// # Arguments
///
/// * `page` - 1-based page number
/// * `limit` - Page size
pub async fn list(
    conn: &mut PgConnection,
    page: u32,
    limit: u32,
) -> Result<Vec<StockRow>, DatabaseError> {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);

    sqlx::query_as::<_, StockRow>(&format!(
        "SELECT {} FROM stocks ORDER BY id OFFSET $1 LIMIT $2",
        COLUMNS
    ))
    .bind(offset)
    .bind(i64::from(limit))
    .fetch_all(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}

/// Fetches a stock profile by symbol, matched case-insensitively
pub async fn get_by_symbol(
    conn: &mut PgConnection,
    symbol: &str,
) -> Result<Option<StockRow>, DatabaseError> {
    sqlx::query_as::<_, StockRow>(&format!(
        "SELECT {} FROM stocks WHERE upper(symbol) = upper($1)",
        COLUMNS
    ))
    .bind(symbol.trim())
    .fetch_optional(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}

/// Returns up to `limit` other stocks in the same sector
///
/// `IS NOT DISTINCT FROM` makes a NULL sector match other NULL-sector
/// stocks rather than nothing.
pub async fn related(
    conn: &mut PgConnection,
    sector: Option<&str>,
    exclude_id: i32,
    limit: u32,
) -> Result<Vec<StockRow>, DatabaseError> {
    sqlx::query_as::<_, StockRow>(&format!(
        "SELECT {} FROM stocks WHERE sector IS NOT DISTINCT FROM $1 AND id <> $2 LIMIT $3",
        COLUMNS
    ))
    .bind(sector)
    .bind(exclude_id)
    .bind(i64::from(limit))
    .fetch_all(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}

/// Searches stocks by symbol or name using case-insensitive LIKE
///
/// Returns up to `limit` matching rows. The query string is wrapped in `%`
/// wildcards; LIKE metacharacters in user input widen the match rather than
/// escape it, same as the original behavior.
pub async fn search(
    conn: &mut PgConnection,
    query: &str,
    limit: u32,
) -> Result<Vec<StockRow>, DatabaseError> {
    let pattern = format!("%{}%", query);

    sqlx::query_as::<_, StockRow>(&format!(
        "SELECT {} FROM stocks WHERE symbol ILIKE $1 OR name ILIKE $1 LIMIT $2",
        COLUMNS
    ))
    .bind(pattern)
    .bind(i64::from(limit))
    .fetch_all(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}

/// Inserts a bare stock profile for a symbol if it does not already exist
///
/// Used by the offline importer to register symbols seen in bulk data.
/// Returns the profile row whether it was inserted or already present.
pub async fn ensure_symbol(
    conn: &mut PgConnection,
    symbol: &str,
) -> Result<StockRow, DatabaseError> {
    sqlx::query_as::<_, StockRow>(&format!(
        r#"
        INSERT INTO stocks (symbol) VALUES ($1)
        ON CONFLICT (symbol) DO UPDATE SET symbol = EXCLUDED.symbol
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(symbol)
    .fetch_one(&mut *conn)
    .await
    .map_err(DatabaseError::from_sqlx)
}
