//! Stock profile and kline handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain_market::{aggregate, Candle, Interval};
use infra_db::repositories::{records, stocks};

use crate::dto::stocks::{
    candle_from_row, BulkComparisonItem, BulkComparisonResponse, CompareQuery, KlineData,
    KlineQuery, KlineResponse, ListParams, RelatedStockResponse, SearchParams, StockResponse,
    StockSearchResult,
};
use crate::error::ApiError;
use crate::AppState;

/// Returns a paginated list of stocks ordered by id
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<StockResponse>>, ApiError> {
    params.validate()?;

    let mut conn = state.pool.acquire().await?;
    let rows = stocks::list(&mut conn, params.page(), params.limit()).await?;

    Ok(Json(rows.into_iter().map(StockResponse::from).collect()))
}

/// Searches stocks by symbol or company name
pub async fn search_stocks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StockSearchResult>>, ApiError> {
    params.validate()?;

    let mut conn = state.pool.acquire().await?;
    let rows = stocks::search(&mut conn, &params.q, params.limit.unwrap_or(10)).await?;

    Ok(Json(rows.into_iter().map(StockSearchResult::from).collect()))
}

/// Returns a single stock profile by id
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockResponse>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let row = stocks::get(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock"))?;

    Ok(Json(row.into()))
}

/// Returns other stocks in the same sector as the given stock
pub async fn get_related(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RelatedStockResponse>>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let stock = stocks::get(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock"))?;

    let rows = stocks::related(&mut conn, stock.sector.as_deref(), stock.id, 10).await?;

    Ok(Json(rows.into_iter().map(RelatedStockResponse::from).collect()))
}

/// Fetches klines for multiple symbols in one request
///
/// Symbols that match no stock are skipped rather than failing the whole
/// request; an empty symbol list is rejected before any session is acquired.
pub async fn bulk_compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<BulkComparisonResponse>, ApiError> {
    query.validate()?;

    let symbols = query.symbol_list();
    if symbols.is_empty() {
        return Err(ApiError::BadRequest("No symbols provided".to_string()));
    }

    let interval = query
        .interval
        .as_deref()
        .map(|s| s.parse::<Interval>().unwrap_or_default())
        .unwrap_or(Interval::Week);

    let mut conn = state.pool.acquire().await?;
    let mut comparisons = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let Some(stock) = stocks::get_by_symbol(&mut conn, symbol).await? else {
            continue;
        };

        let rows = records::daily_for_symbol(&mut conn, &stock.symbol).await?;
        let daily: Vec<Candle> = rows.iter().map(candle_from_row).collect();
        let klines = aggregate(&daily, interval, query.limit())
            .into_iter()
            .map(KlineData::from)
            .collect();

        comparisons.push(BulkComparisonItem {
            stock_id: stock.id,
            symbol: stock.symbol.to_uppercase(),
            klines,
        });
    }

    Ok(Json(BulkComparisonResponse { comparisons }))
}

/// Returns aggregated OHLCV klines for a stock
///
/// Daily rows are fetched ascending and folded into the requested interval;
/// an unrecognized interval string falls back to daily.
pub async fn get_klines(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<KlineQuery>,
) -> Result<Json<KlineResponse>, ApiError> {
    query.validate()?;

    let interval = query
        .interval
        .as_deref()
        .map(|s| s.parse::<Interval>().unwrap_or_default())
        .unwrap_or_default();

    let mut conn = state.pool.acquire().await?;
    let stock = stocks::get(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock"))?;

    let rows = records::daily_for_symbol(&mut conn, &stock.symbol).await?;
    let daily: Vec<Candle> = rows.iter().map(candle_from_row).collect();
    let klines = aggregate(&daily, interval, query.limit())
        .into_iter()
        .map(KlineData::from)
        .collect();

    Ok(Json(KlineResponse {
        stock_id: stock.id,
        symbol: stock.symbol.to_uppercase(),
        interval: query.interval.unwrap_or_else(|| interval.to_string()),
        klines,
    }))
}
