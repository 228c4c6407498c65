//! Stock record handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use infra_db::repositories::records;

use crate::dto::records::{CreateStockRecordRequest, StockRecordResponse};
use crate::error::ApiError;
use crate::AppState;

/// Creates a new daily stock record
///
/// The body is validated before a session is acquired; a request that fails
/// validation never touches the database. On success the response carries
/// the server-assigned id alongside the input fields.
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateStockRecordRequest>,
) -> Result<Json<StockRecordResponse>, ApiError> {
    request.validate()?;

    let mut conn = state.pool.acquire().await?;
    let row = records::insert(&mut conn, &request.into()).await?;

    Ok(Json(row.into()))
}

/// Gets a stock record by id
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StockRecordResponse>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let row = records::get(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock record"))?;

    Ok(Json(row.into()))
}
