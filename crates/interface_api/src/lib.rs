//! HTTP API Layer
//!
//! This crate provides the REST API for the Octave market-data service using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource (stock records, stock profiles)
//! - **DTOs**: request/response transfer schemas with validation rules,
//!   decoupling the wire format from the row entities
//! - **Error Handling**: consistent JSON error responses
//!
//! Every handler follows the same single-pass request lifecycle: validate the
//! input schema, acquire a scoped database session, invoke the repository
//! operation, serialize the entity back through a response schema. The
//! session is released when its handle drops at the end of the handler. A
//! request that fails validation never acquires a session.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, records, stocks};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    // Health probes stay outside the versioned prefix
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let record_routes = Router::new()
        .route("/", post(records::create_record))
        .route("/:id", get(records::get_record));

    let stock_routes = Router::new()
        .route("/", get(stocks::list_stocks))
        .route("/search", get(stocks::search_stocks))
        .route("/compare", get(stocks::bulk_compare))
        .route("/:id", get(stocks::get_stock))
        .route("/:id/klines", get(stocks::get_klines))
        .route("/:id/related", get(stocks::get_related));

    let api_routes = Router::new()
        .nest("/records", record_routes)
        .nest("/stocks", stock_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
