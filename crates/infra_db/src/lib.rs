//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the Octave market-data
//! API: connection pool management, row entities, and repository functions
//! over PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! Repositories are free async functions that take an explicit
//! `&mut PgConnection` session handle. The caller (normally a request
//! handler) acquires the session from the pool, passes it through the
//! operation, and releases it by letting the handle drop at end of scope.
//! This makes the session lifetime visible at the call site instead of
//! hiding it inside a repository object.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, repositories::records};
//!
//! let pool = create_pool(DatabaseConfig::from_env()?).await?;
//! let mut conn = pool.acquire().await?;
//! let row = records::get(&mut conn, 42).await?;
//! ```

pub mod entities;
pub mod error;
pub mod pool;
pub mod repositories;

pub use entities::{NewStockRecord, StockRecordRow, StockRow};
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
