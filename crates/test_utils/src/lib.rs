//! Test Utilities Crate
//!
//! Shared test infrastructure for the Octave market-data test suite.
//!
//! # Modules
//!
//! - `database`: disposable PostgreSQL containers with the schema applied
//! - `fixtures`: builders and seeders for common test data
//!
//! Container-backed tests need a local Docker daemon; the crates that use
//! them gate those tests behind the `db-tests` cargo feature so the default
//! test run stays hermetic.

pub mod database;
pub mod fixtures;

pub use database::TestDatabase;
pub use fixtures::*;
