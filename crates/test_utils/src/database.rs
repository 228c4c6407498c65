//! Database Test Utilities
//!
//! Provides helpers for database testing: starts a disposable PostgreSQL
//! container, connects a pool to it, and applies the schema.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "octave_test";
const POSTGRES_PASSWORD: &str = "octave_test";
const POSTGRES_DB: &str = "octave_test";

/// A PostgreSQL test container with a connected pool and the schema applied
///
/// The container lives as long as this value; dropping it tears the
/// database down.
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub url: String,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container and applies the initial schema
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start, the pool cannot
    /// connect, or the schema fails to apply.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(5432).await?;

        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
        );

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        let db = Self {
            _container: container,
            url,
            pool,
        };

        db.init_schema().await?;

        Ok(db)
    }

    /// Applies the initial schema from the migrations file
    async fn init_schema(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let schema = include_str!("../../../migrations/0001_initial_schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }
}
