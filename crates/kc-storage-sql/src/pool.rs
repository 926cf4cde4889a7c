//! Connecting to the user store database.

use std::time::Duration;

use kc_storage::StorageError;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Where the user table lives and how many connections it may take.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections.
    pub max_connections: u32,
    /// How long to wait for a free connection.
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    /// Creates a configuration with 10 connections and a 30 second wait.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the maximum number of connections.
    #[must_use]
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Opens a pool and brings the user store schema up to date.
///
/// # Errors
///
/// Returns `StorageError::Connection` if the database is unreachable, or
/// `StorageError::Transaction` if a migration fails.
pub async fn connect(config: &PoolConfig) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!(max_connections = config.max_connections, "applying user store migrations");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| StorageError::Transaction(e.to_string()))?;

    Ok(pool)
}
