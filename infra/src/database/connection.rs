//! Database connection pool management
//!
//! Builds the SQLx MySQL pool from [`DatabaseConfig`] with statement
//! logging, bounded acquisition, and connection recycling, and exposes a
//! health probe used by the HTTP surface.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use log::LevelFilter;
use std::str::FromStr;
use tracing::{error, info};

use tk_core::errors::{ControlError, ControlResult};
use tk_shared::config::DatabaseConfig;

/// MySQL connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a connection pool from configuration
    ///
    /// Connects eagerly so a bad URL or unreachable server fails at
    /// startup rather than on the first request.
    pub async fn new(config: &DatabaseConfig) -> ControlResult<Self> {
        info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| ControlError::Store {
                message: format!("invalid database URL: {}", e),
            })?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, config.slow_statement_duration());

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_duration())
            .max_lifetime(config.lifetime_duration())
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!(%e, "failed to create database pool");
                ControlError::Store {
                    message: format!("failed to connect to database: {}", e),
                }
            })?;

        info!("database connection pool created");
        Ok(Self { pool })
    }

    /// Reference to the underlying SQLx pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verify connectivity with a trivial round trip
    pub async fn health_check(&self) -> ControlResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ControlError::Store {
                message: format!("database health check failed: {}", e),
            })?;
        Ok(())
    }
}
