//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection and cache behaviour
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `lock` - Distributed lock leases and acquisition timing
//! - `server` - HTTP server configuration

pub mod cache;
pub mod database;
pub mod environment;
pub mod lock;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use lock::LockConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Distributed lock configuration
    #[serde(default)]
    pub lock: LockConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            lock: LockConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Every section falls back to its defaults for variables that are
    /// unset or fail to parse, so a bare environment always yields a
    /// usable development configuration.
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            lock: LockConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_development() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 8080);
    }
}
