//! Cache configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Number of connection attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Default TTL for cached entries in seconds, 0 disables expiry
    #[serde(default)]
    pub default_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            default_ttl: 0,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let max_retries = std::env::var("REDIS_MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .unwrap_or_else(|_| default_max_retries());
        let default_ttl = std::env::var("CACHE_DEFAULT_TTL")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .unwrap_or(0);

        Self {
            url,
            max_retries,
            default_ttl,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the default entry TTL
    pub fn with_default_ttl(mut self, seconds: u64) -> Self {
        self.default_ttl = seconds;
        self
    }

    /// Initial retry delay as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.default_ttl, 0);
    }

    #[test]
    fn test_with_default_ttl() {
        let config = CacheConfig::new("redis://cache:6379").with_default_ttl(3600);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.retry_delay(), Duration::from_millis(500));
    }
}
