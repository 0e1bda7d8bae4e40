//! Distributed lock configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing configuration for distributed lock acquisition
///
/// The lease bounds how long a crashed holder can keep a key locked;
/// the acquire timeout bounds how long a caller waits for a contended
/// lock before the attempt is reported as unavailable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockConfig {
    /// Lease granted to a lock holder in milliseconds
    #[serde(default = "default_lease_ms")]
    pub lease_ms: u64,

    /// Maximum time to wait for a contended lock in milliseconds
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,

    /// Delay between acquisition attempts in milliseconds
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lease_ms: default_lease_ms(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            retry_interval_ms: default_retry_interval_ms(),
        }
    }
}

impl LockConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let lease_ms = std::env::var("LOCK_LEASE_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or_else(|_| default_lease_ms());
        let acquire_timeout_ms = std::env::var("LOCK_ACQUIRE_TIMEOUT_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or_else(|_| default_acquire_timeout_ms());
        let retry_interval_ms = std::env::var("LOCK_RETRY_INTERVAL_MS")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .unwrap_or_else(|_| default_retry_interval_ms());

        Self {
            lease_ms,
            acquire_timeout_ms,
            retry_interval_ms,
        }
    }

    /// Lock lease as a [`Duration`]
    pub fn lease(&self) -> Duration {
        Duration::from_millis(self.lease_ms)
    }

    /// Acquisition timeout as a [`Duration`]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// Retry interval as a [`Duration`]
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

fn default_lease_ms() -> u64 {
    1000
}

fn default_acquire_timeout_ms() -> u64 {
    1000
}

fn default_retry_interval_ms() -> u64 {
    50
}
