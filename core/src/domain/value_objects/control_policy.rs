//! Expiry policy applied to session tokens
//!
//! Two independent bounds govern a session: a hard lifetime measured
//! from the original sign-in and an inactivity window measured from the
//! last access. Either bound can be disabled by setting it to zero.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Expiry policy for session tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenControlConfig {
    /// Maximum age of a session chain in milliseconds, measured from
    /// sign-in. Zero disables lifetime expiry.
    #[serde(default = "default_max_token_lifetime_ms")]
    pub max_token_lifetime_ms: i64,

    /// Maximum inactivity gap in milliseconds, measured from the last
    /// access. Zero disables inactivity expiry.
    #[serde(default = "default_max_inactive_interval_ms")]
    pub max_inactive_interval_ms: i64,
}

impl Default for TokenControlConfig {
    fn default() -> Self {
        Self {
            max_token_lifetime_ms: default_max_token_lifetime_ms(),
            max_inactive_interval_ms: default_max_inactive_interval_ms(),
        }
    }
}

impl TokenControlConfig {
    /// Create a policy from duration bounds
    pub fn new(max_token_lifetime: Duration, max_inactive_interval: Duration) -> Self {
        Self {
            max_token_lifetime_ms: max_token_lifetime.num_milliseconds(),
            max_inactive_interval_ms: max_inactive_interval.num_milliseconds(),
        }
    }

    /// Set the maximum session lifetime
    pub fn with_max_token_lifetime(mut self, bound: Duration) -> Self {
        self.max_token_lifetime_ms = bound.num_milliseconds();
        self
    }

    /// Set the maximum inactivity interval
    pub fn with_max_inactive_interval(mut self, bound: Duration) -> Self {
        self.max_inactive_interval_ms = bound.num_milliseconds();
        self
    }

    /// Apply a partial update, leaving untouched fields as they were
    pub fn apply(&mut self, patch: &TokenControlConfigPatch) {
        if let Some(max_token_lifetime_ms) = patch.max_token_lifetime_ms {
            self.max_token_lifetime_ms = max_token_lifetime_ms;
        }
        if let Some(max_inactive_interval_ms) = patch.max_inactive_interval_ms {
            self.max_inactive_interval_ms = max_inactive_interval_ms;
        }
    }
}

/// Partial update to the token expiry policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenControlConfigPatch {
    /// New lifetime bound in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_lifetime_ms: Option<i64>,

    /// New inactivity bound in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_inactive_interval_ms: Option<i64>,
}

/// Sessions live for a week by default
fn default_max_token_lifetime_ms() -> i64 {
    Duration::days(7).num_milliseconds()
}

/// Sessions go idle after an hour without access by default
fn default_max_inactive_interval_ms() -> i64 {
    Duration::hours(1).num_milliseconds()
}
