//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    /// No session token was presented on a guarded route
    pub const MISSING_SESSION: &str = "MISSING_SESSION";
    /// The session sat idle longer than the inactivity bound allows
    pub const INACTIVE_SESSION: &str = "INACTIVE_SESSION";
    /// The session chain outlived its maximum lifetime
    pub const EXPIRED_SESSION: &str = "EXPIRED_SESSION";
    /// The presented token was superseded by a renewal
    pub const RENEWED_TOKEN: &str = "RENEWED_TOKEN";
    /// A renewal attempt could not take the rotation lock
    pub const TOKEN_RENEW_FAILED: &str = "TOKEN_RENEW_FAILED";

    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const CACHE_ERROR: &str = "CACHE_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serializes_without_empty_details() {
        let response = ErrorResponse::new(error_codes::NOT_FOUND, "no such session");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::BAD_REQUEST, "invalid policy")
            .add_detail("field", "max_token_lifetime_ms");
        let details = response.details.unwrap();
        assert_eq!(details["field"], "max_token_lifetime_ms");
    }
}
