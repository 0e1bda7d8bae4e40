//! Error types for the token control domain
//!
//! Expiry outcomes are ordinary values ([`crate::domain::TokenStatus`]),
//! not errors. An error here always means a collaborator misbehaved or a
//! caller referenced a record that does not exist.

use thiserror::Error;

/// Errors surfaced by token lifecycle operations
#[derive(Error, Debug)]
pub enum ControlError {
    /// A write targeted a token record that is not present in the store
    #[error("Token record not found: {id}")]
    NotFound { id: String },

    /// The rotation lock could not be taken within the acquisition window
    #[error("Lock unavailable: {key}")]
    LockUnavailable { key: String },

    /// The durable record store failed
    #[error("Record store error: {message}")]
    Store { message: String },

    /// The cache layer failed
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// The lock service failed in a way other than contention
    #[error("Lock error: {message}")]
    Lock { message: String },
}

impl ControlError {
    /// Whether a retry of the same call may succeed without intervention
    pub fn is_transient(&self) -> bool {
        matches!(self, ControlError::LockUnavailable { .. })
    }
}

/// Result type for all token control operations
pub type ControlResult<T> = Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_identifiers() {
        let error = ControlError::NotFound {
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Token record not found: abc-123");

        let error = ControlError::LockUnavailable {
            key: "renew:abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Lock unavailable: renew:abc-123");
    }

    #[test]
    fn test_only_contention_is_transient() {
        assert!(ControlError::LockUnavailable {
            key: "renew:x".to_string()
        }
        .is_transient());
        assert!(!ControlError::Store {
            message: "boom".to_string()
        }
        .is_transient());
    }
}
