//! Shared utilities and common types for the Turnkey server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures for the HTTP surface

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    CacheConfig, DatabaseConfig, LockConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
