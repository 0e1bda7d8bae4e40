//! # Turnkey Infrastructure
//!
//! Concrete collaborators behind the core's repository traits:
//!
//! - **Database**: MySQL token record store using SQLx
//! - **Cache**: Redis-backed cache store and the cache-resident expiry
//!   policy store
//! - **Lock**: Redis lease lock serializing token rotation across processes
//!
//! Everything here speaks [`tk_core::errors::ControlError`] at its
//! boundary; driver errors never leak past this crate.

pub mod cache;
pub mod database;
pub mod lock;

pub use cache::{CachedConfigStore, RedisCacheStore};
pub use database::connection::DatabasePool;
pub use database::mysql::MySqlTokenRecordRepository;
pub use lock::RedisLockManager;
