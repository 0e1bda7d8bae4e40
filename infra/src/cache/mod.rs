//! Cache module for Redis-based caching
//!
//! Provides the Redis implementation of the core's cache store and the
//! expiry policy store that lives inside whatever cache it is given.

pub mod config_store;
pub mod redis_cache;

pub use config_store::CachedConfigStore;
pub use redis_cache::RedisCacheStore;
