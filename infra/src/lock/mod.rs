//! Distributed lock module

pub mod redis_lock;

pub use redis_lock::RedisLockManager;
