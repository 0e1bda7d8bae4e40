//! Cache interface for token records and policy documents

use async_trait::async_trait;

use crate::errors::ControlResult;

/// String-keyed, string-valued cache sitting in front of the record store
///
/// Values are opaque to the cache; callers serialize what they store.
/// The cache is a read accelerator only, never the source of truth, so
/// entries may vanish at any time without affecting correctness.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> ControlResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> ControlResult<()>;

    /// Drop the entry stored under `key`, if any
    async fn delete(&self, key: &str) -> ControlResult<()>;
}
