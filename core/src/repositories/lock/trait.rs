//! Lock interface serializing token rotation

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::ControlResult;

/// Mutual exclusion over named keys
///
/// The controller takes one lock per token while rotating it, so every
/// implementation must guarantee that at most one holder owns a key at
/// a time, across whatever scope the deployment shares (one process for
/// the local manager, the whole fleet for Redis).
#[async_trait]
pub trait LockManager: Send + Sync {
    /// Take an exclusive lock on `key`
    ///
    /// Waits for a contended lock up to the manager's acquisition
    /// window, then fails with `ControlError::LockUnavailable`.
    ///
    /// # Arguments
    /// * `key` - Name of the lock
    /// * `lease` - Upper bound on how long an abandoned holder can keep
    ///   the key locked before it frees itself
    async fn acquire(&self, key: &str, lease: Duration) -> ControlResult<Box<dyn LockGuard>>;
}

/// Held lock returned by [`LockManager::acquire`]
#[async_trait]
pub trait LockGuard: Send + Sync + std::fmt::Debug {
    /// Give the lock back
    ///
    /// Consumes the guard, so a lock cannot be released twice. Releasing
    /// a lock whose lease already lapsed is not an error.
    async fn release(self: Box<Self>) -> ControlResult<()>;
}
