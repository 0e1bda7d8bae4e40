//! In-process lock manager

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;

use super::r#trait::{LockGuard, LockManager};
use crate::errors::{ControlError, ControlResult};

/// Default wait before a contended acquisition gives up
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(1);

/// Mutex-map lock manager for tests and single-node deployments
///
/// Leases are ignored here: an in-process guard frees its key when it is
/// dropped, so an abandoned holder cannot outlive its task.
#[derive(Clone)]
pub struct LocalLockManager {
    slots: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
    acquire_timeout: Duration,
}

impl Default for LocalLockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalLockManager {
    /// Create a lock manager with the default acquisition window
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Cap how long a contended acquisition may wait
    pub fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    async fn slot(&self, key: &str) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().await;
        slots.entry(key.to_string()).or_default().clone()
    }
}

#[async_trait]
impl LockManager for LocalLockManager {
    async fn acquire(&self, key: &str, _lease: Duration) -> ControlResult<Box<dyn LockGuard>> {
        let slot = self.slot(key).await;
        let guard = timeout(self.acquire_timeout, slot.lock_owned())
            .await
            .map_err(|_| ControlError::LockUnavailable {
                key: key.to_string(),
            })?;
        Ok(Box::new(LocalLockGuard { _guard: guard }))
    }
}

#[derive(Debug)]
struct LocalLockGuard {
    _guard: OwnedMutexGuard<()>,
}

#[async_trait]
impl LockGuard for LocalLockGuard {
    async fn release(self: Box<Self>) -> ControlResult<()> {
        Ok(())
    }
}
