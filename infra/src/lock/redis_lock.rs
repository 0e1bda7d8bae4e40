//! Redis lease lock
//!
//! Fleet-wide mutual exclusion built on `SET key owner NX PX lease`. The
//! lease bounds how long a crashed holder can keep a key: once it lapses
//! the key frees itself and a retrying caller can proceed. Release is a
//! compare-and-delete script, so a holder whose lease already lapsed
//! cannot delete a lock someone else has since taken.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::Rng;
use redis::aio::MultiplexedConnection;
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use tk_core::errors::{ControlError, ControlResult};
use tk_core::repositories::{LockGuard, LockManager};
use tk_shared::config::LockConfig;

/// Delete the key only if this holder still owns it
static RELEASE_SCRIPT: Lazy<redis::Script> = Lazy::new(|| {
    redis::Script::new(
        r#"
        if redis.call("GET", KEYS[1]) == ARGV[1] then
            return redis.call("DEL", KEYS[1])
        end
        return 0
    "#,
    )
});

/// Redis-backed lock manager
#[derive(Clone)]
pub struct RedisLockManager {
    connection: MultiplexedConnection,
    /// Maximum time to wait for a contended key
    acquire_timeout: Duration,
    /// Base delay between acquisition attempts
    retry_interval: Duration,
}

impl RedisLockManager {
    /// Create a lock manager over an existing Redis connection
    pub fn new(connection: MultiplexedConnection, config: &LockConfig) -> Self {
        Self {
            connection,
            acquire_timeout: config.acquire_timeout(),
            retry_interval: config.retry_interval(),
        }
    }

    /// One `SET NX PX` attempt; `true` when the key was claimed
    async fn try_claim(&self, key: &str, owner: &str, lease: Duration) -> ControlResult<bool> {
        let mut conn = self.connection.clone();
        let response: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(owner)
            .arg("NX")
            .arg("PX")
            .arg(lease.as_millis() as u64)
            .query_async(&mut conn)
            .await
            .map_err(|e| ControlError::Lock {
                message: format!("lock claim failed: {}", e),
            })?;
        Ok(response.is_some())
    }
}

#[async_trait]
impl LockManager for RedisLockManager {
    async fn acquire(&self, key: &str, lease: Duration) -> ControlResult<Box<dyn LockGuard>> {
        let owner = Uuid::new_v4().to_string();
        let deadline = Instant::now() + self.acquire_timeout;

        loop {
            if self.try_claim(key, &owner, lease).await? {
                debug!(key, owner = %owner, "acquired lock");
                return Ok(Box::new(RedisLockGuard {
                    connection: self.connection.clone(),
                    key: key.to_string(),
                    owner,
                }));
            }

            // Jitter the retry so contending callers do not hammer Redis
            // in lockstep.
            let base = self.retry_interval.as_millis() as u64;
            let delay = Duration::from_millis(base + rand::thread_rng().gen_range(0..=base / 2));
            if Instant::now() + delay >= deadline {
                return Err(ControlError::LockUnavailable {
                    key: key.to_string(),
                });
            }
            sleep(delay).await;
        }
    }
}

/// Held Redis lock; deleting the key gives it back
#[derive(Debug)]
struct RedisLockGuard {
    connection: MultiplexedConnection,
    key: String,
    owner: String,
}

#[async_trait]
impl LockGuard for RedisLockGuard {
    async fn release(self: Box<Self>) -> ControlResult<()> {
        let mut conn = self.connection.clone();
        let deleted: i64 = RELEASE_SCRIPT
            .key(&self.key)
            .arg(&self.owner)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| ControlError::Lock {
                message: format!("lock release failed: {}", e),
            })?;

        if deleted == 0 {
            // The lease lapsed and the key either expired or was claimed
            // by someone else; nothing left to give back.
            warn!(key = %self.key, "lock already gone at release");
        }
        Ok(())
    }
}
