//! Token lifecycle controller

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::entities::token_record::{TokenRecord, TokenRecordPatch, TokenStatus};
use crate::domain::value_objects::renew_outcome::RenewOutcome;
use crate::errors::{ControlError, ControlResult};
use crate::repositories::{CacheStore, ControlConfigStore, LockManager, TokenRecordRepository};
use crate::services::control::records::RecordStore;

/// Default lease on the per-token rotation lock
const RENEW_LOCK_LEASE: Duration = Duration::from_millis(1000);

/// Prefix for rotation lock keys
const RENEW_LOCK_PREFIX: &str = "renew";

/// Coordinates the lifecycle of opaque session tokens
///
/// The controller never deletes records and never retries collaborator
/// failures; expiry is expressed through [`TokenStatus`] values and
/// rotation through fresh successor records.
pub struct TokenController<R, C, L, P> {
    records: RecordStore<R, C>,
    locks: Arc<L>,
    policy: Arc<P>,
    renew_lease: Duration,
}

impl<R, C, L, P> TokenController<R, C, L, P>
where
    R: TokenRecordRepository,
    C: CacheStore,
    L: LockManager,
    P: ControlConfigStore,
{
    /// Assemble a controller from its collaborators
    pub fn new(repository: Arc<R>, cache: Arc<C>, locks: Arc<L>, policy: Arc<P>) -> Self {
        Self {
            records: RecordStore::new(repository, cache),
            locks,
            policy,
            renew_lease: RENEW_LOCK_LEASE,
        }
    }

    /// Override the lease granted on rotation locks
    pub fn with_renew_lease(mut self, lease: Duration) -> Self {
        self.renew_lease = lease;
        self
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn lock_key(id: &str) -> String {
        format!("{}:{}", RENEW_LOCK_PREFIX, id)
    }

    /// Mint a brand new session token and return its identifier
    pub async fn issue(&self) -> ControlResult<String> {
        let record = TokenRecord::issue(Self::now_ms());
        self.records.insert(&record).await?;
        info!(token_id = %record.id, "issued session token");
        Ok(record.id)
    }

    /// Fetch the raw record behind a token identifier
    pub async fn get_info(&self, id: &str) -> ControlResult<Option<TokenRecord>> {
        self.records.load(id).await
    }

    /// Apply a partial update to a token record
    ///
    /// The record must exist; updating an unknown identifier is
    /// `ControlError::NotFound`.
    pub async fn update(&self, id: &str, patch: TokenRecordPatch) -> ControlResult<()> {
        let mut record = self
            .records
            .load(id)
            .await?
            .ok_or_else(|| ControlError::NotFound { id: id.to_string() })?;
        record.apply(&patch);
        self.records.save(&record).await
    }

    /// Stamp the token's last access time with the current clock
    pub async fn record_access(&self, id: &str) -> ControlResult<()> {
        self.update(id, TokenRecordPatch::touch(Self::now_ms())).await
    }

    /// Classify a token against the current expiry policy
    ///
    /// Pure with respect to stored state: repeated checks of the same
    /// token return the same answer until something else writes.
    pub async fn check(&self, id: &str) -> ControlResult<TokenStatus> {
        let record = match self.records.load(id).await? {
            Some(record) => record,
            None => return Ok(TokenStatus::Missing),
        };
        let policy = self.policy.load().await?;
        let status = record.status_at(Self::now_ms(), &policy);
        debug!(token_id = id, status = %status, "checked session token");
        Ok(status)
    }

    /// Rotate a token under its per-token lock
    ///
    /// Exactly one of any number of concurrent attempts on the same
    /// identifier mints a successor; the rest observe the already
    /// resigned record and report [`RenewOutcome::Unrenewable`]. The
    /// lock is released on every path, and a failed release is logged
    /// rather than allowed to mask the rotation's own result.
    pub async fn renew(&self, id: &str) -> ControlResult<RenewOutcome> {
        let lock_key = Self::lock_key(id);
        let guard = self.locks.acquire(&lock_key, self.renew_lease).await?;

        let outcome = self.rotate(id).await;

        if let Err(error) = guard.release().await {
            warn!(token_id = id, %error, "failed to release rotation lock");
        }
        outcome
    }

    /// The rotation itself; caller must hold the token's lock
    async fn rotate(&self, id: &str) -> ControlResult<RenewOutcome> {
        // Freshly read under the lock, so a just-finished rotation by a
        // concurrent caller is visible here.
        let mut current = match self.records.load(id).await? {
            Some(record) => record,
            None => return Ok(RenewOutcome::Missing),
        };
        if current.resigned {
            return Ok(RenewOutcome::Unrenewable);
        }

        let successor = current.successor(Self::now_ms());
        current.resign();
        self.records.save(&current).await?;
        self.records.insert(&successor).await?;

        info!(token_id = id, successor_id = %successor.id, "rotated session token");
        Ok(RenewOutcome::Renewed { id: successor.id })
    }
}
