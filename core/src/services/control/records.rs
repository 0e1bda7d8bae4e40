//! Cache-aside access to token records
//!
//! Every read tries the cache first and falls back to the repository;
//! every write lands in the repository first and is then mirrored into
//! the cache. Because writes always go store-first, a cache entry can be
//! missing or stale-by-eviction but never ahead of the store.

use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::token_record::TokenRecord;
use crate::errors::{ControlError, ControlResult};
use crate::repositories::{CacheStore, TokenRecordRepository};

/// Prefix for cache keys holding token records
const ACCESS_KEY_PREFIX: &str = "access";

/// Write-through record access shared by all controller operations
pub struct RecordStore<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> RecordStore<R, C>
where
    R: TokenRecordRepository,
    C: CacheStore,
{
    /// Pair a repository with the cache that mirrors it
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self { repository, cache }
    }

    fn cache_key(id: &str) -> String {
        format!("{}:{}", ACCESS_KEY_PREFIX, id)
    }

    /// Load a record, trying the cache before the repository
    ///
    /// A cache entry that fails to decode is treated as a miss: the
    /// repository answer wins and is written back over the bad entry.
    pub async fn load(&self, id: &str) -> ControlResult<Option<TokenRecord>> {
        let key = Self::cache_key(id);
        if let Some(raw) = self.cache.get(&key).await? {
            match serde_json::from_str::<TokenRecord>(&raw) {
                Ok(record) => return Ok(Some(record)),
                Err(error) => {
                    warn!(token_id = id, %error, "discarding undecodable cached record");
                }
            }
        }

        let record = self.repository.find_by_id(id).await?;
        if let Some(record) = &record {
            self.mirror(record).await?;
        }
        Ok(record)
    }

    /// Insert a brand new record and mirror it into the cache
    pub async fn insert(&self, record: &TokenRecord) -> ControlResult<()> {
        self.repository.create(record).await?;
        self.mirror(record).await
    }

    /// Overwrite an existing record, store first, then the cache
    ///
    /// Fails with `ControlError::NotFound` when the repository has no
    /// row for the record's identifier; in that case the cache is left
    /// untouched.
    pub async fn save(&self, record: &TokenRecord) -> ControlResult<()> {
        let updated = self.repository.update(record).await?;
        if !updated {
            return Err(ControlError::NotFound {
                id: record.id.clone(),
            });
        }
        self.mirror(record).await
    }

    async fn mirror(&self, record: &TokenRecord) -> ControlResult<()> {
        let raw = serde_json::to_string(record).map_err(|error| ControlError::Cache {
            message: format!("failed to encode record {}: {}", record.id, error),
        })?;
        self.cache.set(&Self::cache_key(&record.id), &raw).await
    }
}
