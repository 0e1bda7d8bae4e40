//! Repository interface for token record persistence

use async_trait::async_trait;

use crate::domain::entities::token_record::TokenRecord;
use crate::errors::ControlResult;

/// Persistence interface for session token records
///
/// The store is the source of truth for token state. Records are only
/// ever inserted and overwritten; there is deliberately no delete, so a
/// session's full renewal history remains queryable.
#[async_trait]
pub trait TokenRecordRepository: Send + Sync {
    /// Find a token record by its identifier
    ///
    /// # Arguments
    /// * `id` - Opaque token identifier
    ///
    /// # Returns
    /// * `Ok(Some(record))` - The record exists
    /// * `Ok(None)` - No record matches the identifier
    /// * `Err(ControlError::Store)` - The store failed
    async fn find_by_id(&self, id: &str) -> ControlResult<Option<TokenRecord>>;

    /// Persist a brand new token record
    ///
    /// The record's identifier must not already be present; freshly
    /// generated UUIDs make collisions a store fault rather than a
    /// business case.
    ///
    /// # Arguments
    /// * `record` - The record to insert
    async fn create(&self, record: &TokenRecord) -> ControlResult<()>;

    /// Overwrite an existing token record
    ///
    /// # Arguments
    /// * `record` - The full replacement state, keyed by `record.id`
    ///
    /// # Returns
    /// * `Ok(true)` - A record with this identifier existed
    /// * `Ok(false)` - There was nothing to update
    ///
    /// Absence is reported as `false` rather than an error; the caller
    /// decides whether a missing row is fatal for its operation.
    async fn update(&self, record: &TokenRecord) -> ControlResult<bool>;
}
