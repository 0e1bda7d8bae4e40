//! In-memory token record repository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::r#trait::TokenRecordRepository;
use crate::domain::entities::token_record::TokenRecord;
use crate::errors::{ControlError, ControlResult};

/// HashMap-backed repository for tests and single-node deployments
///
/// Clones share the same underlying map, so a clone handed to the
/// controller and one kept by a test observe identical state.
#[derive(Clone, Default)]
pub struct InMemoryTokenRecordRepository {
    records: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl InMemoryTokenRecordRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl TokenRecordRepository for InMemoryTokenRecordRepository {
    async fn find_by_id(&self, id: &str) -> ControlResult<Option<TokenRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn create(&self, record: &TokenRecord) -> ControlResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(ControlError::Store {
                message: format!("duplicate token record id: {}", record.id),
            });
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &TokenRecord) -> ControlResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
