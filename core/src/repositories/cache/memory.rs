//! In-memory cache store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::r#trait::CacheStore;
use crate::errors::ControlResult;

/// HashMap-backed cache for tests and single-node deployments
#[derive(Clone, Default)]
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCacheStore {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> ControlResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ControlResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> ControlResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
