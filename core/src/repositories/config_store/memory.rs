//! In-memory expiry policy store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::r#trait::ControlConfigStore;
use crate::domain::value_objects::control_policy::{TokenControlConfig, TokenControlConfigPatch};
use crate::errors::ControlResult;

/// Policy store for tests and single-node deployments
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    current: Arc<RwLock<TokenControlConfig>>,
}

impl InMemoryConfigStore {
    /// Create a store holding the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a specific starting policy
    pub fn with_config(config: TokenControlConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(config)),
        }
    }
}

#[async_trait]
impl ControlConfigStore for InMemoryConfigStore {
    async fn load(&self) -> ControlResult<TokenControlConfig> {
        Ok(*self.current.read().await)
    }

    async fn store(&self, patch: TokenControlConfigPatch) -> ControlResult<TokenControlConfig> {
        let mut current = self.current.write().await;
        current.apply(&patch);
        Ok(*current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_starts_with_defaults() {
        let store = InMemoryConfigStore::new();
        assert_eq!(store.load().await.unwrap(), TokenControlConfig::default());
    }

    #[tokio::test]
    async fn test_store_returns_the_effective_policy() {
        let store = InMemoryConfigStore::new();

        let effective = store
            .store(TokenControlConfigPatch {
                max_inactive_interval_ms: Some(120_000),
                max_token_lifetime_ms: None,
            })
            .await
            .unwrap();

        assert_eq!(effective.max_inactive_interval_ms, 120_000);
        assert_eq!(store.load().await.unwrap(), effective);
    }
}
