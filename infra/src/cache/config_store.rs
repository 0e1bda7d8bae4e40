//! Cache-resident expiry policy store
//!
//! The policy is one small JSON document under a well-known key, shared
//! by every instance of the service. A deployment that never stored a
//! policy reads the built-in defaults.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use tk_core::domain::value_objects::control_policy::{
    TokenControlConfig, TokenControlConfigPatch,
};
use tk_core::errors::{ControlError, ControlResult};
use tk_core::repositories::{CacheStore, ControlConfigStore};

/// Key holding the expiry policy document
const CONFIG_KEY: &str = "auth:token-control-config";

/// Expiry policy store layered on any [`CacheStore`]
pub struct CachedConfigStore<C> {
    cache: Arc<C>,
}

impl<C> CachedConfigStore<C>
where
    C: CacheStore,
{
    /// Create a policy store over the given cache
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl<C> ControlConfigStore for CachedConfigStore<C>
where
    C: CacheStore,
{
    async fn load(&self) -> ControlResult<TokenControlConfig> {
        match self.cache.get(CONFIG_KEY).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(config) => Ok(config),
                Err(error) => {
                    warn!(%error, "stored token policy is undecodable, using defaults");
                    Ok(TokenControlConfig::default())
                }
            },
            None => Ok(TokenControlConfig::default()),
        }
    }

    async fn store(&self, patch: TokenControlConfigPatch) -> ControlResult<TokenControlConfig> {
        let mut config = self.load().await?;
        config.apply(&patch);

        let raw = serde_json::to_string(&config).map_err(|error| ControlError::Cache {
            message: format!("failed to encode token policy: {}", error),
        })?;
        self.cache.set(CONFIG_KEY, &raw).await?;

        info!(
            max_token_lifetime_ms = config.max_token_lifetime_ms,
            max_inactive_interval_ms = config.max_inactive_interval_ms,
            "stored token policy"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tk_core::repositories::InMemoryCacheStore;

    #[tokio::test]
    async fn test_load_defaults_when_nothing_stored() {
        let store = CachedConfigStore::new(Arc::new(InMemoryCacheStore::new()));
        assert_eq!(store.load().await.unwrap(), TokenControlConfig::default());
    }

    #[tokio::test]
    async fn test_store_then_load_round_trips_through_the_cache() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let store = CachedConfigStore::new(cache.clone());

        let effective = store
            .store(TokenControlConfigPatch {
                max_token_lifetime_ms: Some(60_000),
                max_inactive_interval_ms: None,
            })
            .await
            .unwrap();
        assert_eq!(effective.max_token_lifetime_ms, 60_000);

        assert_eq!(store.load().await.unwrap(), effective);
        assert!(cache.get(CONFIG_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_garbage_document_falls_back_to_defaults() {
        let cache = Arc::new(InMemoryCacheStore::new());
        cache.set(CONFIG_KEY, "{not json").await.unwrap();

        let store = CachedConfigStore::new(cache);
        assert_eq!(store.load().await.unwrap(), TokenControlConfig::default());
    }
}
