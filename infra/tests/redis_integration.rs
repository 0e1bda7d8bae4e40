//! Integration tests for the Redis cache store and lease lock
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p tk_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use tk_core::domain::value_objects::control_policy::TokenControlConfigPatch;
use tk_core::errors::ControlError;
use tk_core::repositories::{CacheStore, ControlConfigStore, LockManager};
use tk_infra::cache::{CachedConfigStore, RedisCacheStore};
use tk_infra::lock::RedisLockManager;
use tk_shared::config::{CacheConfig, LockConfig};

fn cache_config() -> CacheConfig {
    CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    )
}

async fn connect() -> RedisCacheStore {
    RedisCacheStore::new(&cache_config())
        .await
        .expect("failed to connect to Redis")
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_delete_cycle() {
    let cache = connect().await;
    let key = "test:token-control:cycle";

    cache.set(key, "payload").await.unwrap();
    assert_eq!(cache.get(key).await.unwrap(), Some("payload".to_string()));

    cache.delete(key).await.unwrap();
    assert_eq!(cache.get(key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_policy_store_round_trip() {
    let cache = Arc::new(connect().await);
    let store = CachedConfigStore::new(cache);

    let effective = store
        .store(TokenControlConfigPatch {
            max_inactive_interval_ms: Some(90_000),
            max_token_lifetime_ms: None,
        })
        .await
        .unwrap();

    assert_eq!(effective.max_inactive_interval_ms, 90_000);
    assert_eq!(store.load().await.unwrap(), effective);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_lock_excludes_second_holder_until_release() {
    let cache = connect().await;
    let config = LockConfig {
        lease_ms: 2_000,
        acquire_timeout_ms: 200,
        retry_interval_ms: 20,
    };
    let manager = RedisLockManager::new(cache.connection().clone(), &config);

    let key = "test:renew:lock-exclusion";
    let lease = Duration::from_millis(config.lease_ms);

    let guard = manager.acquire(key, lease).await.unwrap();

    let contender = manager.acquire(key, lease).await;
    assert!(matches!(
        contender,
        Err(ControlError::LockUnavailable { .. })
    ));

    guard.release().await.unwrap();
    let reacquired = manager.acquire(key, lease).await.unwrap();
    reacquired.release().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_lapsed_lease_frees_the_key() {
    let cache = connect().await;
    let config = LockConfig {
        lease_ms: 100,
        acquire_timeout_ms: 1_000,
        retry_interval_ms: 20,
    };
    let manager = RedisLockManager::new(cache.connection().clone(), &config);

    let key = "test:renew:lock-lease";

    // Never released; the lease must free it on its own.
    let _abandoned = manager.acquire(key, Duration::from_millis(100)).await.unwrap();

    let guard = manager.acquire(key, Duration::from_millis(500)).await.unwrap();
    guard.release().await.unwrap();
}
