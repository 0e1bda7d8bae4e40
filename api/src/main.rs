//! Turnkey API server binary
//!
//! Wires a token controller to one of two collaborator stacks and
//! serves the HTTP surface:
//!
//! - `TURNKEY_BACKEND=memory` (default): in-process collaborators, no
//!   external services; suitable for development and single-node use.
//! - `TURNKEY_BACKEND=external`: MySQL record store, Redis cache, and
//!   the Redis lease lock shared across the fleet.

use std::env;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{bail, Context};
use log::info;

use tk_api::{routes, AppState};
use tk_core::repositories::{
    InMemoryCacheStore, InMemoryConfigStore, InMemoryTokenRecordRepository, LocalLockManager,
};
use tk_core::services::control::TokenController;
use tk_infra::{
    CachedConfigStore, DatabasePool, MySqlTokenRecordRepository, RedisCacheStore,
    RedisLockManager,
};
use tk_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();
    let backend = env::var("TURNKEY_BACKEND").unwrap_or_else(|_| "memory".to_string());

    info!(
        "starting Turnkey API server on {} with {} backend",
        bind_address, backend
    );

    match backend.as_str() {
        "external" => run_external(config, &bind_address).await,
        "memory" => run_memory(config, &bind_address).await,
        other => bail!("unknown TURNKEY_BACKEND: {}", other),
    }
}

/// Serve with in-process collaborators
async fn run_memory(config: AppConfig, bind_address: &str) -> anyhow::Result<()> {
    let repository = Arc::new(InMemoryTokenRecordRepository::new());
    let cache = Arc::new(InMemoryCacheStore::new());
    let locks = Arc::new(
        LocalLockManager::new().with_acquire_timeout(config.lock.acquire_timeout()),
    );
    let policy = Arc::new(InMemoryConfigStore::new());

    let controller = Arc::new(
        TokenController::new(repository, cache, locks, policy.clone())
            .with_renew_lease(config.lock.lease()),
    );
    let state = web::Data::new(AppState::new(controller, policy));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(
                routes::configure::<
                    InMemoryTokenRecordRepository,
                    InMemoryCacheStore,
                    LocalLockManager,
                    InMemoryConfigStore,
                >,
            )
    })
    .bind(bind_address)?
    .run()
    .await?;
    Ok(())
}

/// Serve with the MySQL and Redis collaborators
async fn run_external(config: AppConfig, bind_address: &str) -> anyhow::Result<()> {
    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to create database pool")?;
    let cache = Arc::new(
        RedisCacheStore::new(&config.cache)
            .await
            .context("failed to connect to Redis")?,
    );

    let repository = Arc::new(MySqlTokenRecordRepository::new(pool.get_pool().clone()));
    let locks = Arc::new(RedisLockManager::new(
        cache.connection().clone(),
        &config.lock,
    ));
    let policy = Arc::new(CachedConfigStore::new(cache.clone()));

    let controller = Arc::new(
        TokenController::new(repository, cache, locks, policy.clone())
            .with_renew_lease(config.lock.lease()),
    );
    let state = web::Data::new(AppState::new(controller, policy));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(
                routes::configure::<
                    MySqlTokenRecordRepository,
                    RedisCacheStore,
                    RedisLockManager,
                    CachedConfigStore<RedisCacheStore>,
                >,
            )
    })
    .bind(bind_address)?
    .run()
    .await?;
    Ok(())
}
