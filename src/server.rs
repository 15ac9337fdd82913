//! HTTP server initialization and runtime setup.
//!
//! Handles store and cache setup, the counter pipeline, and the Axum server
//! lifecycle including graceful shutdown.

use crate::config::{Config, StorageBackend};
use crate::domain::counter_pipeline::CounterPipeline;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryUrlStore, SqliteUrlStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite pool and migrations (or the in-memory store)
/// - Redis cache (or NullCache fallback)
/// - Counter pipeline workers
/// - Axum HTTP server
///
/// After a shutdown signal the server stops accepting connections, then the
/// counter pipeline drains whatever is still queued, bounded by the
/// configured shutdown timeout.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let cache = connect_cache(&config).await;

    let pipeline = CounterPipeline::start(store.clone(), config.counter_workers);

    let state = AppState::new(
        store,
        cache,
        pipeline.handle(),
        &config.redirect_domain,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, draining counter queue");

    if tokio::time::timeout(config.shutdown_timeout(), pipeline.shutdown())
        .await
        .is_err()
    {
        tracing::warn!(
            "Counter queue not drained within {}s, pending increments lost",
            config.shutdown_timeout_secs
        );
    }

    Ok(())
}

async fn connect_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    match config.storage {
        StorageBackend::Sqlite => {
            let store = SqliteUrlStore::connect(&config.database_url, config.db_max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            store.migrate().await.context("Failed to migrate")?;

            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, records are lost on restart");
            Ok(Arc::new(MemoryUrlStore::new()))
        }
    }
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_timeout()).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
