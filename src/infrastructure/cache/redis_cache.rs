//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for fast code to URL lookups.
///
/// Uses `ConnectionManager`, which reconnects on its own after a dropped
/// connection, so a transient outage heals without restarting the process.
/// Every command is bounded by `op_timeout`; a slow or unreachable server
/// surfaces as [`CacheError::Timeout`] instead of stalling the redirect.
pub struct RedisCache {
    client: ConnectionManager,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(op_timeout * 4, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::ConnectionError("Timed out connecting to Redis".into()))?
            .map_err(|e| {
                CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
            })?;

        let cache = Self {
            client: manager,
            op_timeout,
            key_prefix: "url:".to_string(),
        };

        let mut conn = cache.client.clone();
        cache
            .bounded("PING", conn.ping::<()>())
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(cache)
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }

    async fn bounded<T>(
        &self,
        op: &str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> CacheResult<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CacheError::OperationError(format!("{} failed: {}", op, e))),
            Err(_) => Err(CacheError::Timeout(format!(
                "{} exceeded {}ms",
                op,
                self.op_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let url = self
            .bounded("GET", conn.get::<_, Option<String>>(&key))
            .await?;

        match &url {
            Some(url) => debug!("Cache HIT: {} -> {}", short_code, url),
            None => debug!("Cache MISS: {}", short_code),
        }

        Ok(url)
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        self.bounded("SET", conn.set::<_, _, ()>(&key, original_url))
            .await?;

        debug!("Cache SET: {} -> {}", short_code, original_url);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded("PING", conn.ping::<()>()).await.is_ok()
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
