//! In-process cache backed by a map.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Unbounded in-memory cache. Entries live for the lifetime of the process.
///
/// Handy for single-instance deployments and for tests that need a cache
/// which actually remembers what was written.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.read().await.get(short_code).cloned())
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .insert(short_code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty().await);

        cache.set_url("abcd1234", "http://example.com").await.unwrap();

        assert_eq!(
            cache.get_url("abcd1234").await.unwrap().as_deref(),
            Some("http://example.com")
        );
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_code_misses() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get_url("zzzz9999").await.unwrap(), None);
    }
}
