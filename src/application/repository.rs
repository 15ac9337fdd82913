//! Repository facade combining the durable store with the fast-path cache.
//!
//! Only code to URL resolution is cached, since it is the redirect hot path.
//! Every other operation goes straight to the store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Cache-aside facade over a [`UrlStore`] and a [`CacheService`].
///
/// Cache failures are logged and treated as misses; they never reach the
/// caller. Entries are written on a store hit and never updated or evicted.
pub struct UrlRepository<S: UrlStore + ?Sized> {
    store: Arc<S>,
    cache: Arc<dyn CacheService>,
}

impl<S: UrlStore + ?Sized> UrlRepository<S> {
    pub fn new(store: Arc<S>, cache: Arc<dyn CacheService>) -> Self {
        Self { store, cache }
    }

    pub async fn add(&self, record: &NewUrlRecord) -> Result<i64, AppError> {
        self.store.add(record).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store.delete(id).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        self.store.find_by_id(id).await
    }

    pub async fn get_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        self.store.find_by_url(url).await
    }

    /// Resolves `code` to its original URL.
    ///
    /// # Lookup Order
    ///
    /// 1. Cache. A hit is returned without touching the store; an error counts as a miss.
    /// 2. Store. A miss there is `Ok(None)`, not an error.
    /// 3. On a store hit the mapping is written to the cache, best effort.
    ///
    /// # Errors
    ///
    /// Only store failures are returned.
    pub async fn get_url_by_code(&self, code: &str) -> Result<Option<String>, AppError> {
        match self.cache.get_url(code).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", code);
                return Ok(Some(url));
            }
            Ok(None) => debug!("Cache MISS for {}", code),
            Err(e) => warn!("unable to get short url from cache: {}", e),
        }

        let Some(url) = self.store.find_url_by_code(code).await? else {
            return Ok(None);
        };

        if let Err(e) = self.cache.set_url(code, &url).await {
            warn!("unable to add short url to cache: {}", e);
        }

        Ok(Some(url))
    }
}
