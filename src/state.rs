//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::repository::UrlRepository;
use crate::application::services::ShorteningService;
use crate::domain::counter_pipeline::CounterHandle;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::cache::CacheService;

/// Application state shared across all request handlers.
///
/// Cloning is cheap: every field is reference counted or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<ShorteningService<dyn UrlStore>>,
    pub store: Arc<dyn UrlStore>,
    pub cache: Arc<dyn CacheService>,
    pub counter: CounterHandle,
}

impl AppState {
    /// Wires the repository and shortening service on top of `store` and `cache`.
    ///
    /// Short URLs are published under `redirect_domain`.
    pub fn new(
        store: Arc<dyn UrlStore>,
        cache: Arc<dyn CacheService>,
        counter: CounterHandle,
        redirect_domain: &str,
    ) -> Self {
        let repository = UrlRepository::new(store.clone(), cache.clone());
        let shortening_service = Arc::new(ShorteningService::new(
            repository,
            counter.clone(),
            redirect_domain,
        ));

        Self {
            shortening_service,
            store,
            cache,
            counter,
        }
    }
}
