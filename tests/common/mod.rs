#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use shortening_service::domain::counter_pipeline::CounterPipeline;
use shortening_service::domain::entities::NewUrlRecord;
use shortening_service::domain::repositories::UrlStore;
use shortening_service::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use shortening_service::infrastructure::persistence::{MemoryUrlStore, SqliteUrlStore};
use shortening_service::routes::router;
use shortening_service::state::AppState;

pub const DOMAIN: &str = "http://localhost";

/// Everything a handler test needs: the server, the backing store and the
/// running counter pipeline.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<MemoryUrlStore>,
    pub pipeline: CounterPipeline,
}

pub fn create_test_state(
    store: Arc<dyn UrlStore>,
    cache: Arc<dyn CacheService>,
    workers: usize,
) -> (AppState, CounterPipeline) {
    let pipeline = CounterPipeline::start(store.clone(), workers);
    let state = AppState::new(store, cache, pipeline.handle(), DOMAIN);
    (state, pipeline)
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUrlStore::new());
    let (state, pipeline) = create_test_state(store.clone(), Arc::new(MemoryCache::new()), 2);
    let server = test_server(router(state.clone()));

    TestApp {
        server,
        state,
        store,
        pipeline,
    }
}

pub fn spawn_app_without_cache() -> TestApp {
    let store = Arc::new(MemoryUrlStore::new());
    let (state, pipeline) = create_test_state(store.clone(), Arc::new(NullCache::new()), 2);
    let server = test_server(router(state.clone()));

    TestApp {
        server,
        state,
        store,
        pipeline,
    }
}

pub fn test_server(app: Router) -> TestServer {
    TestServer::new(app).unwrap()
}

pub async fn sqlite_store() -> SqliteUrlStore {
    let store = SqliteUrlStore::connect("sqlite::memory:", 1).await.unwrap();
    store.migrate().await.unwrap();
    store
}

pub async fn create_test_url(store: &dyn UrlStore, code: &str, url: &str) -> i64 {
    store
        .add(&NewUrlRecord::new(code.to_string(), url.to_string(), DOMAIN))
        .await
        .unwrap()
}
