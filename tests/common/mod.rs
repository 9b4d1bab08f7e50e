#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower_http::normalize_path::NormalizePath;

use linkshrink::prelude::*;
use linkshrink::routes::app_router;

pub const TEST_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn test_config(max_retries: u32) -> ServiceConfig {
    ServiceConfig::new(6, max_retries, Duration::from_secs(60)).unwrap()
}

/// Service wired to in-memory adapters, with handles kept for assertions.
pub struct TestContext {
    pub repository: MemoryUrlRepository,
    pub cache: MemoryCache,
    pub service: Arc<ShortenerService>,
}

pub fn create_test_context() -> TestContext {
    let repository = MemoryUrlRepository::new();
    let cache = MemoryCache::new();

    let service = Arc::new(ShortenerService::new(
        test_config(3),
        Arc::new(repository.clone()),
        Arc::new(cache.clone()),
        Arc::new(FacadeMetrics),
    ));

    TestContext {
        repository,
        cache,
        service,
    }
}

pub fn create_service(
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn UrlCache>,
    max_retries: u32,
) -> Arc<ShortenerService> {
    Arc::new(ShortenerService::new(
        test_config(max_retries),
        repository,
        cache,
        Arc::new(FacadeMetrics),
    ))
}

/// Full application router, middleware included.
pub fn create_test_app(service: Arc<ShortenerService>) -> IntoMakeService<NormalizePath<Router>> {
    create_test_app_with_timeout(service, TEST_REQUEST_TIMEOUT)
}

pub fn create_test_app_with_timeout(
    service: Arc<ShortenerService>,
    request_timeout: Duration,
) -> IntoMakeService<NormalizePath<Router>> {
    let app = app_router(AppState::new(service), request_timeout);
    ServiceExt::<Request>::into_make_service(app)
}

/// Cache whose every operation fails with a backend error.
pub struct FailingCache;

#[async_trait]
impl UrlCache for FailingCache {
    async fn insert(&self, _id: &str, _target: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn retrieve(&self, _id: &str) -> Result<String, CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Repository that reports every insert as a duplicate id.
#[derive(Default)]
pub struct CollidingRepository {
    pub insert_calls: AtomicUsize,
}

impl CollidingRepository {
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlRepository for CollidingRepository {
    async fn insert(&self, _record: &ShortUrl) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::DuplicateKey)
    }

    async fn retrieve(&self, _id: &str) -> Result<ShortUrl, StoreError> {
        Err(StoreError::NotFound)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Repository whose calls stall for `delay` before touching the inner store.
pub struct SlowRepository {
    pub inner: MemoryUrlRepository,
    pub delay: Duration,
}

#[async_trait]
impl UrlRepository for SlowRepository {
    async fn insert(&self, record: &ShortUrl) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(record).await
    }

    async fn retrieve(&self, id: &str) -> Result<ShortUrl, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.retrieve(id).await
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Repository failing every call with a generic backend error.
pub struct BrokenRepository;

#[async_trait]
impl UrlRepository for BrokenRepository {
    async fn insert(&self, _record: &ShortUrl) -> Result<(), StoreError> {
        Err(StoreError::Insert("connection reset by peer".to_string()))
    }

    async fn retrieve(&self, _id: &str) -> Result<ShortUrl, StoreError> {
        Err(StoreError::Retrieve("connection reset by peer".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}
