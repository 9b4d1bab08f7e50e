//! Short URL creation and resolution service.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::application::ServiceConfig;
use crate::application::error::ShortenerError;
use crate::application::metrics::{CacheEvent, MetricsRecorder, Operation, Outcome};
use crate::domain::entities::ShortUrl;
use crate::domain::key_generator::KeyGenerator;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::infrastructure::cache::UrlCache;

/// Service for shortening URLs and resolving short ids.
///
/// Combines three collaborators:
///
/// - a [`UrlRepository`], the source of truth, whose uniqueness constraint
///   settles races between concurrent shorten calls
/// - a [`UrlCache`], consulted first on reads and warmed after writes
/// - a [`MetricsRecorder`] observing every call
///
/// The service keeps no mutable state. Store and cache calls within one
/// operation are awaited one after another. Dropping the returned future
/// (for example through `tokio::time::timeout`) cancels the call in flight.
pub struct ShortenerService {
    config: ServiceConfig,
    key_generator: KeyGenerator,
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn UrlCache>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        config: ServiceConfig,
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn UrlCache>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            key_generator: KeyGenerator::new(config.short_url_length()),
            config,
            repository,
            cache,
            metrics,
        }
    }

    /// Settings the service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Stores `url` under a freshly generated short id and returns the id.
    ///
    /// # Collision Handling
    ///
    /// Each attempt salts the key with a new timestamp. A
    /// [`StoreError::DuplicateKey`] moves on to the next attempt, up to
    /// `max_retries_on_collision` attempts in total.
    ///
    /// # Cache
    ///
    /// After a successful insert the mapping is written to the cache with the
    /// configured TTL. A failed cache write is logged and metered only.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::CollisionExhausted`] if every attempt collided.
    /// Returns [`ShortenerError::Store`] on any other store failure, without retrying.
    pub async fn shorten(&self, url: &str) -> Result<String, ShortenerError> {
        let mut observation = Observation::start(self.metrics.as_ref(), Operation::Shorten);
        let result = self.try_shorten(url).await;
        observation.finish(result.is_ok());
        result
    }

    /// Resolves a short id to its target URL.
    ///
    /// # Request Flow
    ///
    /// 1. Read from cache; a hit is returned without touching the store
    /// 2. On a miss or any cache error, read from the store
    /// 3. Repopulate the cache with the configured TTL (best-effort)
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if the store has no such id.
    /// Returns [`ShortenerError::Retrieval`] on any other store failure.
    pub async fn retrieve(&self, id: &str) -> Result<String, ShortenerError> {
        let mut observation = Observation::start(self.metrics.as_ref(), Operation::Retrieve);
        let result = self.try_retrieve(id).await;
        observation.finish(result.is_ok());
        result
    }

    /// Reports whether the store and the cache are reachable.
    pub async fn health(&self) -> (bool, bool) {
        let store = self.repository.health_check().await;
        let cache = self.cache.health_check().await;
        (store, cache)
    }

    async fn try_shorten(&self, url: &str) -> Result<String, ShortenerError> {
        let max_attempts = self.config.max_retries_on_collision();

        for attempt in 1..=max_attempts {
            let created_at = Utc::now();
            let id = self
                .key_generator
                .generate(url, created_at)
                .ok_or(ShortenerError::KeyGeneration)?;

            let record = ShortUrl::new(id, url.to_string(), created_at);

            match self.repository.insert(&record).await {
                Ok(()) => {
                    self.warm_cache(Operation::Shorten, &record.id, &record.target)
                        .await;
                    return Ok(record.id);
                }
                Err(StoreError::DuplicateKey) => {
                    debug!(
                        attempt,
                        key_bytes = self.key_generator.length(),
                        id = %record.id,
                        "Short id collision, retrying"
                    );
                }
                Err(e) => {
                    error!(attempt, "Failed to insert short url: {}", e);
                    return Err(ShortenerError::Store(e));
                }
            }
        }

        warn!(attempts = max_attempts, "Collision retries exhausted");
        Err(ShortenerError::CollisionExhausted {
            attempts: max_attempts,
        })
    }

    async fn try_retrieve(&self, id: &str) -> Result<String, ShortenerError> {
        match self.cache.retrieve(id).await {
            Ok(target) => {
                debug!(id, "Cache HIT");
                self.metrics
                    .record_cache_event(Operation::Retrieve, CacheEvent::Hit);
                return Ok(target);
            }
            Err(e) if e.is_miss() => {
                debug!(id, "Cache MISS");
                self.metrics
                    .record_cache_event(Operation::Retrieve, CacheEvent::Miss);
            }
            Err(e) => {
                warn!(id, "Cache read failed, falling back to store: {}", e);
                self.metrics
                    .record_cache_event(Operation::Retrieve, CacheEvent::Error);
            }
        }

        match self.repository.retrieve(id).await {
            Ok(record) => {
                self.warm_cache(Operation::Retrieve, id, &record.target)
                    .await;
                Ok(record.target)
            }
            Err(StoreError::NotFound) => Err(ShortenerError::NotFound { id: id.to_string() }),
            Err(e) => {
                error!(id, "Failed to retrieve short url: {}", e);
                Err(ShortenerError::Retrieval(e))
            }
        }
    }

    /// Best-effort cache write. Never fails; the outcome is only visible in
    /// logs and metrics.
    async fn warm_cache(&self, operation: Operation, id: &str, target: &str) {
        let ttl = self.config.cache_expiration();

        if let Err(e) = self.cache.insert(id, target, ttl).await {
            warn!(id, operation = operation.as_str(), "Failed to cache short url: {}", e);
            self.metrics
                .record_cache_event(operation, CacheEvent::WriteFailed);
        }
    }
}

/// Records an operation observation when dropped.
///
/// A call whose future is dropped before finishing is recorded as a failure.
struct Observation<'a> {
    metrics: &'a dyn MetricsRecorder,
    operation: Operation,
    started: Instant,
    outcome: Outcome,
}

impl<'a> Observation<'a> {
    fn start(metrics: &'a dyn MetricsRecorder, operation: Operation) -> Self {
        Self {
            metrics,
            operation,
            started: Instant::now(),
            outcome: Outcome::Failure,
        }
    }

    fn finish(&mut self, success: bool) {
        self.outcome = if success {
            Outcome::Success
        } else {
            Outcome::Failure
        };
    }
}

impl Drop for Observation<'_> {
    fn drop(&mut self) {
        self.metrics
            .record_operation(self.operation, self.outcome, self.started.elapsed());
    }
}
