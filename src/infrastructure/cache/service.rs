//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// The shortener service treats every variant the same way on reads (fall
/// back to the durable store) and never propagates any of them to callers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache miss")]
    Miss,

    #[error("cache connection error: {0}")]
    Connection(String),

    #[error("cache operation error: {0}")]
    Operation(String),
}

impl CacheError {
    /// Returns true for an absent or expired key, as opposed to a backend fault.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Ephemeral, TTL-bound mapping of short ids to target URLs.
///
/// Entries are never authoritative and may vanish at any time. Implementations
/// must be thread-safe.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process TTL map
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlCache: Send + Sync {
    /// Stores a mapping that expires after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns a backend error when the write fails. Callers must treat it as
    /// non-fatal.
    async fn insert(&self, id: &str, target: &str, ttl: Duration) -> CacheResult<()>;

    /// Fetches the target for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Miss`] when the key is absent or expired, or a
    /// backend error otherwise.
    async fn retrieve(&self, id: &str) -> CacheResult<String>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
