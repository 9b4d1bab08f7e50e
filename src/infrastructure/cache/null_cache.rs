//! No-op cache implementation for disabled caching.

use super::service::{CacheError, CacheResult, UrlCache};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Used when Redis is not configured or unreachable at startup. Writes
/// succeed without effect and every read is a miss, so each retrieve goes
/// straight to the durable store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for NullCache {
    async fn insert(&self, _id: &str, _target: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn retrieve(&self, _id: &str) -> CacheResult<String> {
        Err(CacheError::Miss)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        cache
            .insert("abc", "https://example.com", Duration::from_secs(60))
            .await
            .unwrap();

        let result = cache.retrieve("abc").await;
        assert!(matches!(result, Err(CacheError::Miss)));
        assert!(cache.health_check().await);
    }
}
