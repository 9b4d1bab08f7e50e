//! In-process cache implementation with per-entry expiry.

use super::service::{CacheError, CacheResult, UrlCache};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Inserts between two sweeps of expired entries.
const DEFAULT_SWEEP_INTERVAL: usize = 256;

#[derive(Debug, Clone)]
struct Entry {
    target: String,
    expires_at: Instant,
}

/// Thread-safe in-memory cache mapping short id -> target URL.
///
/// Backed by a DashMap so concurrent reads rarely contend. An expired entry
/// is evicted when its key is read, and every `sweep_interval` inserts all
/// expired entries are dropped, so the map stays bounded by the live set.
#[derive(Clone, Debug)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, Entry>>,
    inserts: Arc<AtomicUsize>,
    sweep_interval: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that sweeps expired entries every `interval` inserts.
    pub fn with_sweep_interval(interval: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            inserts: Arc::new(AtomicUsize::new(0)),
            sweep_interval: interval.max(1),
        }
    }

    fn sweep_expired(&self) {
        let now = Instant::now();
        self.inner.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries currently held, including not yet evicted expired ones.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl UrlCache for MemoryCache {
    async fn insert(&self, id: &str, target: &str, ttl: Duration) -> CacheResult<()> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| CacheError::Operation(format!("ttl out of range: {:?}", ttl)))?;

        self.inner.insert(
            id.to_string(),
            Entry {
                target: target.to_string(),
                expires_at,
            },
        );

        let inserts = self.inserts.fetch_add(1, Ordering::Relaxed) + 1;
        if inserts % self.sweep_interval == 0 {
            self.sweep_expired();
        }

        Ok(())
    }

    async fn retrieve(&self, id: &str) -> CacheResult<String> {
        let now = Instant::now();

        if let Some(entry) = self.inner.get(id) {
            if entry.expires_at > now {
                return Ok(entry.target.clone());
            }
        } else {
            return Err(CacheError::Miss);
        }

        self.inner.remove_if(id, |_, entry| entry.expires_at <= now);
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
    async fn test_insert_then_retrieve() {
        let cache = MemoryCache::new();
        cache
            .insert("abc", "https://example.com", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.retrieve("abc").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_missing_key_is_miss() {
        let cache = MemoryCache::new();
        assert!(cache.retrieve("nope").await.unwrap_err().is_miss());
    }

    #[tokio::test]
    async fn test_expired_entry_is_miss_and_evicted() {
        let cache = MemoryCache::new();
        cache
            .insert("abc", "https://example.com", Duration::from_millis(20))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.retrieve("abc").await.unwrap_err().is_miss());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_insert_sweeps_expired_entries_of_other_keys() {
        let cache = MemoryCache::with_sweep_interval(3);

        for id in ["a", "b"] {
            cache
                .insert(id, "https://old.example", Duration::from_millis(20))
                .await
                .unwrap();
        }

        tokio::time::sleep(Duration::from_millis(40)).await;

        cache
            .insert("c", "https://new.example", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.retrieve("c").await.unwrap(), "https://new.example");
    }

    #[tokio::test]
    async fn test_live_entries_survive_sweep() {
        let cache = MemoryCache::with_sweep_interval(1);

        cache
            .insert("a", "https://a.example", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .insert("b", "https://b.example", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_overwrites_existing_entry() {
        let cache = MemoryCache::new();
        cache
            .insert("abc", "https://one.example", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .insert("abc", "https://two.example", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.retrieve("abc").await.unwrap(), "https://two.example");
        assert_eq!(cache.len(), 1);
    }
}
