//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, UrlCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache implementation for fast short id lookups.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Unlike a fail-open cache, errors are reported to the caller as
/// [`CacheError`] values; the shortener service decides how to absorb them.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

/// Redis expirations have one-second granularity; round sub-second TTLs up.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 { secs + 1 } else { secs.max(1) }
}

#[async_trait]
impl UrlCache for RedisCache {
    async fn insert(&self, id: &str, target: &str, ttl: Duration) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();
        let seconds = ttl_seconds(ttl);

        conn.set_ex::<_, _, ()>(&key, target, seconds)
            .await
            .map_err(|e| CacheError::Operation(format!("SET {}: {}", key, e)))?;

        debug!(id, ttl_seconds = seconds, "Cache SET");
        Ok(())
    }

    async fn retrieve(&self, id: &str) -> CacheResult<String> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(target)) => Ok(target),
            Ok(None) => Err(CacheError::Miss),
            Err(e) => Err(CacheError::Operation(format!("GET {}: {}", key, e))),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds_rounds_up() {
        assert_eq!(ttl_seconds(Duration::from_secs(60)), 60);
        assert_eq!(ttl_seconds(Duration::from_millis(1500)), 2);
        assert_eq!(ttl_seconds(Duration::from_millis(10)), 1);
        assert_eq!(ttl_seconds(Duration::ZERO), 1);
    }
}
