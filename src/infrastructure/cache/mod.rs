//! Caching layer for fast short id lookups.
//!
//! Provides a [`UrlCache`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process cache for single-node runs and tests
//! - [`NullCache`] - No-op implementation when caching is disabled

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, UrlCache};

#[cfg(test)]
pub use service::MockUrlCache;
