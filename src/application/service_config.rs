//! Validated settings consumed by the shortener service.

use std::time::Duration;
use thiserror::Error;

use crate::domain::key_generator::MAX_KEY_BYTES;

/// Invalid shortener settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("short url length must be between 1 and {max} bytes, got {got}")]
    InvalidShortUrlLength { got: usize, max: usize },

    #[error("max retries on collision must be at least 1")]
    InvalidMaxRetries,

    #[error("cache expiration must be greater than zero")]
    InvalidCacheExpiration,
}

/// Immutable shortener settings, checked once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    short_url_length: usize,
    max_retries_on_collision: u32,
    cache_expiration: Duration,
}

impl ServiceConfig {
    /// Validates and builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `short_url_length` is 0 or larger than the SHA-256 digest (32 bytes)
    /// - `max_retries_on_collision` is 0
    /// - `cache_expiration` is zero
    pub fn new(
        short_url_length: usize,
        max_retries_on_collision: u32,
        cache_expiration: Duration,
    ) -> Result<Self, ConfigError> {
        if short_url_length == 0 || short_url_length > MAX_KEY_BYTES {
            return Err(ConfigError::InvalidShortUrlLength {
                got: short_url_length,
                max: MAX_KEY_BYTES,
            });
        }

        if max_retries_on_collision == 0 {
            return Err(ConfigError::InvalidMaxRetries);
        }

        if cache_expiration.is_zero() {
            return Err(ConfigError::InvalidCacheExpiration);
        }

        Ok(Self {
            short_url_length,
            max_retries_on_collision,
            cache_expiration,
        })
    }

    /// Digest truncation length in bytes.
    pub fn short_url_length(&self) -> usize {
        self.short_url_length
    }

    /// Maximum generation attempts per shorten call.
    pub fn max_retries_on_collision(&self) -> u32 {
        self.max_retries_on_collision
    }

    /// TTL applied to every cache write.
    pub fn cache_expiration(&self) -> Duration {
        self.cache_expiration
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            short_url_length: 6,
            max_retries_on_collision: 3,
            cache_expiration: Duration::from_secs(3600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ServiceConfig::new(6, 3, Duration::from_secs(60)).unwrap();
        assert_eq!(config.short_url_length(), 6);
        assert_eq!(config.max_retries_on_collision(), 3);
        assert_eq!(config.cache_expiration(), Duration::from_secs(60));
    }

    #[test]
    fn test_rejects_out_of_range_length() {
        assert_eq!(
            ServiceConfig::new(0, 3, Duration::from_secs(60)),
            Err(ConfigError::InvalidShortUrlLength { got: 0, max: 32 })
        );
        assert!(ServiceConfig::new(33, 3, Duration::from_secs(60)).is_err());
        assert!(ServiceConfig::new(32, 3, Duration::from_secs(60)).is_ok());
    }

    #[test]
    fn test_rejects_zero_retries() {
        assert_eq!(
            ServiceConfig::new(6, 0, Duration::from_secs(60)),
            Err(ConfigError::InvalidMaxRetries)
        );
    }

    #[test]
    fn test_rejects_zero_expiration() {
        assert_eq!(
            ServiceConfig::new(6, 3, Duration::ZERO),
            Err(ConfigError::InvalidCacheExpiration)
        );
    }
}
