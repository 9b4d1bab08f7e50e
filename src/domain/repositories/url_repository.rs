//! Repository trait for durable short URL storage.

use crate::domain::entities::ShortUrl;
use async_trait::async_trait;
use thiserror::Error;

/// Failure categories reported by a durable store adapter.
///
/// Adapters translate their backend's native signals into these variants;
/// in particular a uniqueness violation on the identifier must surface as
/// [`StoreError::DuplicateKey`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("short url id already exists")]
    DuplicateKey,

    #[error("short url id not found")]
    NotFound,

    #[error("failed to insert short url: {0}")]
    Insert(String),

    #[error("failed to retrieve short url: {0}")]
    Retrieve(String),
}

/// Result type for durable store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable identifier → target mapping with uniqueness enforced on the id.
///
/// Implementations must be safe to call concurrently; collision handling
/// relies entirely on the backend rejecting a second insert of the same id.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if `record.id` already exists.
    /// Returns [`StoreError::Insert`] on any other failure.
    async fn insert(&self, record: &ShortUrl) -> StoreResult<()>;

    /// Looks up a record by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this id.
    /// Returns [`StoreError::Retrieve`] on any other failure.
    async fn retrieve(&self, id: &str) -> StoreResult<ShortUrl>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
