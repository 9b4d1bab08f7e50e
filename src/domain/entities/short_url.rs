//! ShortUrl entity representing a stored identifier → target mapping.

use chrono::{DateTime, Utc};

/// A shortened URL record.
///
/// Created exactly once per successful shorten call and never mutated
/// afterwards. Uniqueness of `id` is enforced by the durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: String,
    pub target: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(id: String, target: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            target,
            created_at,
        }
    }
}
