//! Errors returned by the shortener service.

use thiserror::Error;

use crate::domain::repositories::StoreError;

/// Failure of a shorten or retrieve call.
///
/// Cache failures never appear here; they are absorbed by the service.
#[derive(Debug, Error)]
pub enum ShortenerError {
    /// No record exists for the requested id.
    #[error("short url '{id}' not found")]
    NotFound { id: String },

    /// Every generated id collided with an existing record.
    #[error("no unique short id after {attempts} attempts")]
    CollisionExhausted { attempts: u32 },

    /// The durable store rejected an insert for a reason other than a duplicate id.
    #[error("failed to store short url")]
    Store(#[source] StoreError),

    /// The durable store failed while looking up an id.
    #[error("failed to retrieve short url")]
    Retrieval(#[source] StoreError),

    /// The clock produced a timestamp that cannot salt a key.
    #[error("failed to generate short id: timestamp out of range")]
    KeyGeneration,
}

impl ShortenerError {
    /// Returns true when the error reflects an infrastructure fault rather
    /// than an expected outcome such as absence.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::Retrieval(_) | Self::KeyGeneration
        )
    }
}
