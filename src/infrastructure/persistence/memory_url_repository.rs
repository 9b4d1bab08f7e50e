//! In-process implementation of the short URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::{StoreError, StoreResult, UrlRepository};

/// Repository keeping records in a concurrent map.
///
/// The entry API makes the existence check and the insert a single atomic
/// step per key, which gives the same uniqueness guarantee as a primary key
/// constraint. Records do not survive a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryUrlRepository {
    records: Arc<DashMap<String, ShortUrl>>,
    insert_calls: Arc<AtomicUsize>,
    retrieve_calls: Arc<AtomicUsize>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total insert attempts, successful or not.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::Relaxed)
    }

    /// Total retrieve attempts, successful or not.
    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert(&self, record: &ShortUrl) -> StoreResult<()> {
        self.insert_calls.fetch_add(1, Ordering::Relaxed);

        match self.records.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn retrieve(&self, id: &str) -> StoreResult<ShortUrl> {
        self.retrieve_calls.fetch_add(1, Ordering::Relaxed);

        self.records
            .get(id)
            .map(|r| r.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, target: &str) -> ShortUrl {
        ShortUrl::new(id.to_string(), target.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_insert_and_retrieve() {
        let repo = MemoryUrlRepository::new();
        repo.insert(&record("abc", "https://example.com"))
            .await
            .unwrap();

        let found = repo.retrieve("abc").await.unwrap();
        assert_eq!(found.target, "https://example.com");
        assert_eq!(repo.insert_calls(), 1);
        assert_eq!(repo.retrieve_calls(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let repo = MemoryUrlRepository::new();
        repo.insert(&record("abc", "https://one.example"))
            .await
            .unwrap();

        let result = repo.insert(&record("abc", "https://two.example")).await;
        assert!(matches!(result, Err(StoreError::DuplicateKey)));

        // The first record is kept untouched.
        let found = repo.retrieve("abc").await.unwrap();
        assert_eq!(found.target, "https://one.example");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_missing_is_not_found() {
        let repo = MemoryUrlRepository::new();
        let result = repo.retrieve("missing").await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_same_id_admit_exactly_one() {
        let repo = MemoryUrlRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert(&record("same", &format!("https://{i}.example")))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.insert_calls(), 16);
    }
}
