use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use linkshrink::domain::entities::ShortUrl;
use linkshrink::domain::repositories::{StoreError, UrlRepository};
use linkshrink::infrastructure::persistence::PgUrlRepository;

fn record(id: &str, target: &str) -> ShortUrl {
    // Postgres keeps microseconds; use a whole-second timestamp so it round-trips.
    let created_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    ShortUrl::new(id.to_string(), target.to_string(), created_at)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_and_retrieve(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert(&record("abc123", "https://example.com"))
        .await
        .unwrap();

    let found = repo.retrieve("abc123").await.unwrap();
    assert_eq!(found, record("abc123", "https://example.com"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_duplicate_id_is_duplicate_key(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.insert(&record("abc123", "https://one.example"))
        .await
        .unwrap();

    let result = repo.insert(&record("abc123", "https://two.example")).await;

    assert!(matches!(result, Err(StoreError::DuplicateKey)));

    let found = repo.retrieve("abc123").await.unwrap();
    assert_eq!(found.target, "https://one.example");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_retrieve_missing_id_is_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.retrieve("missing").await;

    assert!(matches!(result, Err(StoreError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
