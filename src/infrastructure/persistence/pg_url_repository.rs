//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::{StoreError, StoreResult, UrlRepository};

/// PostgreSQL repository for short URL storage and retrieval.
///
/// The `urls.id` primary key is the uniqueness guarantee the collision retry
/// loop depends on; a violation (SQLSTATE 23505) is reported as
/// [`StoreError::DuplicateKey`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Returns true when the error is a unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation(&e) {
        return StoreError::DuplicateKey;
    }

    error!("Database insert failed: {}", e);
    StoreError::Insert(e.to_string())
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, record: &ShortUrl) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO urls (id, url, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.id)
        .bind(&record.target)
        .bind(record.created_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn retrieve(&self, id: &str) -> StoreResult<ShortUrl> {
        let row = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
            r#"
            SELECT id, url, created_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            error!("Database retrieve failed: {}", e);
            StoreError::Retrieve(e.to_string())
        })?;

        row.map(|(id, url, created_at)| ShortUrl::new(id, url, created_at))
            .ok_or(StoreError::NotFound)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
