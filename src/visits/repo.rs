use std::{future::Future, time::Duration};

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::debug;

use crate::{error::StoreError, visits::repo_types::VisitRecord};

/// Append-only log of home-page visits.
///
/// Implementations assign `id` and `timestamp` themselves and must make an
/// insert visible to every read issued after it returned.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Create the visit relation if it is missing. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    async fn insert_visit(&self, ip_address: &str) -> Result<VisitRecord, StoreError>;

    async fn count_visits(&self) -> Result<i64, StoreError>;

    /// Up to `limit` records, newest first; equal timestamps fall back to `id` descending.
    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, StoreError>;

    /// Store-side clock. Used as a liveness probe, touches no data.
    async fn now(&self) -> Result<OffsetDateTime, StoreError>;

    /// Release the underlying connections. Called once on shutdown.
    async fn close(&self) {}
}

#[derive(Clone)]
pub struct PgVisitStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgVisitStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => Ok(res?),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl VisitStore for PgVisitStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.bounded(
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS visits (
                    id         BIGSERIAL PRIMARY KEY,
                    timestamp  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    ip_address TEXT NOT NULL
                )
                "#,
            )
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn insert_visit(&self, ip_address: &str) -> Result<VisitRecord, StoreError> {
        let record = self
            .bounded(
                sqlx::query_as::<_, VisitRecord>(
                    r#"
                    INSERT INTO visits (ip_address)
                    VALUES ($1)
                    RETURNING id, timestamp, ip_address
                    "#,
                )
                .bind(ip_address)
                .fetch_one(&self.pool),
            )
            .await?;
        debug!(visit_id = record.id, ip = %record.ip_address, "visit inserted");
        Ok(record)
    }

    async fn count_visits(&self) -> Result<i64, StoreError> {
        let total = self
            .bounded(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits").fetch_one(&self.pool))
            .await?;
        if total < 0 {
            return Err(StoreError::Invalid(format!("negative visit count {total}")));
        }
        Ok(total)
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, StoreError> {
        if limit < 0 {
            return Err(StoreError::Invalid(format!("negative limit {limit}")));
        }
        let rows = self
            .bounded(
                sqlx::query_as::<_, VisitRecord>(
                    r#"
                    SELECT id, timestamp, ip_address
                    FROM visits
                    ORDER BY timestamp DESC, id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool),
            )
            .await?;
        Ok(rows)
    }

    async fn now(&self) -> Result<OffsetDateTime, StoreError> {
        self.bounded(sqlx::query_scalar::<_, OffsetDateTime>("SELECT now()").fetch_one(&self.pool))
            .await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
