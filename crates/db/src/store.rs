//! Durable store collaborator seam.
//!
//! The ingest pipeline only ever appends alert-triggering readings; it
//! never reads them back. Keeping the sink behind a trait object lets
//! integration tests inject an in-memory double and leaves room to swap
//! the backing store without touching the pipeline.

use async_trait::async_trait;
use herdlink_core::SensorReading;

use crate::repositories::ReadingRepo;
use crate::DbPool;

/// Error type for reading persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database call failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only sink for alert-triggering readings.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn append(&self, reading: &SensorReading) -> Result<(), StoreError>;
}

/// Postgres binding of [`ReadingStore`].
pub struct PgReadingStore {
    pool: DbPool,
}

impl PgReadingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn append(&self, reading: &SensorReading) -> Result<(), StoreError> {
        let row = ReadingRepo::insert(&self.pool, reading).await?;
        tracing::debug!(id = row.id, tag = %reading.tag_number, "Persisted alert-triggering reading");
        Ok(())
    }
}
