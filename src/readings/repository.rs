use async_trait::async_trait;

use super::ReadingError;
use crate::db::models::{NewReading, Reading};

/// Persistence backend for readings.
///
/// Each method is a single round trip; atomicity is the backend's job.
#[async_trait]
pub trait ReadingRepository: Send + Sync + 'static {
    /// Insert one reading and return it with its generated `id` and `created_at`.
    async fn insert(&self, reading: NewReading) -> Result<Reading, ReadingError>;

    /// The reading with the greatest `(created_at, id)`, if any exist.
    async fn latest(&self) -> Result<Option<Reading>, ReadingError>;
}
