use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{ReadingError, ReadingRepository};
use crate::db::models::{NewReading, Reading};

/// Records readings and answers "what was measured last".
///
/// Stateless apart from the repository handle it is built with; cloning is
/// cheap and clones share the same backend.
#[derive(Clone)]
pub struct ReadingStore {
    repo: Arc<dyn ReadingRepository>,
}

impl ReadingStore {
    pub fn new(repo: impl ReadingRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    /// Persists `input` and returns the stored record, including the
    /// backend-assigned `id` and `created_at`.
    ///
    /// No range checks happen here. A backend rejection surfaces as
    /// [`ReadingError::Validation`], any other failure as
    /// [`ReadingError::Backend`]. Nothing is retried.
    pub async fn create(&self, input: NewReading) -> Result<Reading, ReadingError> {
        match self.repo.insert(input).await {
            Ok(reading) => {
                info!(
                    id = reading.id,
                    light_value = reading.light_value,
                    smoke_value = reading.smoke_value,
                    "Reading persisted"
                );
                Ok(reading)
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist reading");
                Err(e)
            }
        }
    }

    /// The most recent reading by `created_at`, ties broken by highest `id`.
    ///
    /// Fails with [`ReadingError::NotFound`] when nothing has been recorded.
    pub async fn find_latest(&self) -> Result<Reading, ReadingError> {
        self.repo.latest().await?.ok_or_else(|| {
            debug!("No sensor readings stored yet");
            ReadingError::NotFound
        })
    }
}
