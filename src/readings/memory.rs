use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{ReadingError, ReadingRepository};
use crate::db::models::{NewReading, Reading};

/// In-process [`ReadingRepository`] holding every reading in insertion order.
///
/// Behaves like the `sensor_readings` table: ids start at 1 and increase by
/// one, `created_at` never goes backwards, and non-finite values are
/// rejected. Clones share the same storage.
#[derive(Clone)]
pub struct MemoryReadingRepository {
    rows: Arc<RwLock<Vec<Reading>>>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for MemoryReadingRepository {
    fn default() -> Self {
        Self::with_clock(Utc::now)
    }
}

impl MemoryReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `clock` instead of the system time for `created_at`.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            rows: Arc::default(),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ReadingRepository for MemoryReadingRepository {
    async fn insert(&self, reading: NewReading) -> Result<Reading, ReadingError> {
        if !reading.is_finite() {
            return Err(ReadingError::Validation(
                "light_value and smoke_value must be finite numbers".to_owned(),
            ));
        }

        let mut rows = self.rows.write().await;
        let now = (self.clock)();
        let created_at = rows.last().map_or(now, |prev| prev.created_at.max(now));

        let row = Reading {
            id: rows.len() as i64 + 1,
            light_value: reading.light_value,
            smoke_value: reading.smoke_value,
            created_at,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn latest(&self) -> Result<Option<Reading>, ReadingError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .max_by_key(|r| (r.created_at, r.id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn empty_repository_has_no_latest() {
        let repo = MemoryReadingRepository::new();
        assert!(repo.latest().await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let repo = MemoryReadingRepository::new();
        let a = repo.insert(NewReading::new(1.0, 1.0)).await.unwrap();
        let b = repo.insert(NewReading::new(2.0, 2.0)).await.unwrap();
        let c = repo.insert(NewReading::new(3.0, 3.0)).await.unwrap();

        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
        assert!(a.created_at <= b.created_at && b.created_at <= c.created_at);
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn equal_timestamps_break_ties_by_highest_id() {
        let repo = MemoryReadingRepository::with_clock(fixed_clock);
        repo.insert(NewReading::new(1.0, 1.0)).await.unwrap();
        let last = repo.insert(NewReading::new(2.0, 2.0)).await.unwrap();

        let latest = repo.latest().await.unwrap().unwrap();
        assert_eq!(latest.created_at, fixed_clock());
        assert_eq!(latest.id, last.id);
    }

    #[tokio::test]
    async fn rejects_non_finite_values_without_storing() {
        let repo = MemoryReadingRepository::new();
        let err = repo
            .insert(NewReading::new(1.0, f64::NAN))
            .await
            .unwrap_err();

        assert!(matches!(err, ReadingError::Validation(_)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let repo = MemoryReadingRepository::new();
        let clone = repo.clone();

        repo.insert(NewReading::new(10.0, 0.5)).await.unwrap();

        let got = clone.latest().await.unwrap().unwrap();
        assert_eq!(got.light_value, 10.0);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let repo = MemoryReadingRepository::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(NewReading::new(i as f64, 0.0)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
