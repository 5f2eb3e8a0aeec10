use async_trait::async_trait;
use sqlx::{error::ErrorKind, PgPool};

use super::{ReadingError, ReadingRepository};
use crate::db::models::{NewReading, Reading};

/// [`ReadingRepository`] backed by the `sensor_readings` Postgres table.
#[derive(Clone)]
pub struct PgReadingRepository {
    pool: PgPool,
}

impl PgReadingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingRepository for PgReadingRepository {
    async fn insert(&self, reading: NewReading) -> Result<Reading, ReadingError> {
        sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO sensor_readings (light_value, smoke_value)
            VALUES ($1, $2)
            RETURNING id, light_value, smoke_value, created_at
            "#,
        )
        .bind(reading.light_value)
        .bind(reading.smoke_value)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn latest(&self) -> Result<Option<Reading>, ReadingError> {
        let row = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, light_value, smoke_value, created_at
            FROM sensor_readings
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Constraint violations become [`ReadingError::Validation`]; everything else
/// is passed through untouched.
fn map_write_error(e: sqlx::Error) -> ReadingError {
    if let sqlx::Error::Database(db) = &e {
        if matches!(db.kind(), ErrorKind::CheckViolation | ErrorKind::NotNullViolation) {
            return ReadingError::Validation(db.message().to_owned());
        }
    }
    ReadingError::Backend(e)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sqlx::PgPool;

    use super::*;

    async fn insert_at(pool: &PgPool, light: f64, smoke: f64, ts: chrono::DateTime<Utc>) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO sensor_readings (light_value, smoke_value, created_at) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(light)
        .bind(smoke)
        .bind(ts)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn latest_is_none_on_empty_table(pool: PgPool) {
        let repo = PgReadingRepository::new(pool);
        assert!(repo.latest().await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn insert_assigns_id_and_timestamp(pool: PgPool) {
        let repo = PgReadingRepository::new(pool);

        let first = repo.insert(NewReading::new(123.4, 5.6)).await.unwrap();
        let second = repo.insert(NewReading::new(200.0, 1.0)).await.unwrap();

        assert_eq!(first.light_value, 123.4);
        assert_eq!(first.smoke_value, 5.6);
        assert!(second.id > first.id);
        assert!(second.created_at >= first.created_at);

        let latest = repo.latest().await.unwrap().unwrap();
        assert_eq!(latest, second);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn latest_orders_by_created_at_not_id(pool: PgPool) {
        let newer = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
        let newer_id = insert_at(&pool, 1.0, 1.0, newer).await;
        insert_at(&pool, 2.0, 2.0, older).await;

        let repo = PgReadingRepository::new(pool);
        let latest = repo.latest().await.unwrap().unwrap();
        assert_eq!(latest.id, newer_id);
        assert_eq!(latest.light_value, 1.0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn equal_timestamps_break_ties_by_highest_id(pool: PgPool) {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        insert_at(&pool, 1.0, 1.0, ts).await;
        let last_id = insert_at(&pool, 2.0, 2.0, ts).await;

        let repo = PgReadingRepository::new(pool);
        let latest = repo.latest().await.unwrap().unwrap();
        assert_eq!(latest.id, last_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn non_finite_value_is_a_validation_failure(pool: PgPool) {
        let repo = PgReadingRepository::new(pool);

        let err = repo.insert(NewReading::new(f64::NAN, 1.0)).await.unwrap_err();
        assert!(matches!(err, ReadingError::Validation(_)), "got {err:?}");
        assert!(repo.latest().await.unwrap().is_none());
    }
}
