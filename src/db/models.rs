use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `sensor_readings` table.
///
/// `id` and `created_at` are generated by the database on insert
/// (`BIGSERIAL` and `clock_timestamp()` respectively). Records are
/// append-only and never updated after insertion.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub light_value: f64,
    pub smoke_value: f64,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a new reading.
///
/// Carries only the measured values; identity and timestamp are never
/// caller-supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub light_value: f64,
    pub smoke_value: f64,
}

impl NewReading {
    pub fn new(light_value: f64, smoke_value: f64) -> Self {
        Self { light_value, smoke_value }
    }

    /// Both values are finite (not NaN, not infinite).
    ///
    /// Mirrors the CHECK constraints on `sensor_readings`.
    pub fn is_finite(&self) -> bool {
        self.light_value.is_finite() && self.smoke_value.is_finite()
    }
}
