use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{NewReading, Reading};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDto {
    pub id: i64,
    /// Light intensity, producer-defined scale.
    pub light_value: f64,
    /// Smoke level, producer-defined scale.
    pub smoke_value: f64,
    /// Assigned by the server when the reading was stored.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /readings`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    pub light_value: f64,
    pub smoke_value: f64,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            id: r.id,
            light_value: r.light_value,
            smoke_value: r.smoke_value,
            created_at: r.created_at,
        }
    }
}

impl From<CreateReadingRequest> for NewReading {
    fn from(req: CreateReadingRequest) -> Self {
        NewReading::new(req.light_value, req.smoke_value)
    }
}
