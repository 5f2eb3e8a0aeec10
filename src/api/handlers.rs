use axum::{extract::State, http::StatusCode, Json};
use utoipa::OpenApi;

use super::{
    dto::{CreateReadingRequest, ReadingDto},
    errors::AppError,
};
use crate::readings::ReadingStore;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Record a new light/smoke measurement.
#[utoipa::path(
    post,
    path = "/readings",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading stored", body = ReadingDto),
        (status = 422, description = "Missing, non-numeric or rejected values"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn create_reading(
    State(store): State<ReadingStore>,
    Json(body): Json<CreateReadingRequest>,
) -> Result<(StatusCode, Json<ReadingDto>), AppError> {
    let reading = store.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(reading.into())))
}

/// Fetch the most recently recorded measurement.
#[utoipa::path(
    get,
    path = "/readings/latest",
    responses(
        (status = 200, description = "Latest reading", body = ReadingDto),
        (status = 404, description = "No readings recorded yet"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn get_latest_reading(
    State(store): State<ReadingStore>,
) -> Result<Json<ReadingDto>, AppError> {
    let reading = store.find_latest().await?;
    Ok(Json(reading.into()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(create_reading, get_latest_reading, health),
    components(schemas(ReadingDto, CreateReadingRequest)),
    tags(
        (name = "readings", description = "Sensor reading endpoints"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Sensor Readings API",
        version = "0.1.0",
        description = "Records light and smoke measurements and serves the latest one"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
