//! Health & readiness handlers.
//!
//! - GET /api/movieworld/health -> liveness, fixed payload plus timestamp
//! - GET /readyz                -> readiness, checks the database answers

use crate::services::movie_service::MovieService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

/// `GET /api/movieworld/health`
///
/// Always 200. Performs no I/O and does not touch the movie service.
pub async fn health() -> impl IntoResponse {
    info!("REST request for health check");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "UP",
            service: "Movie World Service",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    )
}

/// `GET /readyz`
///
/// Runs a trivial query through the store. HTTP 200 when it succeeds,
/// HTTP 503 otherwise.
pub async fn readyz(State(service): State<MovieService>) -> impl IntoResponse {
    match service.ready().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ok",
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "error",
                error: Some(e.to_string()),
            }),
        ),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}
