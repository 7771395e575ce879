//! # Health Probes
//!
//! Unauthenticated liveness and readiness endpoints. Readiness reports how
//! many schemas the registry serves; an empty registry is not ready.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub schemas: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

/// GET /health: process is up.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthResponse)),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready: schemas are loaded and requests can be validated.
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Ready to validate", body = ReadinessResponse),
        (status = 503, description = "No schemas loaded", body = ReadinessResponse),
    ),
    tag = "health"
)]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let schemas = state.registry.len();
    if schemas == 0 {
        tracing::warn!("readiness probe failed: schema registry is empty");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "not_ready".to_string(),
                schemas,
            }),
        );
    }
    (
        StatusCode::OK,
        Json(ReadinessResponse {
            status: "ready".to_string(),
            schemas,
        }),
    )
}
