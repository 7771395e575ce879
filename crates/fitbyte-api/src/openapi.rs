//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FitByte Payload Validation API",
        description = "Schema-driven validation of FitByte request bodies.\n\nEvery guarded route checks the raw JSON body against its schema before binding it to a typed request. Rejected bodies are answered with a generic `Invalid request format` error; the failing field is only logged server-side.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::health::health,
        crate::routes::health::ready,
        crate::routes::schemas::list_schemas,
        crate::routes::schemas::get_schema,
        crate::routes::schemas::validate_against,
        crate::routes::payloads::update_profile,
        crate::routes::payloads::create_activity,
        crate::routes::payloads::update_activity,
        crate::routes::payloads::login,
        crate::routes::payloads::register,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::routes::health::HealthResponse,
            crate::routes::health::ReadinessResponse,
            crate::dto::ProfileUpdateRequest,
            crate::dto::ActivityRequest,
            crate::dto::ActivityUpdateRequest,
            crate::dto::LoginRegisterRequest,
            crate::dto::CredentialsSummary,
            crate::dto::Preference,
            crate::dto::WeightUnit,
            crate::dto::HeightUnit,
            crate::dto::ActivityType,
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "schemas", description = "Schema catalogue and ad-hoc validation"),
        (name = "payloads", description = "Schema-guarded dry-run request routes"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
