//! # Schema Catalogue
//!
//! Lists the registered schemas, serves their documents, and validates an
//! arbitrary body against any of them without binding it to a type. Useful
//! for schemas loaded from `FITBYTE_SCHEMA_DIR`, which have no typed route.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use fitbyte_validator::{JsonValidator, Schema};

use crate::error::{AppError, ErrorBody};
use crate::middleware::metrics::record_validation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/schemas", get(list_schemas))
        .route("/v1/schemas/{name}", get(get_schema))
        .route("/v1/schemas/{name}/validate", post(validate_against))
}

fn lookup(state: &AppState, name: &str) -> Result<std::sync::Arc<Schema>, AppError> {
    state
        .registry
        .get(name)
        .ok_or_else(|| AppError::not_found(format!("schema '{name}'")))
}

/// GET /v1/schemas: registered schema names, sorted.
#[utoipa::path(
    get,
    path = "/v1/schemas",
    responses((status = 200, description = "Schema names", body = Vec<String>)),
    tag = "schemas"
)]
pub async fn list_schemas(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.registry.names().into_iter().map(String::from).collect())
}

/// GET /v1/schemas/{name}: the schema document.
#[utoipa::path(
    get,
    path = "/v1/schemas/{name}",
    params(("name" = String, Path, description = "Schema name")),
    responses(
        (status = 200, description = "Schema document: name and ordered field rules"),
        (status = 404, description = "Unknown schema", body = ErrorBody),
    ),
    tag = "schemas"
)]
pub async fn get_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Schema>, AppError> {
    let schema = lookup(&state, &name)?;
    Ok(Json(Schema::clone(&schema)))
}

/// POST /v1/schemas/{name}/validate: validate a body without binding it.
#[utoipa::path(
    post,
    path = "/v1/schemas/{name}/validate",
    params(("name" = String, Path, description = "Schema name")),
    request_body(content = String, content_type = "application/json", description = "Payload to check"),
    responses(
        (status = 204, description = "Payload is valid"),
        (status = 400, description = "Payload rejected", body = ErrorBody),
        (status = 404, description = "Unknown schema", body = ErrorBody),
    ),
    tag = "schemas"
)]
pub async fn validate_against(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let schema = lookup(&state, &name)?;
    let result = JsonValidator::new(schema).validate_json(&body);
    record_validation(&name, &result);
    if let Err(violations) = &result {
        let first = violations.first();
        tracing::debug!(
            schema = %name,
            field = %first.field,
            category = first.category().as_str(),
            error = %first.message(),
            "payload validation failed"
        );
    }
    result?;
    Ok(StatusCode::NO_CONTENT)
}
