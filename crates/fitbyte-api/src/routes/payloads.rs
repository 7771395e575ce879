//! # Guarded Payload Routes
//!
//! One dry-run endpoint per built-in request shape. Each route sits behind
//! [`validate_payload`] with its own schema, so a handler only binds bodies
//! that already passed validation. Nothing is persisted: a passing request is
//! answered with the schema name and the bound request.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::middleware::from_fn_with_state;
use axum::routing::{patch, post, MethodRouter};
use axum::{Json, Router};
use fitbyte_validator::{SchemaId, SchemaRegistry};

use crate::dto::{
    Accepted, ActivityRequest, ActivityUpdateRequest, CredentialsSummary, LoginRegisterRequest,
    ProfileUpdateRequest,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::extract_validated_json;
use crate::middleware::validation::{validate_payload, PayloadGuard};
use crate::state::AppState;

pub fn router(registry: &SchemaRegistry, body_limit: usize) -> Router<AppState> {
    let guarded = |route: MethodRouter<AppState>, id: SchemaId| {
        let schema = registry
            .get(id.as_str())
            .unwrap_or_else(|| Arc::new(id.schema()));
        route.layer(from_fn_with_state(
            PayloadGuard::new(schema, body_limit),
            validate_payload,
        ))
    };

    Router::new()
        .route(
            "/v1/payloads/profile",
            guarded(post(update_profile), ProfileUpdateRequest::SCHEMA),
        )
        .route(
            "/v1/payloads/activity",
            guarded(post(create_activity), ActivityRequest::SCHEMA).merge(guarded(
                patch(update_activity),
                ActivityUpdateRequest::SCHEMA,
            )),
        )
        .route(
            "/v1/payloads/login",
            guarded(post(login), SchemaId::Login),
        )
        .route(
            "/v1/payloads/register",
            guarded(post(register), SchemaId::Register),
        )
}

/// POST /v1/payloads/profile: validate and bind a profile update.
#[utoipa::path(
    post,
    path = "/v1/payloads/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Payload accepted", body = Accepted<ProfileUpdateRequest>),
        (status = 400, description = "Invalid request format", body = ErrorBody),
    ),
    tag = "payloads"
)]
pub async fn update_profile(
    body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> Result<Json<Accepted<ProfileUpdateRequest>>, AppError> {
    let request = extract_validated_json(body)?;
    Ok(Json(Accepted::new(ProfileUpdateRequest::SCHEMA, request)))
}

/// POST /v1/payloads/activity: validate and bind a new activity.
#[utoipa::path(
    post,
    path = "/v1/payloads/activity",
    request_body = ActivityRequest,
    responses(
        (status = 200, description = "Payload accepted", body = Accepted<ActivityRequest>),
        (status = 400, description = "Invalid request format", body = ErrorBody),
    ),
    tag = "payloads"
)]
pub async fn create_activity(
    body: Result<Json<ActivityRequest>, JsonRejection>,
) -> Result<Json<Accepted<ActivityRequest>>, AppError> {
    let request = extract_validated_json(body)?;
    Ok(Json(Accepted::new(ActivityRequest::SCHEMA, request)))
}

/// PATCH /v1/payloads/activity: validate and bind an activity update.
#[utoipa::path(
    patch,
    path = "/v1/payloads/activity",
    request_body = ActivityUpdateRequest,
    responses(
        (status = 200, description = "Payload accepted", body = Accepted<ActivityUpdateRequest>),
        (status = 400, description = "Invalid request format", body = ErrorBody),
    ),
    tag = "payloads"
)]
pub async fn update_activity(
    body: Result<Json<ActivityUpdateRequest>, JsonRejection>,
) -> Result<Json<Accepted<ActivityUpdateRequest>>, AppError> {
    let request = extract_validated_json(body)?;
    Ok(Json(Accepted::new(ActivityUpdateRequest::SCHEMA, request)))
}

/// POST /v1/payloads/login: validate and bind login credentials.
#[utoipa::path(
    post,
    path = "/v1/payloads/login",
    request_body = LoginRegisterRequest,
    responses(
        (status = 200, description = "Payload accepted", body = Accepted<CredentialsSummary>),
        (status = 400, description = "Invalid request format", body = ErrorBody),
    ),
    tag = "payloads"
)]
pub async fn login(
    body: Result<Json<LoginRegisterRequest>, JsonRejection>,
) -> Result<Json<Accepted<CredentialsSummary>>, AppError> {
    credentials(SchemaId::Login, body)
}

/// POST /v1/payloads/register: validate and bind registration credentials.
#[utoipa::path(
    post,
    path = "/v1/payloads/register",
    request_body = LoginRegisterRequest,
    responses(
        (status = 200, description = "Payload accepted", body = Accepted<CredentialsSummary>),
        (status = 400, description = "Invalid request format", body = ErrorBody),
    ),
    tag = "payloads"
)]
pub async fn register(
    body: Result<Json<LoginRegisterRequest>, JsonRejection>,
) -> Result<Json<Accepted<CredentialsSummary>>, AppError> {
    credentials(SchemaId::Register, body)
}

fn credentials(
    schema: SchemaId,
    body: Result<Json<LoginRegisterRequest>, JsonRejection>,
) -> Result<Json<Accepted<CredentialsSummary>>, AppError> {
    let request = extract_validated_json(body)?;
    Ok(Json(Accepted::new(schema, CredentialsSummary::from(request))))
}
