//! # Payload Validation Middleware
//!
//! Buffers a JSON request body, runs it through the route's schema, and
//! re-presents the untouched bytes to the handler. Handlers behind this
//! layer only ever bind bodies that already passed validation.
//!
//! Requests are inspected only when `Content-Type` mentions
//! `application/json` and the body is non-empty; anything else is passed
//! through and left for the handler's own extractor to reject.

use std::sync::Arc;

use axum::body::{self, Body};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use fitbyte_validator::{JsonValidator, Schema};

use crate::error::AppError;
use crate::middleware::metrics::record_validation;

/// Middleware state: the schema a route is guarded by.
#[derive(Debug, Clone)]
pub struct PayloadGuard {
    validator: JsonValidator,
    body_limit: usize,
}

impl PayloadGuard {
    pub fn new(schema: Arc<Schema>, body_limit: usize) -> Self {
        Self {
            validator: JsonValidator::new(schema),
            body_limit,
        }
    }

    pub fn schema_name(&self) -> &str {
        self.validator.schema().name()
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

/// Validate the request body against the guard's schema.
pub async fn validate_payload(
    State(guard): State<PayloadGuard>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !is_json(request.headers()) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, guard.body_limit)
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read request body: {e}")))?;

    if !bytes.is_empty() {
        let result = guard.validator.validate_json(&bytes);
        record_validation(guard.schema_name(), &result);
        if let Err(violations) = result {
            let first = violations.first();
            tracing::debug!(
                schema = guard.schema_name(),
                method = %parts.method,
                path = %parts.uri.path(),
                field = %first.field,
                category = first.category().as_str(),
                error = %first.message(),
                "payload validation failed"
            );
            return Err(AppError::InvalidPayload(violations));
        }
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
