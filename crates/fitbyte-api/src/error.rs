//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every client-side rejection of a request body is flattened to the same
//! `Invalid request format` message: which field failed, and why, is logged
//! server-side and never returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fitbyte_validator::Violations;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned for any rejected request body.
pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Payload failed schema validation (400).
    #[error("payload rejected: {0}")]
    InvalidPayload(Violations),

    /// Body could not be read or bound to the request type (400).
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::InvalidPayload(_) | Self::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<Violations> for AppError {
    fn from(violations: Violations) -> Self {
        Self::InvalidPayload(violations)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::NotFound(_) => self.to_string(),
            Self::InvalidPayload(_) | Self::BadRequest(_) => INVALID_REQUEST_FORMAT.to_string(),
        };

        if let Self::BadRequest(detail) = &self {
            tracing::debug!(%detail, "request body rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
