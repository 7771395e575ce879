//! # Prometheus Metrics
//!
//! Validation outcomes are recorded through the `metrics` facade and exported
//! by `metrics-exporter-prometheus` at `GET /metrics`. Without an installed
//! recorder the counters are no-ops.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use fitbyte_validator::Violations;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::error::AppError;
use crate::state::AppState;

/// Counter of validation passes, labelled by schema, outcome and category.
pub const VALIDATIONS_TOTAL: &str = "fitbyte_payload_validations_total";

/// Install the global Prometheus recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_counter!(
        VALIDATIONS_TOTAL,
        "Payload validation passes by schema, outcome and violation category"
    );
    Ok(handle)
}

/// Record one validation pass.
///
/// Accepted payloads carry `category="none"`; rejections use the category of
/// the first violation.
pub fn record_validation(schema: &str, result: &Result<(), Violations>) {
    let (outcome, category) = match result {
        Ok(()) => ("accepted", "none"),
        Err(violations) => ("rejected", violations.first().category().as_str()),
    };
    metrics::counter!(
        VALIDATIONS_TOTAL,
        "schema" => schema.to_string(),
        "outcome" => outcome,
        "category" => category
    )
    .increment(1);
}

/// GET /metrics: Prometheus text exposition.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::not_found("metrics are disabled"))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
