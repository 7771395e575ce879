//! # fitbyte-api: Axum Transport for Payload Validation
//!
//! Puts the validation engine in front of typed request binding: every
//! guarded route buffers the JSON body, checks it against its schema, and
//! only then lets the handler deserialize it.
//!
//! ## API Surface
//!
//! | Route                              | Module                 | Purpose                       |
//! |------------------------------------|------------------------|-------------------------------|
//! | `GET /health`, `GET /ready`        | [`routes::health`]     | Probes                        |
//! | `GET /v1/schemas[/{name}]`         | [`routes::schemas`]    | Schema catalogue              |
//! | `POST /v1/schemas/{name}/validate` | [`routes::schemas`]    | Validate without binding      |
//! | `/v1/payloads/*`                   | [`routes::payloads`]   | Guarded dry-run routes        |
//! | `GET /metrics`                     | [`middleware::metrics`]| Prometheus scrape             |
//! | `GET /openapi.json`                | [`openapi`]            | OpenAPI document              |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → validate_payload (per route) → Handler
//! ```

pub mod dto;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// `/metrics` is mounted only when the state carries a Prometheus handle.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit;

    let mut router = Router::new()
        .merge(routes::health::router())
        .merge(routes::schemas::router())
        .merge(routes::payloads::router(&state.registry, body_limit))
        .merge(openapi::router());

    if state.metrics.is_some() {
        router = router.route("/metrics", get(middleware::metrics::prometheus_metrics));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
