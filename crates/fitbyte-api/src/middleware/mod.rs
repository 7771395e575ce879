//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`validation`]: schema validation of JSON request bodies ahead of binding.
//! - [`metrics`]: Prometheus recorder setup and validation outcome counters.

pub mod metrics;
pub mod validation;
