//! # API Route Modules
//!
//! - `health`: liveness and readiness probes.
//! - `schemas`: the schema catalogue and ad-hoc validation against any
//!   registered schema.
//! - `payloads`: schema-guarded dry-run endpoints for each built-in request
//!   shape: validation middleware, then typed binding.

pub mod health;
pub mod payloads;
pub mod schemas;
