//! # fitbyte-validator: Payload Validation Engine
//!
//! Checks decoded JSON payloads against declarative, per-field rules before
//! they are bound into strongly-typed request objects. A generic JSON decode
//! does not fix the representation of a value (integer, unsigned, float, or a
//! numeric-looking string), so every numeric check goes through one coercion
//! step and every rule is applied per field against a data-defined [`Schema`].
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes → serde_json::Value → validate_object(schema) → validate_field × N
//! ```
//!
//! The first violation wins ([`ValidationMode::FailFast`]). Callers wanting
//! every failing field can opt into [`ValidationMode::CollectAll`].
//!
//! ## Modules
//!
//! - [`rule`]: [`Rule`] and the closed [`RuleKind`] enum.
//! - [`schema`]: ordered [`Schema`], built-in shapes ([`SchemaId`]) and the
//!   [`SchemaRegistry`].
//! - [`coerce`]: [`as_number`], the single numeric normalization point.
//! - [`format`]: email and URL checks.
//! - [`validate`]: field and object validation, [`JsonValidator`].
//! - [`error`]: [`Violation`], [`ViolationKind`] and schema load errors.
//!
//! ## Crate Policy
//!
//! - Validation is synchronous and stateless. Schemas are immutable once built
//!   and are shared across threads behind `Arc`.
//! - Accepted values are never rewritten. Coercion only feeds comparisons.
//! - Violation message text is a contract: callers and tests match on it.

pub mod coerce;
pub mod error;
pub mod format;
pub mod rule;
pub mod schema;
pub mod validate;

pub use coerce::as_number;
pub use error::{
    RuleError, SchemaError, Violation, ViolationCategory, ViolationKind, Violations, ROOT_FIELD,
};
pub use format::{is_valid_email, is_valid_url};
pub use rule::{Rule, RuleKind};
pub use schema::{Field, Schema, SchemaId, SchemaRegistry};
pub use validate::{
    validate_bytes, validate_field, validate_object, JsonValidator, ValidationMode,
};
