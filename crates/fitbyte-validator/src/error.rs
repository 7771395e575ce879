//! # Error Types
//!
//! Two families live here:
//!
//! - [`Violation`]: why a payload was rejected. One field, one message, and
//!   the literal offending value echoed back for diagnostics. The message text
//!   is produced by [`ViolationKind`]'s `Display` and is a stable contract.
//! - [`RuleError`] / [`SchemaError`]: why a schema could not be built or
//!   loaded. These are operator errors, never client-facing.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::rule::RuleKind;

/// Field name used for violations that concern the payload as a whole.
pub const ROOT_FIELD: &str = "root";

/// What went wrong with a single field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// The body did not decode as a JSON object.
    #[error("invalid JSON format")]
    MalformedPayload,

    #[error("field cannot be null")]
    Null,

    /// Empty string on a `notNull` string field.
    #[error("field cannot be empty")]
    EmptyString,

    #[error("expected {expected} type")]
    TypeMismatch { expected: RuleKind },

    #[error("minimum length is {min}")]
    TooShort { min: usize },

    #[error("maximum length is {max}")]
    TooLong { max: usize },

    #[error("must be one of: {}", .allowed.join(", "))]
    NotAllowed { allowed: Vec<String> },

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid URL format")]
    InvalidUrl,

    #[error("minimum value is {min}")]
    BelowMinimum { min: f64 },

    #[error("maximum value is {max}")]
    AboveMaximum { max: f64 },
}

/// Coarse classification of a [`ViolationKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCategory {
    MalformedPayload,
    NullViolation,
    EmptyStringViolation,
    TypeMismatch,
    RangeViolation,
    LengthViolation,
    EnumViolation,
    FormatViolation,
}

impl ViolationCategory {
    /// Stable snake_case label, suitable for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedPayload => "malformed_payload",
            Self::NullViolation => "null",
            Self::EmptyStringViolation => "empty_string",
            Self::TypeMismatch => "type_mismatch",
            Self::RangeViolation => "range",
            Self::LengthViolation => "length",
            Self::EnumViolation => "enum",
            Self::FormatViolation => "format",
        }
    }
}

impl ViolationKind {
    pub fn category(&self) -> ViolationCategory {
        match self {
            Self::MalformedPayload => ViolationCategory::MalformedPayload,
            Self::Null => ViolationCategory::NullViolation,
            Self::EmptyString => ViolationCategory::EmptyStringViolation,
            Self::TypeMismatch { .. } => ViolationCategory::TypeMismatch,
            Self::TooShort { .. } | Self::TooLong { .. } => ViolationCategory::LengthViolation,
            Self::NotAllowed { .. } => ViolationCategory::EnumViolation,
            Self::InvalidEmail | Self::InvalidUrl => ViolationCategory::FormatViolation,
            Self::BelowMinimum { .. } | Self::AboveMaximum { .. } => {
                ViolationCategory::RangeViolation
            }
        }
    }
}

/// A single rejected field.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("validation failed for field '{field}': {kind}")]
pub struct Violation {
    /// Offending field name, or [`ROOT_FIELD`].
    pub field: String,
    pub kind: ViolationKind,
    /// The value exactly as decoded.
    pub value: Value,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, value: Value) -> Self {
        Self {
            field: field.into(),
            kind,
            value,
        }
    }

    /// Root-level violation for a body that is not a JSON object. The raw
    /// bytes are echoed as a (lossily decoded) string.
    pub fn malformed(raw: &[u8]) -> Self {
        Self::new(
            ROOT_FIELD,
            ViolationKind::MalformedPayload,
            Value::String(String::from_utf8_lossy(raw).into_owned()),
        )
    }

    /// Human-readable message, e.g. `minimum value is 10`.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn category(&self) -> ViolationCategory {
        self.kind.category()
    }

    pub fn is_root(&self) -> bool {
        self.field == ROOT_FIELD && self.kind == ViolationKind::MalformedPayload
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Violation", 3)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

/// Non-empty set of violations, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns `None` when there is nothing to report.
    pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn first(&self) -> &Violation {
        // Construction guarantees at least one element.
        &self.violations[0]
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", v.field, v.kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

/// A rule whose facets contradict its kind or each other.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("facet '{facet}' does not apply to {kind} rules")]
    FacetNotApplicable { facet: &'static str, kind: RuleKind },

    #[error("minLength {min} exceeds maxLength {max}")]
    InvertedLength { min: usize, max: usize },

    #[error("min {min} exceeds max {max}")]
    InvertedRange { min: f64, max: f64 },

    #[error("numeric bound must be finite, got {0}")]
    NonFiniteBound(f64),
}

/// Failure to build, load, or register a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid rule for field '{field}' in schema '{schema}': {source}")]
    InvalidRule {
        schema: String,
        field: String,
        #[source]
        source: RuleError,
    },

    #[error("schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },

    #[error("schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    #[error("schema document error for '{path}': {reason}")]
    Document { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
