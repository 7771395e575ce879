//! # Rule Model
//!
//! Passive description of one field's constraints. A [`Rule`] carries a
//! closed [`RuleKind`] plus optional facets; which facets are meaningful
//! depends on the kind (length, enum and format facets on strings, bounds on
//! numbers). [`Rule::check`] rejects facet/kind combinations that could never
//! fire, so a typo in a data-defined schema fails at load time instead of
//! silently skipping a check.
//!
//! The serde representation uses the camelCase wire names of the original
//! rule documents (`type`, `notNull`, `minLength`, `isUrl`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Expected JSON shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl RuleKind {
    /// Lowercase name, as used in rule documents and violation messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint set for a single field.
///
/// `not_null` does double duty for strings: it rejects JSON `null` and also
/// the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Rule {
    /// Expected shape.
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Reject `null` (and `""` for strings).
    #[serde(default, skip_serializing_if = "is_false")]
    pub not_null: bool,
    /// Inclusive minimum string length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Inclusive maximum string length, in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Permitted string values, matched exactly. Empty means unrestricted.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_email: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_url: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Rule {
    /// A rule of the given kind with no facets set.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            not_null: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            enum_values: Vec::new(),
            is_email: false,
            is_url: false,
        }
    }

    pub fn string() -> Self {
        Self::new(RuleKind::String)
    }

    pub fn number() -> Self {
        Self::new(RuleKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(RuleKind::Boolean)
    }

    pub fn object() -> Self {
        Self::new(RuleKind::Object)
    }

    pub fn array() -> Self {
        Self::new(RuleKind::Array)
    }

    /// Reject `null`, and for strings also `""`.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Restrict a string field to an exact, case-sensitive set of values.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn email(mut self) -> Self {
        self.is_email = true;
        self
    }

    pub fn url(mut self) -> Self {
        self.is_url = true;
        self
    }

    /// Verify that every facet set on this rule can actually apply to its kind
    /// and that paired bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`] found.
    pub fn check(&self) -> Result<(), RuleError> {
        let string_facets = [
            ("minLength", self.min_length.is_some()),
            ("maxLength", self.max_length.is_some()),
            ("enum", !self.enum_values.is_empty()),
            ("isEmail", self.is_email),
            ("isUrl", self.is_url),
        ];
        let number_facets = [("min", self.min.is_some()), ("max", self.max.is_some())];

        if self.kind != RuleKind::String {
            if let Some((facet, _)) = string_facets.into_iter().find(|(_, set)| *set) {
                return Err(RuleError::FacetNotApplicable {
                    facet,
                    kind: self.kind,
                });
            }
        }
        if self.kind != RuleKind::Number {
            if let Some((facet, _)) = number_facets.into_iter().find(|(_, set)| *set) {
                return Err(RuleError::FacetNotApplicable {
                    facet,
                    kind: self.kind,
                });
            }
        }

        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(RuleError::InvertedLength { min, max });
            }
        }

        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(RuleError::NonFiniteBound(bound));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(RuleError::InvertedRange { min, max });
            }
        }

        Ok(())
    }
}
