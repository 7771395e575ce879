//! # Field & Object Validation
//!
//! [`validate_field`] decides one `(name, value, rule)` triple. The order of
//! checks is fixed:
//!
//! 1. `null`: rejected if the rule is `notNull`, otherwise accepted with no
//!    further inspection.
//! 2. Shape: the value must match the rule's [`RuleKind`]. Numbers go through
//!    [`as_number`], so numeric strings satisfy `number` rules.
//! 3. Strings: emptiness (under `notNull`), inclusive length bounds, enum
//!    membership, email format, URL format.
//! 4. Numbers: inclusive `min` / `max`.
//!
//! [`validate_object`] runs every schema field in declaration order and stops
//! at the first violation. A field absent from the payload is treated exactly
//! like an explicit `null`: missing and null are not distinguished.
//!
//! [`JsonValidator`] wraps a shared schema and adds the byte-level entry point
//! plus an opt-in mode that reports every failing field.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::coerce::as_number;
use crate::error::{Violation, ViolationKind, Violations, ROOT_FIELD};
use crate::format::{is_valid_email, is_valid_url};
use crate::rule::{Rule, RuleKind};
use crate::schema::Schema;

/// Stand-in for fields the payload does not contain.
static MISSING: Value = Value::Null;

/// Validate a single field value against its rule.
///
/// Returns `None` when the value is acceptable.
pub fn validate_field(name: &str, value: &Value, rule: &Rule) -> Option<Violation> {
    if value.is_null() {
        return rule
            .not_null
            .then(|| Violation::new(name, ViolationKind::Null, Value::Null));
    }

    if !has_kind(value, rule.kind) {
        return Some(Violation::new(
            name,
            ViolationKind::TypeMismatch {
                expected: rule.kind,
            },
            value.clone(),
        ));
    }

    match (rule.kind, value) {
        (RuleKind::String, Value::String(s)) => check_string(s, rule)
            .map(|kind| Violation::new(name, kind, value.clone())),
        (RuleKind::Number, _) => as_number(value)
            .and_then(|n| check_number(n, rule))
            .map(|kind| Violation::new(name, kind, value.clone())),
        _ => None,
    }
}

fn has_kind(value: &Value, kind: RuleKind) -> bool {
    match kind {
        RuleKind::String => value.is_string(),
        RuleKind::Number => as_number(value).is_some(),
        RuleKind::Boolean => value.is_boolean(),
        RuleKind::Object => value.is_object(),
        RuleKind::Array => value.is_array(),
    }
}

fn check_string(s: &str, rule: &Rule) -> Option<ViolationKind> {
    if rule.not_null && s.is_empty() {
        return Some(ViolationKind::EmptyString);
    }

    let len = s.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Some(ViolationKind::TooShort { min });
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Some(ViolationKind::TooLong { max });
        }
    }

    if !rule.enum_values.is_empty() && !rule.enum_values.iter().any(|allowed| allowed == s) {
        return Some(ViolationKind::NotAllowed {
            allowed: rule.enum_values.clone(),
        });
    }

    if rule.is_email && !is_valid_email(s) {
        return Some(ViolationKind::InvalidEmail);
    }
    if rule.is_url && !is_valid_url(s) {
        return Some(ViolationKind::InvalidUrl);
    }

    None
}

fn check_number(n: f64, rule: &Rule) -> Option<ViolationKind> {
    if let Some(min) = rule.min {
        if n < min {
            return Some(ViolationKind::BelowMinimum { min });
        }
    }
    if let Some(max) = rule.max {
        if n > max {
            return Some(ViolationKind::AboveMaximum { max });
        }
    }
    None
}

/// Validate a decoded object against every field of `schema`, returning the
/// first violation in schema order.
pub fn validate_object(object: &Map<String, Value>, schema: &Schema) -> Option<Violation> {
    schema.fields().iter().find_map(|field| {
        let value = object.get(&field.name).unwrap_or(&MISSING);
        validate_field(&field.name, value, &field.rule)
    })
}

/// Every violation in `object`, one per failing field, in schema order.
fn collect_object(object: &Map<String, Value>, schema: &Schema) -> Vec<Violation> {
    schema
        .fields()
        .iter()
        .filter_map(|field| {
            let value = object.get(&field.name).unwrap_or(&MISSING);
            validate_field(&field.name, value, &field.rule)
        })
        .collect()
}

/// Decode `bytes` and validate the result.
///
/// Anything that is not a JSON object (unparsable bytes, arrays, scalars,
/// `null`) is reported as a single [`ROOT_FIELD`] violation before any field
/// is inspected.
pub fn validate_bytes(bytes: &[u8], schema: &Schema) -> Option<Violation> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => validate_object(&object, schema),
        _ => Some(Violation::malformed(bytes)),
    }
}

/// How many violations a validation pass reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first failing field.
    #[default]
    FailFast,
    /// Check every field and report each failure.
    CollectAll,
}

/// Validator bound to one shared schema.
///
/// Cheap to clone; `Send + Sync`.
#[derive(Debug, Clone)]
pub struct JsonValidator {
    schema: Arc<Schema>,
    mode: ValidationMode,
}

impl JsonValidator {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
            mode: ValidationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validate a raw request body.
    ///
    /// # Errors
    ///
    /// The violations found. In [`ValidationMode::FailFast`] there is exactly
    /// one; a malformed body always yields exactly one root violation.
    pub fn validate_json(&self, bytes: &[u8]) -> Result<(), Violations> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(object)) => self.validate_object(&object),
            _ => self.reject(Violations::from(Violation::malformed(bytes))),
        }
    }

    /// Validate an already-decoded value. Non-objects are malformed.
    pub fn validate_value(&self, value: &Value) -> Result<(), Violations> {
        match value {
            Value::Object(object) => self.validate_object(object),
            other => self.reject(Violations::from(Violation::new(
                ROOT_FIELD,
                ViolationKind::MalformedPayload,
                Value::String(other.to_string()),
            ))),
        }
    }

    pub fn validate_object(&self, object: &Map<String, Value>) -> Result<(), Violations> {
        let found = match self.mode {
            ValidationMode::FailFast => validate_object(object, &self.schema)
                .map(Violations::from),
            ValidationMode::CollectAll => Violations::from_vec(collect_object(object, &self.schema)),
        };
        match found {
            None => {
                tracing::trace!(schema = self.schema.name(), "payload accepted");
                Ok(())
            }
            Some(violations) => self.reject(violations),
        }
    }

    fn reject(&self, violations: Violations) -> Result<(), Violations> {
        let first = violations.first();
        tracing::debug!(
            schema = self.schema.name(),
            field = %first.field,
            category = first.category().as_str(),
            message = %first.kind,
            count = violations.len(),
            "payload rejected"
        );
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationCategory;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn null_on_not_null_field_is_rejected() {
        let v = validate_field("a", &Value::Null, &Rule::string().not_null()).unwrap();
        assert_eq!(v.kind, ViolationKind::Null);
        assert_eq!(v.value, Value::Null);
    }

    #[test]
    fn null_on_nullable_field_skips_other_facets() {
        let rule = Rule::string().min_length(5).one_of(["x"]).url();
        assert!(validate_field("a", &Value::Null, &rule).is_none());
    }

    #[test]
    fn null_check_precedes_every_other_facet() {
        let rule = Rule::number().not_null().min(10.0);
        let v = validate_field("w", &Value::Null, &rule).unwrap();
        assert_eq!(v.category(), ViolationCategory::NullViolation);
    }

    #[test]
    fn type_mismatch_names_expected_kind() {
        let v = validate_field("a", &json!(123), &Rule::string()).unwrap();
        assert_eq!(v.message(), "expected string type");
        assert_eq!(v.value, json!(123));

        let v = validate_field("b", &json!("yes"), &Rule::boolean()).unwrap();
        assert_eq!(v.message(), "expected boolean type");

        let v = validate_field("c", &json!([]), &Rule::object()).unwrap();
        assert_eq!(v.message(), "expected object type");

        let v = validate_field("d", &json!({}), &Rule::array()).unwrap();
        assert_eq!(v.message(), "expected array type");
    }

    #[test]
    fn overflowing_numeric_string_is_a_type_mismatch() {
        let rule = Rule::number().not_null().min(1.0);
        let v = validate_field("durationInMinutes", &json!("1e400"), &rule).unwrap();
        assert_eq!(
            v.kind,
            ViolationKind::TypeMismatch {
                expected: RuleKind::Number
            }
        );
        assert_eq!(v.message(), "expected number type");
        assert_eq!(v.value, json!("1e400"));
    }

    #[test]
    fn structural_kinds_accept_their_shape() {
        assert!(validate_field("o", &json!({ "k": 1 }), &Rule::object()).is_none());
        assert!(validate_field("a", &json!([1, 2]), &Rule::array()).is_none());
        assert!(validate_field("b", &json!(false), &Rule::boolean().not_null()).is_none());
    }

    #[test]
    fn numeric_string_satisfies_number_rule() {
        let rule = Rule::number().min(10.0).max(1000.0);
        assert!(validate_field("w", &json!("15"), &rule).is_none());
        let v = validate_field("w", &json!("9"), &rule).unwrap();
        assert_eq!(v.kind, ViolationKind::BelowMinimum { min: 10.0 });
        assert_eq!(v.value, json!("9"), "echoes the literal value, not the coerced one");
    }

    #[test]
    fn non_numeric_string_fails_number_type() {
        let v = validate_field("w", &json!("notANumber"), &Rule::number()).unwrap();
        assert_eq!(v.message(), "expected number type");
    }

    #[test]
    fn empty_string_reuses_not_null_flag() {
        let v = validate_field("p", &json!(""), &Rule::string().not_null()).unwrap();
        assert_eq!(v.kind, ViolationKind::EmptyString);
        assert!(validate_field("p", &json!(""), &Rule::string()).is_none());
    }

    #[test]
    fn empty_string_reported_before_enum() {
        let rule = Rule::string().not_null().one_of(["KG", "LBS"]);
        let v = validate_field("u", &json!(""), &rule).unwrap();
        assert_eq!(v.message(), "field cannot be empty");
    }

    #[test]
    fn length_counts_characters() {
        let rule = Rule::string().min_length(2).max_length(3);
        assert!(validate_field("n", &json!("éé"), &rule).is_none());
        assert!(validate_field("n", &json!("日本語"), &rule).is_none());
        assert_eq!(
            validate_field("n", &json!("日本語!"), &rule).unwrap().kind,
            ViolationKind::TooLong { max: 3 }
        );
    }

    #[test]
    fn enum_is_case_sensitive() {
        let rule = Rule::string().one_of(["CARDIO", "WEIGHT"]);
        assert!(validate_field("p", &json!("CARDIO"), &rule).is_none());
        let v = validate_field("p", &json!("cardio"), &rule).unwrap();
        assert_eq!(v.message(), "must be one of: CARDIO, WEIGHT");
    }

    #[test]
    fn email_and_url_formats() {
        let email = Rule::string().email();
        assert!(validate_field("e", &json!("jo@example.com"), &email).is_none());
        assert_eq!(
            validate_field("e", &json!("jo@"), &email).unwrap().kind,
            ViolationKind::InvalidEmail
        );

        let url = Rule::string().url();
        assert!(validate_field("u", &json!("https://example.com/a.png"), &url).is_none());
        assert_eq!(
            validate_field("u", &json!("ftp://example.com"), &url).unwrap().kind,
            ViolationKind::InvalidUrl
        );
    }

    #[test]
    fn length_checked_before_format() {
        let rule = Rule::string().min_length(30).url();
        let v = validate_field("u", &json!("https://a.io"), &rule).unwrap();
        assert_eq!(v.category(), ViolationCategory::LengthViolation);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let rule = Rule::number().min(10.0).max(1000.0);
        assert!(validate_field("w", &json!(10), &rule).is_none());
        assert!(validate_field("w", &json!(1000), &rule).is_none());
        assert_eq!(
            validate_field("w", &json!(1001), &rule).unwrap().message(),
            "maximum value is 1000"
        );
        assert_eq!(
            validate_field("w", &json!(9.99), &rule).unwrap().message(),
            "minimum value is 10"
        );
    }

    #[test]
    fn missing_field_is_treated_as_null() {
        let schema = Schema::new("t").field("a", Rule::string().not_null());
        let missing = validate_object(&Map::new(), &schema).unwrap();
        let explicit = validate_object(&object(json!({ "a": null })), &schema).unwrap();
        assert_eq!(missing, explicit);
        assert_eq!(missing.kind, ViolationKind::Null);
    }

    #[test]
    fn fail_fast_reports_first_field_in_schema_order() {
        let schema = Schema::new("t")
            .field("b", Rule::number().not_null())
            .field("a", Rule::string().not_null());
        let v = validate_object(&Map::new(), &schema).unwrap();
        assert_eq!(v.field, "b");
    }

    #[test]
    fn fields_outside_schema_are_ignored() {
        let schema = Schema::new("t").field("a", Rule::string());
        let payload = object(json!({ "a": "x", "extra": [1, 2, 3] }));
        assert!(validate_object(&payload, &schema).is_none());
    }

    #[test]
    fn validate_bytes_rejects_non_objects_at_root() {
        let schema = Schema::new("t").field("a", Rule::string());
        let bodies: [&[u8]; 6] = [b"[1,2]", b"not json", b"42", b"\"s\"", b"null", b""];
        for body in bodies {
            let v = validate_bytes(body, &schema).unwrap();
            assert!(v.is_root(), "{:?} should be a root violation", body);
            assert_eq!(v.message(), "invalid JSON format");
        }
    }

    #[test]
    fn validate_bytes_root_check_ignores_schema_contents() {
        let empty = Schema::new("empty");
        assert!(validate_bytes(b"[]", &empty).unwrap().is_root());
        assert!(validate_bytes(b"{}", &empty).is_none());
    }

    #[test]
    fn collect_all_reports_each_failing_field() {
        let schema = Schema::new("t")
            .field("a", Rule::string().not_null())
            .field("b", Rule::number().max(1.0))
            .field("c", Rule::boolean());
        let validator = JsonValidator::new(schema).with_mode(ValidationMode::CollectAll);
        let err = validator
            .validate_json(br#"{"b": 5, "c": true}"#)
            .unwrap_err();
        let fields: Vec<&str> = err.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn fail_fast_validator_reports_exactly_one() {
        let schema = Schema::new("t")
            .field("a", Rule::string().not_null())
            .field("b", Rule::string().not_null());
        let err = JsonValidator::new(schema).validate_json(b"{}").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.first().field, "a");
    }

    #[test]
    fn collect_all_still_single_root_violation() {
        let schema = Schema::new("t")
            .field("a", Rule::string().not_null())
            .field("b", Rule::string().not_null());
        let validator = JsonValidator::new(schema).with_mode(ValidationMode::CollectAll);
        let err = validator.validate_json(b"[]").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.first().is_root());
    }

    #[test]
    fn validate_value_rejects_scalars() {
        let validator = JsonValidator::new(Schema::new("t"));
        let err = validator.validate_value(&json!(7)).unwrap_err();
        assert_eq!(err.first().value, json!("7"));
        assert!(validator.validate_value(&json!({})).is_ok());
    }

    #[test]
    fn validator_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonValidator>();
        assert_send_sync::<Arc<Schema>>();
    }
}
