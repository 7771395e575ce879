//! # Numeric Coercion
//!
//! A decoded JSON number may be backed by an `i64`, a `u64` or an `f64`
//! depending on its literal. Range checks need one comparable type, so every
//! representation is widened to `f64` here.
//!
//! Strings that parse as a floating-point literal are numeric too: `"15"`
//! passes a `number` rule. This is long-standing accepted behaviour and
//! callers rely on it. The coerced value is only used for comparison; the
//! payload itself is never rewritten.

use serde_json::Value;

/// Normalize a decoded value to `f64`, or `None` if it is not numeric.
///
/// Booleans, `null`, objects, arrays and non-numeric strings are `None`.
/// String parsing follows `f64::from_str`: no surrounding whitespace, and
/// `"NaN"` / `"inf"` are accepted as numeric. A finite literal that overflows
/// `f64` (`"1e400"`) is out of range and therefore not numeric.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i as f64)
            } else if let Some(u) = n.as_u64() {
                Some(u as f64)
            } else {
                n.as_f64()
            }
        }
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() || is_infinity_literal(s)),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_infinity_literal(s: &str) -> bool {
    s.trim_start_matches(['+', '-'])
        .to_ascii_lowercase()
        .starts_with("inf")
}
