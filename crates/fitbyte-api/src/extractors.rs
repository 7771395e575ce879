//! # Custom Extractors & Binding Checks
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! typed JSON bodies in handlers. Schema validation has already run in
//! middleware by the time these are called; what remains is typed binding
//! and any bound a DTO enforces on top of its schema.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Checks a request type applies after binding.
pub trait Validate {
    /// Returns an error message on failure.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// Handlers should use:
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
///     // use req...
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and run its [`Validate`] checks.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::BadRequest)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minutes(u32);

    impl Validate for Minutes {
        fn validate(&self) -> Result<(), String> {
            if self.0 > 0 {
                Ok(())
            } else {
                Err("minutes must be positive".to_string())
            }
        }
    }

    #[test]
    fn validated_extraction_runs_checks() {
        assert!(extract_validated_json(Ok(Json(Minutes(5)))).is_ok());
        let err = extract_validated_json(Ok(Json(Minutes(0)))).err().unwrap();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("positive")));
    }
}
