//! Validated JSON extractor.
//!
//! Combines deserialization with `validator` checks; every failed rule
//! becomes an entry in the envelope's `validation` array.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON extractor with automatic validation.
///
/// Works with any type implementing both `serde::Deserialize` and
/// `validator::Validate`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        data.validate()?;
        Ok(Self::new(data))
    }
}

/// Formats length validation errors with the bounds that were violated.
fn format_length_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    let as_u64 = |value: &serde_json::Value| value.as_u64().unwrap_or(0);

    match (params.get("min"), params.get("max")) {
        (Some(min), Some(max)) => format!(
            "Field '{}' must be between {} and {} characters long",
            field,
            as_u64(min),
            as_u64(max)
        ),
        (Some(min), None) => format!(
            "Field '{}' must be at least {} characters long",
            field,
            as_u64(min)
        ),
        (None, Some(max)) => format!(
            "Field '{}' must be at most {} characters long",
            field,
            as_u64(max)
        ),
        _ => format!("Field '{}' has invalid length", field),
    }
}

/// Formats a single validation error into a user-facing message.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{}': {}", field, custom_message);
    }

    let message = match error.code.as_ref() {
        "required" => "is required and cannot be empty".to_string(),
        "length" => return format_length_error(field, &error.params),
        "email" => "must be a valid email address".to_string(),
        "url" => "must be a valid URL".to_string(),
        "regex" => "has an invalid format".to_string(),
        code => format!("failed validation: {}", code),
    };

    format!("Field '{}' {}", field, message)
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let entries: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();

        tracing::debug!(
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        ErrorKind::BadRequest.into_error().with_validation_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct SamplePayload {
        #[validate(length(min = 1, message = "Username is required"))]
        username: String,
        #[validate(email)]
        email: Option<String>,
    }

    #[test]
    fn validation_errors_fill_the_validation_array() {
        let payload = SamplePayload {
            username: String::new(),
            email: Some("not-an-email".to_string()),
        };

        let errors = payload.validate().unwrap_err();
        let error = Error::from(errors);

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.validation().len(), 2);
        assert!(
            error
                .validation()
                .iter()
                .any(|entry| entry.contains("Username is required"))
        );
        assert!(
            error
                .validation()
                .iter()
                .any(|entry| entry.contains("valid email address"))
        );
    }

    #[test]
    fn valid_payload_passes() {
        let payload = SamplePayload {
            username: "alice".to_string(),
            email: None,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn length_error_formatting() {
        let mut error = validator::ValidationError::new("length");
        error.add_param(Cow::Borrowed("min"), &2);
        error.add_param(Cow::Borrowed("max"), &32);

        let message = format_validation_error("username", &error);
        assert_eq!(
            message,
            "Field 'username' must be between 2 and 32 characters long"
        );
    }
}
