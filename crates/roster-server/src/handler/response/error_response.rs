//! Error response bodies in the fixed envelope shape.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// An empty `data` object for error envelopes.
#[derive(Debug, Clone, Copy, Serialize)]
struct NoData {}

/// HTTP error response in the envelope shape `{message, validation, data}`.
///
/// The status code travels alongside the body but is not serialized into
/// it. Error payloads are always the empty object, so nothing internal can
/// leak through an error path.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// User-facing error message, safe for client display.
    pub message: Cow<'static, str>,
    /// Field-level validation messages.
    pub validation: Vec<String>,
    /// Always the empty object on errors.
    data: NoData,
    /// HTTP status code (not serialized).
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new("Invalid request", StatusCode::BAD_REQUEST);
    pub const CONFLICT: Self = Self::new(
        "The request conflicts with the current state of the resource",
        StatusCode::CONFLICT,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "There was a problem completing the required operation",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const INVALID_CREDENTIALS: Self =
        Self::new("Invalid Credentials", StatusCode::UNAUTHORIZED);
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "The session token format is invalid",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "Authentication is required to access this resource",
        StatusCode::UNAUTHORIZED,
    );
    pub const NOT_FOUND: Self = Self::new("Not Found", StatusCode::NOT_FOUND);
    pub const UNAUTHORIZED: Self = Self::new(
        "Invalid or expired session token",
        StatusCode::UNAUTHORIZED,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(message: &'static str, status: StatusCode) -> Self {
        Self {
            message: Cow::Borrowed(message),
            validation: Vec::new(),
            data: NoData {},
            status,
        }
    }

    /// Replaces the user-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Replaces the validation entries.
    pub fn with_validation(mut self, validation: Vec<String>) -> Self {
        self.validation = validation;
        self
    }
}

impl Default for ErrorResponse {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_into_the_envelope_shape() {
        let response = ErrorResponse::NOT_FOUND
            .with_validation(vec!["User id doesn't exist".to_string()]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["message"], "Not Found");
        assert_eq!(value["validation"], serde_json::json!(["User id doesn't exist"]));
        assert_eq!(value["data"], serde_json::json!({}));
        assert!(value.get("status").is_none());
    }

    #[test]
    fn invalid_credentials_body_is_stable() {
        // Unknown-username and wrong-password failures must be
        // indistinguishable on the wire.
        let first = serde_json::to_string(&ErrorResponse::INVALID_CREDENTIALS).unwrap();
        let second = serde_json::to_string(&ErrorResponse::INVALID_CREDENTIALS).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            r#"{"message":"Invalid Credentials","validation":[],"data":{}}"#
        );
    }

    #[test]
    fn message_override() {
        let response = ErrorResponse::CONFLICT.with_message("Username is already taken");
        assert_eq!(response.message, "Username is already taken");
        assert_eq!(response.status, StatusCode::CONFLICT);
    }
}
