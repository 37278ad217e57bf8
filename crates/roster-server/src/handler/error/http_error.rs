//! HTTP error handling with a builder for dynamic error responses.
//!
//! Domain failures are expressed as an [`ErrorKind`] plus optional
//! overrides, and serialize into the fixed response envelope
//! `{message, validation, data}`. Internal context attached to an error is
//! logged server-side and never reaches the client.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// The error type for HTTP handlers in the server.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error {
    kind: ErrorKind,
    message: Option<Cow<'static, str>>,
    validation: Vec<String>,
    context: Option<Cow<'static, str>>,
}

impl Error {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            validation: Vec::new(),
            context: None,
        }
    }

    /// Sets a custom user-facing message, replacing the kind's default.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Appends an entry to the `validation` array of the response.
    #[inline]
    pub fn with_validation(mut self, entry: impl Into<String>) -> Self {
        self.validation.push(entry.into());
        self
    }

    /// Replaces the `validation` array of the response.
    #[inline]
    pub fn with_validation_entries(self, entries: Vec<String>) -> Self {
        Self {
            validation: entries,
            ..self
        }
    }

    /// Attaches internal context, logged server-side and never serialized.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'static, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the validation entries.
    #[inline]
    pub fn validation(&self) -> &[String] {
        &self.validation
    }

    /// Returns the internal context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl Default for Error {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", self.kind, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if let Some(ref context) = self.context {
            if status.is_server_error() {
                tracing::error!(kind = %self.kind, context = %context, "request failed");
            } else {
                tracing::debug!(kind = %self.kind, context = %context, "request rejected");
            }
        }

        let mut response = self.kind.response();
        if let Some(message) = self.message {
            response = response.with_message(message);
        }
        if !self.validation.is_empty() {
            response = response.with_validation(self.validation);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Enumeration of all HTTP error kinds the service produces.
///
/// Each variant corresponds to an HTTP status code and a default envelope
/// message.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Invalid or incomplete request data.
    BadRequest,
    /// 401 Unauthorized - No session token was supplied.
    MissingAuthToken,
    /// 401 Unauthorized - The session token is not a valid signed token.
    MalformedAuthToken,
    /// 401 Unauthorized - Unknown username or wrong password (unified).
    InvalidCredentials,
    /// 401 Unauthorized - The session token failed verification or expired.
    Unauthorized,
    /// 404 Not Found - Resource not found.
    NotFound,
    /// 409 Conflict - Conflicting resource state (e.g. duplicate username).
    Conflict,

    // 5xx Server Errors
    /// 500 Internal Server Error - Unexpected store or codec failure.
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error {
        Error::new(self)
    }

    /// Creates an [`Error`] with a custom user-facing message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with a validation entry.
    #[inline]
    pub fn with_validation(self, entry: impl Into<String>) -> Error {
        Error::new(self).with_validation(entry)
    }

    /// Creates an [`Error`] with internal context.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_context(context)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the envelope representation of this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::InvalidCredentials => ErrorResponse::INVALID_CREDENTIALS,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let _ = error.into_response();
    }

    #[test]
    fn error_from_kind() {
        let error = Error::new(ErrorKind::NotFound);
        assert_eq!(error.kind(), ErrorKind::NotFound);
        let _ = error.into_response();
    }

    #[test]
    fn error_with_message() {
        let error = ErrorKind::NotFound.with_message("Custom not found message");
        assert_eq!(error.message(), Some("Custom not found message"));
        let _ = error.into_response();
    }

    #[test]
    fn error_with_validation() {
        let error = ErrorKind::NotFound.with_validation("User id doesn't exist");
        assert_eq!(error.validation(), ["User id doesn't exist"]);
        let _ = error.into_response();
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::BadRequest
            .with_message("Invalid request")
            .with_validation("Username is required")
            .with_context("payload missing username field");

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("Invalid request"));
        assert_eq!(error.validation(), ["Username is required"]);
        assert_eq!(error.context(), Some("payload missing username field"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Resource not found")
            .with_context("ID: 123");

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Resource not found"));
        assert!(display.contains("ID: 123"));
    }

    #[test]
    fn std_error_trait() {
        let error = Error::new(ErrorKind::BadRequest);
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn all_error_kinds_have_responses() {
        let kinds = [
            ErrorKind::BadRequest,
            ErrorKind::MissingAuthToken,
            ErrorKind::MalformedAuthToken,
            ErrorKind::InvalidCredentials,
            ErrorKind::Unauthorized,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::InternalServerError,
        ];

        for kind in kinds {
            let response = kind.response();
            assert!(!response.message.is_empty());
            assert!(response.status.as_u16() >= 400);
            let _ = kind.into_response();
        }
    }

    #[test]
    fn auth_failures_share_the_unauthorized_status() {
        for kind in [
            ErrorKind::MissingAuthToken,
            ErrorKind::MalformedAuthToken,
            ErrorKind::InvalidCredentials,
            ErrorKind::Unauthorized,
        ] {
            assert_eq!(kind.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
