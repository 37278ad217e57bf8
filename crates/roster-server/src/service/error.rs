//! Errors raised while constructing or connecting services at startup.

use std::borrow::Cow;

/// Error type for service construction and startup failures.
///
/// These errors occur before the server accepts requests and are reported
/// to the operator, never to API clients.
#[derive(Debug, thiserror::Error)]
#[must_use = "service errors should be handled appropriately"]
pub enum ServiceError {
    /// Invalid or missing configuration value.
    #[error("Configuration error: {0}")]
    Config(Cow<'static, str>),

    /// Database connection or migration failure.
    #[error("Database error: {0}")]
    Database(#[from] roster_postgres::PgError),

    /// Session signing keys could not be constructed or validated.
    #[error("Session key error: {0}")]
    SessionKeys(Cow<'static, str>),
}

impl ServiceError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a session key error.
    pub fn session_keys(message: impl Into<Cow<'static, str>>) -> Self {
        Self::SessionKeys(message.into())
    }
}

/// Specialized [`Result`] type for service construction.
pub type ServiceResult<T, E = ServiceError> = Result<T, E>;
