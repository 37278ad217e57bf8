//! Server lifecycle errors.

use std::io;

/// Errors raised while starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Server configuration failed validation.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// Could not bind to the configured address.
    #[error("failed to bind to address: {0}")]
    Bind(#[source] io::Error),

    /// The server stopped with a runtime error.
    #[error("server runtime error: {0}")]
    Runtime(#[source] io::Error),
}

/// Specialized [`Result`] type for server lifecycle operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;
