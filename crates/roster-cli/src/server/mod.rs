//! HTTP server startup, lifecycle, and graceful shutdown.

mod error;
mod http_server;
mod shutdown;

pub use error::{Result, ServerError};
pub use http_server::serve_http;
pub use shutdown::shutdown_signal;

/// Tracing target for server startup events.
pub(crate) const TRACING_TARGET_STARTUP: &str = "roster_cli::server::startup";

/// Tracing target for server shutdown events.
pub(crate) const TRACING_TARGET_SHUTDOWN: &str = "roster_cli::server::shutdown";
