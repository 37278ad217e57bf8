#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for authentication operations (login, token verification).
pub const TRACING_TARGET_AUTHENTICATION: &str = "roster_server::authentication";

/// Tracing target for authorization decisions on guarded routes.
pub const TRACING_TARGET_AUTHORIZATION: &str = "roster_server::authorization";

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::handler::{Error, ErrorKind, Result};
