//! HTTP request extractors with envelope-shaped error handling.
//!
//! # Extractor Categories
//!
//! ## Authentication & Authorization
//!
//! - [`SessionClaims`] - session token claims with sign/verify operations
//! - [`SessionCookie`] - raw token extraction from the `token` cookie
//! - [`AuthState`] - verified claims, cached per request
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON deserialization with envelope error messages
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] - path parameter extraction with envelope errors
//! - [`Query`] - query parameter extraction with envelope errors

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{
    AuthState, SESSION_COOKIE, SessionClaims, SessionCookie, expired_session_cookie,
    session_cookie,
};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
