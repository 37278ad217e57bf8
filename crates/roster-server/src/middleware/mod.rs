//! HTTP middleware layers.

mod auth;

pub use auth::require_authentication;
