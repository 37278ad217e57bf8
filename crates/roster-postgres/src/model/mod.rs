//! Database models for the user directory.
//!
//! - [`User`] - a stored directory record, including the password hash
//! - [`NewUser`] - data for inserting a new record

mod user;

pub use user::{NewUser, User};
