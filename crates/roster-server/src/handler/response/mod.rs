//! Response types serialized into the fixed envelope
//! `{message, validation, data}`.

mod envelope;
mod error_response;
mod user;

pub use envelope::{Empty, Envelope};
pub use error_response::ErrorResponse;
pub use user::User;
