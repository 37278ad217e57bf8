//! Security services: password hashing and session token keys.

mod password_hasher;
mod session_keys;

pub use password_hasher::{PasswordHasher, PasswordHasherConfig};
pub use session_keys::{SessionKeys, SessionKeysConfig};
