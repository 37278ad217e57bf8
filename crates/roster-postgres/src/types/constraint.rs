//! Typed representations of named database constraints.
//!
//! Constraint names in the migrations are stable identifiers; violations
//! reported by PostgreSQL are parsed back into these enums so the handler
//! layer can translate them without string matching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Constraint violation for any table in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintViolation {
    /// Constraints on the `users` table.
    Users(UserConstraints),
}

impl ConstraintViolation {
    /// Parses a constraint name reported by the database.
    ///
    /// Returns `None` for constraint names not defined by our migrations.
    pub fn new(constraint_name: &str) -> Option<Self> {
        UserConstraints::new(constraint_name).map(Self::Users)
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users(constraint) => write!(f, "{constraint}"),
        }
    }
}

/// Named constraints on the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserConstraints {
    /// `users_pkey`
    PrimaryKey,
    /// `users_username_key` - usernames must be unique.
    UsernameUnique,
    /// `users_username_not_empty`
    UsernameNotEmpty,
    /// `users_password_hash_not_empty`
    PasswordHashNotEmpty,
}

impl UserConstraints {
    /// Parses a `users` table constraint name.
    pub fn new(constraint_name: &str) -> Option<Self> {
        match constraint_name {
            "users_pkey" => Some(Self::PrimaryKey),
            "users_username_key" => Some(Self::UsernameUnique),
            "users_username_not_empty" => Some(Self::UsernameNotEmpty),
            "users_password_hash_not_empty" => Some(Self::PasswordHashNotEmpty),
            _ => None,
        }
    }

    /// Returns the constraint name as defined in the migrations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "users_pkey",
            Self::UsernameUnique => "users_username_key",
            Self::UsernameNotEmpty => "users_username_not_empty",
            Self::PasswordHashNotEmpty => "users_password_hash_not_empty",
        }
    }
}

impl fmt::Display for UserConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
