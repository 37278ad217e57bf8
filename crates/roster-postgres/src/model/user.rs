//! Directory user model.
//!
//! [`User`] carries the stored password hash and therefore never implements
//! `Serialize`; read paths must go through a sanitized response type before
//! leaving the service boundary.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::users;

/// A user record as stored in the directory.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique identifier (auto-incrementing).
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC-format password hash. Never serialized.
    pub password_hash: String,
    /// Department used for directory scoping.
    pub department: Option<String>,
    /// Flat role identifier.
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Date of birth as an ISO8601 string.
    pub birthday: Option<String>,
    pub profile_img_url: Option<String>,
    pub bio: Option<String>,
    /// Timestamp when the record was created.
    pub created_at: Timestamp,
    /// Timestamp when the record was last updated.
    pub updated_at: Timestamp,
}

/// Data for inserting a new user. The password must already be hashed.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    pub profile_img_url: Option<String>,
    pub bio: Option<String>,
}

impl User {
    /// Returns the full name when both name parts are present.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        }
    }

    /// Returns whether the user belongs to the given department.
    pub fn is_in_department(&self, department: &str) -> bool {
        self.department.as_deref() == Some(department)
    }

    /// Returns whether the user has a department assigned.
    pub fn has_department(&self) -> bool {
        self.department
            .as_deref()
            .is_some_and(|department| !department.is_empty())
    }

    /// Returns whether the user has a role assigned.
    pub fn has_role(&self) -> bool {
        self.role.as_deref().is_some_and(|role| !role.is_empty())
    }
}
