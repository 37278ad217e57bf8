//! Sanitized user representation.

use roster_postgres::model;
use serde::Serialize;

/// A directory user as returned to clients.
///
/// There is no password field on this type; sanitization is structural, not
/// a runtime filter. Every read path goes through [`User::from_model`]
/// before a record leaves the service boundary.
#[must_use]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Date of birth as an ISO8601 string.
    pub birthday: Option<String>,
    pub profile_img_url: Option<String>,
    pub bio: Option<String>,
}

impl User {
    /// Builds the sanitized representation, dropping the password hash.
    pub fn from_model(user: model::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            department: user.department,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            address: user.address,
            birthday: user.birthday,
            profile_img_url: user.profile_img_url,
            bio: user.bio,
        }
    }
}
