//! Session token claims and the (claims <-> token) codec.
//!
//! A session token is a signed JWT carrying the user's identity, role, and
//! department plus issue/expiry timestamps. The token is the entire session
//! state: nothing is stored server-side, so verification is purely
//! cryptographic. No claim is trusted unless the signature check passes.

use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use roster_postgres::model;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{ErrorKind, Result};
use crate::service::SessionKeys;

/// Claims carried inside a session token.
///
/// Created at login and immutable afterwards. `iat`/`exp` are Unix seconds,
/// which is what JWT expiry validation operates on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionClaims {
    /// ID of the authenticated user.
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Flat role identifier, when the user has one.
    #[serde(rename = "userRole", skip_serializing_if = "Option::is_none", default)]
    pub user_role: Option<String>,

    /// Department used to scope directory queries.
    #[serde(
        rename = "userDepartment",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub user_department: Option<String>,

    /// Issued at (Unix seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Expiration time (Unix seconds).
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl SessionClaims {
    /// Creates claims for a freshly authenticated user.
    pub fn new(user: &model::User, ttl_minutes: i64) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            user_id: user.id,
            user_role: user.role.clone(),
            user_department: user.department.clone(),
            issued_at: now,
            expires_at: now + ttl_minutes * 60,
        }
    }

    /// Checks whether the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= jiff::Timestamp::now().as_second()
    }

    /// Signs the claims into a compact session token.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails; the caller never sees
    /// codec details.
    pub fn into_token(self, session_keys: &SessionKeys) -> Result<String> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, &self, session_keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                user_id = self.user_id,
                "failed to encode session token"
            );

            ErrorKind::InternalServerError.with_context("session token encoding failed")
        })
    }

    /// Parses and verifies a session token.
    ///
    /// The signature is checked before anything else; expiry is validated
    /// with zero leeway. A token signed with a rotated secret fails here
    /// like any other tampered token.
    ///
    /// # Errors
    ///
    /// All failures map to 401 error kinds; none reveal which check failed
    /// beyond expired vs. invalid.
    pub fn from_token(token: &str, session_keys: &SessionKeys) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        let token_data = decode::<Self>(token, session_keys.decoding_key(), &validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

                match e.kind() {
                    JwtErrorKind::ExpiredSignature => {
                        tracing::debug!(
                            target: TRACING_TARGET_AUTHENTICATION,
                            "session token rejected: expired"
                        );
                        ErrorKind::Unauthorized.with_message("Session has expired")
                    }
                    JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                        tracing::debug!(
                            target: TRACING_TARGET_AUTHENTICATION,
                            "session token rejected: malformed"
                        );
                        ErrorKind::MalformedAuthToken.into_error()
                    }
                    _ => {
                        tracing::debug!(
                            target: TRACING_TARGET_AUTHENTICATION,
                            error = %e,
                            "session token rejected: verification failed"
                        );
                        ErrorKind::Unauthorized.into_error()
                    }
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use jiff_diesel::Timestamp;

    use super::*;
    use crate::service::SessionKeysConfig;

    fn test_keys(secret: &str) -> SessionKeys {
        SessionKeys::from_config(&SessionKeysConfig {
            secret: secret.to_string(),
            ttl_minutes: 120,
        })
        .unwrap()
    }

    fn sample_user() -> model::User {
        model::User {
            id: 42,
            username: "alice".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            department: Some("Engineering".to_owned()),
            role: Some("member".to_owned()),
            first_name: None,
            last_name: None,
            email: None,
            address: None,
            birthday: None,
            profile_img_url: None,
            bio: None,
            created_at: Timestamp::from(jiff::Timestamp::UNIX_EPOCH),
            updated_at: Timestamp::from(jiff::Timestamp::UNIX_EPOCH),
        }
    }

    #[test]
    fn claims_round_trip() -> anyhow::Result<()> {
        let keys = test_keys("roster-test-secret-0123456789-0123456789");
        let claims = SessionClaims::new(&sample_user(), 120);

        let token = claims.clone().into_token(&keys)?;
        assert!(!token.is_empty());

        let decoded = SessionClaims::from_token(&token, &keys)?;
        assert_eq!(decoded, claims);
        assert!(!decoded.is_expired());

        Ok(())
    }

    #[test]
    fn claims_capture_role_and_department() {
        let claims = SessionClaims::new(&sample_user(), 120);
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.user_role.as_deref(), Some("member"));
        assert_eq!(claims.user_department.as_deref(), Some("Engineering"));
        assert_eq!(claims.expires_at - claims.issued_at, 120 * 60);
    }

    #[test]
    fn expired_token_is_rejected() -> anyhow::Result<()> {
        let keys = test_keys("roster-test-secret-0123456789-0123456789");
        let mut claims = SessionClaims::new(&sample_user(), 120);
        let now = jiff::Timestamp::now().as_second();
        claims.issued_at = now - 7200;
        claims.expires_at = now - 3600;

        let token = claims.into_token(&keys)?;
        let error = SessionClaims::from_token(&token, &keys)
            .expect_err("expired token must not verify");
        assert_eq!(error.kind(), ErrorKind::Unauthorized);

        Ok(())
    }

    #[test]
    fn tampered_token_is_rejected() -> anyhow::Result<()> {
        let keys = test_keys("roster-test-secret-0123456789-0123456789");
        let claims = SessionClaims::new(&sample_user(), 120);
        let token = claims.into_token(&keys)?;

        // Flip a character in the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(SessionClaims::from_token(&tampered, &keys).is_err());

        Ok(())
    }

    #[test]
    fn rotated_secret_invalidates_tokens() -> anyhow::Result<()> {
        let old_keys = test_keys("roster-test-secret-0123456789-0123456789");
        let new_keys = test_keys("rotated-secret-9876543210-9876543210-xx");

        let token = SessionClaims::new(&sample_user(), 120).into_token(&old_keys)?;
        assert!(SessionClaims::from_token(&token, &old_keys).is_ok());
        assert!(SessionClaims::from_token(&token, &new_keys).is_err());

        Ok(())
    }

    #[test]
    fn garbage_token_is_malformed() {
        let keys = test_keys("roster-test-secret-0123456789-0123456789");
        let error = SessionClaims::from_token("not-a-token", &keys)
            .expect_err("garbage must not verify");
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }
}
