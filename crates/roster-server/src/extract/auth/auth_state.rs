//! Verified session state extractor.
//!
//! [`AuthState`] is the authorization guard: it extracts the token from the
//! session cookie, verifies it through the codec, and exposes the claims to
//! downstream handlers. Any failure (missing cookie, bad signature, expired
//! token) rejects the request with 401 before a handler runs.
//!
//! Verified claims are cached in request extensions, so several extractions
//! within one request verify the token only once.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;

use super::{SessionClaims, SessionCookie};
use crate::TRACING_TARGET_AUTHORIZATION;
use crate::handler::{Error, Result};
use crate::service::SessionKeys;

/// Verified session claims for the authenticated caller.
///
/// When extraction succeeds the signature check has passed and the token is
/// within its validity window. Sessions are stateless: there is no
/// server-side record to consult, the claims are the whole session.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub SessionClaims);

impl AuthState {
    /// Verifies a raw token and wraps the resulting claims.
    pub fn from_session_cookie(
        session_cookie: SessionCookie,
        session_keys: &SessionKeys,
    ) -> Result<Self> {
        let claims = SessionClaims::from_token(session_cookie.token(), session_keys)?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHORIZATION,
            user_id = claims.user_id,
            department = claims.user_department.as_deref().unwrap_or("-"),
            "session token verified"
        );

        Ok(Self(claims))
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let session_cookie = SessionCookie::from_request_parts(parts, state).await?;
        let session_keys = SessionKeys::from_ref(state);
        let auth_state = Self::from_session_cookie(session_cookie, &session_keys)?;

        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_state) => Ok(Some(auth_state)),
            Err(_) => Ok(None),
        }
    }
}
