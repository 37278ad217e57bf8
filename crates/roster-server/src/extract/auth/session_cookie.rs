//! Session token transport via the `token` cookie.
//!
//! The codec itself is transport-agnostic; this module owns the cookie
//! name and attributes, and extracts the raw token string from incoming
//! requests.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::handler::{Error, ErrorKind};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "token";

/// Builds the session cookie set on a successful login.
///
/// HttpOnly keeps the token away from page scripts; the cookie spans the
/// whole site so the guard sees it on every route.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Builds the removal cookie used at logout.
///
/// Must match the name and path of [`session_cookie`] for browsers to drop
/// the stored value.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// The raw session token taken from the `token` cookie.
///
/// Extraction fails with `MissingAuthToken` when the cookie is absent; the
/// token is not verified at this stage - that is [`AuthState`]'s job.
///
/// [`AuthState`]: crate::extract::AuthState
#[must_use]
#[derive(Debug, Clone)]
pub struct SessionCookie(pub String);

impl SessionCookie {
    /// Returns the raw token string.
    #[inline]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        match jar.get(SESSION_COOKIE) {
            Some(cookie) if !cookie.value().is_empty() => {
                Ok(Self(cookie.value().to_owned()))
            }
            _ => Err(ErrorKind::MissingAuthToken.into_error()),
        }
    }
}
