use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthState;

/// Requires a verified session token to proceed with the request.
///
/// #### Notes
///
/// - [`AuthState`] can't be extracted from requests without a *verified*
///   `token` cookie, so the extractor rejection (401) short-circuits the
///   request before `next` runs.
/// - The verified claims stay cached in request extensions, where downstream
///   handlers pick them up without re-verifying.
///
/// #### Examples
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
/// use roster_server::middleware::require_authentication;
///
/// let guard = from_fn_with_state(state, require_authentication);
/// let router = private_router.route_layer(guard);
/// ```
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
