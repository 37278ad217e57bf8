//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Public routes (registration, login, logout, health) and private routes
//! (directory queries) are assembled separately; the private router is
//! wrapped in the authentication guard as a route layer.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod monitors;
mod response;
mod users;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{Empty, Envelope, ErrorResponse, User};
use crate::middleware::require_authentication;
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all private (guarded) routes.
///
/// [`Router`]: axum::routing::Router
fn private_routes() -> Router<ServiceState> {
    Router::new().merge(users::routes())
}

/// Returns a [`Router`] with all public routes.
///
/// [`Router`]: axum::routing::Router
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::routes())
        .merge(monitors::routes())
}

/// Returns a [`Router`] with all routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state, require_authentication);

    let private_router = private_routes().route_layer(require_authentication);
    let public_router = public_routes();

    Router::new()
        .merge(private_router)
        .merge(public_router)
        .fallback(fallback)
}

#[cfg(test)]
pub(crate) mod test {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] backed by the default configuration.
    ///
    /// Honors `POSTGRES_URL` (via `.env` or the environment) so the
    /// integration tests can point at a scratch database.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        dotenvy::dotenv().ok();

        let mut builder = ServiceConfig::builder();
        if let Ok(endpoint) = std::env::var("POSTGRES_URL") {
            builder = builder.with_postgres_endpoint(endpoint);
        }
        let config = builder.build()?;

        let state = ServiceState::from_config(&config).await?;
        let router = routes(state.clone()).with_state(state);
        let server = TestServer::new(router)?;
        Ok(server)
    }

    /// Logs in and returns the `Cookie` header value for later requests.
    pub async fn login_cookie(
        server: &TestServer,
        username: &str,
        password: &str,
    ) -> anyhow::Result<String> {
        let response = server
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .await;
        response.assert_status(StatusCode::OK);

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .ok_or_else(|| anyhow::anyhow!("login response did not set a cookie"))?;
        let cookie_pair = set_cookie
            .to_str()?
            .split(';')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(cookie_pair)
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/no-such-route").await;
        response.assert_status_not_found();

        Ok(())
    }
}
