//! Authentication handlers: register, login, logout.
//!
//! Login merges the username-existence and password checks into a single
//! `Invalid Credentials` outcome: unknown-username and wrong-password
//! attempts return byte-identical responses, and a dummy hash verification
//! keeps their timing comparable.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use roster_postgres::PgClient;
use roster_postgres::model::NewUser;
use roster_postgres::query::UserRepository;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extract::{Json, SessionClaims, ValidateJson, expired_session_cookie, session_cookie};
use crate::handler::response::{Empty, Envelope, User};
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, ServiceState, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "roster_server::handler::authentication";

/// Request payload for registration.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    /// Unique login name.
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    /// Plaintext password; hashed before it reaches the directory.
    #[validate(length(min = 1, max = 256, message = "Password is required"))]
    pub password: String,

    // Optional profile fields
    pub department: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    /// Date of birth as an ISO8601 string.
    pub birthday: Option<String>,
    #[validate(url)]
    pub profile_img_url: Option<String>,
    pub bio: Option<String>,
}

/// Creates a new user in the directory.
#[tracing::instrument(skip_all)]
async fn register(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<User>>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "registration attempt"
    );

    let RegisterRequest {
        username,
        password,
        department,
        role,
        first_name,
        last_name,
        email,
        address,
        birthday,
        profile_img_url,
        bio,
    } = request;

    let mut conn = pg_client.get_connection().await?;
    if UserRepository::username_exists(&mut **conn, &username).await? {
        tracing::warn!(
            target: TRACING_TARGET,
            username = %username,
            "registration failed: username already exists"
        );
        return Err(ErrorKind::Conflict.with_message("Username is already taken"));
    }
    drop(conn);

    // Hashing is CPU-bound; keep it off the async executor.
    let password_hash =
        tokio::task::spawn_blocking(move || password_hasher.hash_password(&password))
            .await
            .map_err(|e| {
                ErrorKind::InternalServerError.with_context(format!("hashing task failed: {e}"))
            })??;

    let new_user = NewUser {
        username,
        password_hash,
        department,
        role,
        first_name,
        last_name,
        email,
        address,
        birthday,
        profile_img_url,
        bio,
    };

    // Concurrent registrations can still race past the pre-check; the
    // unique constraint resolves the race and maps to the same conflict.
    let mut conn = pg_client.get_connection().await?;
    let user = UserRepository::create_user(&mut **conn, new_user).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id,
        username = %user.username,
        "user registered"
    );

    let message = format!("Registered {} successfully", user.username);
    let user = User::from_model(user);
    Ok((StatusCode::OK, Json(Envelope::new(message, user))))
}

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    /// Login name of the user.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password of the user.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Payload returned after a successful login.
#[must_use]
#[derive(Debug, Serialize)]
struct LoginData {
    /// The authenticated user, sanitized.
    pub user: User,
    /// The signed session token, also set as the `token` cookie.
    pub token: String,
}

/// Verifies credentials and issues a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<Envelope<LoginData>>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "login attempt"
    );

    let mut conn = pg_client.get_connection().await?;
    let user = UserRepository::find_user_by_username(&mut **conn, &request.username).await?;
    drop(conn);

    // Always perform a verification so unknown-username and wrong-password
    // attempts take comparable time.
    let password = request.password;
    let (user, password_valid) = tokio::task::spawn_blocking(move || match user {
        Some(user) => {
            let valid = password_hasher
                .verify_password(&password, &user.password_hash)
                .is_ok();
            (Some(user), valid)
        }
        None => {
            let valid = password_hasher.verify_dummy_password(&password);
            (None, valid)
        }
    })
    .await
    .map_err(|e| {
        ErrorKind::InternalServerError.with_context(format!("verification task failed: {e}"))
    })?;

    let Some(user) = user.filter(|_| password_valid) else {
        tracing::warn!(
            target: TRACING_TARGET,
            username = %request.username,
            "login failed"
        );
        return Err(ErrorKind::InvalidCredentials.into_error());
    };

    let claims = SessionClaims::new(&user, session_keys.ttl_minutes());
    let token = claims.into_token(&session_keys)?;
    let jar = CookieJar::new().add(session_cookie(token.clone()));

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id,
        username = %user.username,
        "login successful: session token issued"
    );

    let message = format!("Welcome, {}!", user.username);
    let data = LoginData {
        user: User::from_model(user),
        token,
    };
    Ok((StatusCode::OK, jar, Json(Envelope::new(message, data))))
}

/// Clears the session cookie.
///
/// Sessions are stateless, so there is nothing to invalidate server-side:
/// an already-issued token stays valid until its natural expiry even after
/// logout.
#[tracing::instrument(skip_all)]
async fn logout(jar: CookieJar) -> (StatusCode, CookieJar, Json<Envelope<Empty>>) {
    let jar = jar.remove(expired_session_cookie());

    tracing::debug!(target: TRACING_TARGET, "session cookie cleared");

    let envelope = Envelope::new("User has been logged out", Empty {});
    (StatusCode::OK, jar, Json(envelope))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn register_returns_sanitized_user() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": "alice-register",
                "password": "pw123",
                "department": "Engineering"
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["username"], "alice-register");
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("passwordHash").is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn register_missing_fields_is_a_validation_error() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .post("/auth/register")
            .json(&serde_json::json!({ "username": "", "password": "" }))
            .await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        let validation = body["validation"].as_array().unwrap();
        assert!(!validation.is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn duplicate_username_is_a_conflict() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let payload = serde_json::json!({
            "username": "alice-duplicate",
            "password": "pw123"
        });

        server.post("/auth/register").json(&payload).await.assert_status_ok();

        let response = server.post("/auth/register").json(&payload).await;
        response.assert_status_conflict();

        // The first record still authenticates.
        let response = server
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": "alice-duplicate",
                "password": "pw123"
            }))
            .await;
        response.assert_status_ok();

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn login_failures_are_indistinguishable() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        server
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": "alice-enum",
                "password": "pw123"
            }))
            .await
            .assert_status_ok();

        let unknown_user = server
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": "nobody-here",
                "password": "pw123"
            }))
            .await;
        let wrong_password = server
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": "alice-enum",
                "password": "wrong"
            }))
            .await;

        unknown_user.assert_status_unauthorized();
        wrong_password.assert_status_unauthorized();
        assert_eq!(unknown_user.text(), wrong_password.text());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn login_sets_the_token_cookie() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        server
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": "alice-cookie",
                "password": "pw123"
            }))
            .await
            .assert_status_ok();

        let response = server
            .post("/auth/login")
            .json(&serde_json::json!({
                "username": "alice-cookie",
                "password": "pw123"
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let token = body["data"]["token"].as_str().unwrap();
        assert!(!token.is_empty());
        assert_eq!(body["data"]["user"]["username"], "alice-cookie");
        assert!(body["data"]["user"].get("password").is_none());

        let set_cookie = response.headers().get("set-cookie").unwrap().to_str()?;
        assert!(set_cookie.starts_with(&format!("token={token}")));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn logout_clears_the_cookie() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/auth/logout").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "User has been logged out");
        assert_eq!(body["data"], serde_json::json!({}));

        let set_cookie = response.headers().get("set-cookie").unwrap().to_str()?;
        assert!(set_cookie.starts_with("token=;") || set_cookie.starts_with("token=\"\""));

        Ok(())
    }
}
