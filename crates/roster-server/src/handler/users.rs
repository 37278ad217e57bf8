//! Guarded directory handlers: list users by department, fetch by id.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use roster_postgres::PgClient;
use roster_postgres::query::{Pagination, UserRepository};
use serde::Deserialize;

use crate::extract::{AuthState, Json, Path, Query};
use crate::handler::response::{Envelope, User};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for directory operations.
const TRACING_TARGET: &str = "roster_server::handler::users";

/// Query parameters for the directory listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListUsersQuery {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size (defaults to 100).
    pub per_page: Option<i64>,
}

/// Lists users in the caller's department.
///
/// The department comes from the verified session claims, never from the
/// request, so a caller can only ever see their own department. A caller
/// with no department claim sees users with no department assigned.
#[tracing::instrument(skip_all)]
async fn list_users(
    State(pg_client): State<PgClient>,
    AuthState(claims): AuthState,
    Query(query): Query<ListUsersQuery>,
) -> Result<(StatusCode, Json<Envelope<Vec<User>>>)> {
    let pagination = Pagination::from_page(query.page.unwrap_or(1), query.per_page.unwrap_or(100));

    tracing::trace!(
        target: TRACING_TARGET,
        user_id = claims.user_id,
        department = claims.user_department.as_deref().unwrap_or("-"),
        "listing users by department"
    );

    let mut conn = pg_client.get_connection().await?;
    let users = UserRepository::find_users_by_department(
        &mut **conn,
        claims.user_department.as_deref(),
        pagination,
    )
    .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        user_id = claims.user_id,
        count = users.len(),
        "directory listing returned"
    );

    let users = users.into_iter().map(User::from_model).collect();
    Ok((StatusCode::OK, Json(Envelope::new("Success", users))))
}

/// Fetches a single user by id.
///
/// Any authenticated caller can fetch any user; the fetch is not
/// department-scoped.
#[tracing::instrument(skip_all, fields(user_id))]
async fn get_user(
    State(pg_client): State<PgClient>,
    AuthState(claims): AuthState,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<Envelope<User>>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        caller_id = claims.user_id,
        user_id,
        "fetching user by id"
    );

    let mut conn = pg_client.get_connection().await?;
    let Some(user) = UserRepository::find_user_by_id(&mut **conn, user_id).await? else {
        return Err(ErrorKind::NotFound.with_validation("User id doesn't exist"));
    };

    let user = User::from_model(user);
    Ok((StatusCode::OK, Json(Envelope::new("Success", user))))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/users", get(list_users))
        .route("/auth/users/{id}", get(get_user))
}

#[cfg(test)]
mod test {
    use crate::handler::test::{create_test_server, login_cookie};

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn listing_requires_authentication() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/auth/users").await;
        response.assert_status_unauthorized();

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn listing_is_department_scoped() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        for (username, department) in [
            ("eng-user-1", "Engineering"),
            ("eng-user-2", "Engineering"),
            ("sales-user-1", "Sales"),
        ] {
            server
                .post("/auth/register")
                .json(&serde_json::json!({
                    "username": username,
                    "password": "pw123",
                    "department": department
                }))
                .await
                .assert_status_ok();
        }

        let cookie = login_cookie(&server, "eng-user-1", "pw123").await?;
        let response = server.get("/auth/users").add_header("Cookie", cookie).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let users = body["data"].as_array().unwrap();
        assert!(!users.is_empty());
        for user in users {
            assert_eq!(user["department"], "Engineering");
            assert!(user.get("password").is_none());
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn fetch_by_id_returns_sanitized_user() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let registered = server
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": "fetch-me",
                "password": "pw123",
                "department": "Engineering"
            }))
            .await;
        registered.assert_status_ok();
        let body: serde_json::Value = registered.json();
        let id = body["data"]["id"].as_i64().unwrap();

        let cookie = login_cookie(&server, "fetch-me", "pw123").await?;
        let response = server
            .get(&format!("/auth/users/{id}"))
            .add_header("Cookie", cookie)
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["username"], "fetch-me");
        assert!(body["data"].get("password").is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn fetch_unknown_id_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        server
            .post("/auth/register")
            .json(&serde_json::json!({
                "username": "fetch-missing",
                "password": "pw123"
            }))
            .await
            .assert_status_ok();

        let cookie = login_cookie(&server, "fetch-missing", "pw123").await?;
        let response = server
            .get("/auth/users/999999999")
            .add_header("Cookie", cookie)
            .await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Not Found");
        assert_eq!(
            body["validation"],
            serde_json::json!(["User id doesn't exist"])
        );

        Ok(())
    }
}
