//! Liveness and status handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use roster_postgres::PgClient;
use serde::Serialize;

use crate::extract::Json;
use crate::handler::response::Envelope;
use crate::service::ServiceState;

/// Payload of the health endpoint.
#[must_use]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthData {
    /// Overall service status.
    pub status: &'static str,
    /// Current size of the database connection pool.
    pub pool_size: usize,
    /// Number of idle connections in the pool.
    pub pool_available: usize,
}

/// Reports service liveness and connection pool status.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> (StatusCode, Json<Envelope<HealthData>>) {
    let pool_status = pg_client.pool_status();

    let data = HealthData {
        status: "ok",
        pool_size: pool_status.size,
        pool_available: pool_status.available,
    };

    (StatusCode::OK, Json(Envelope::new("Success", data)))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
