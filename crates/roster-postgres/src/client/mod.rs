//! Database client, connection pool, and migration support.

mod migrate;
mod pg_client;
mod pg_config;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

pub use crate::client::pg_client::{PgClient, PgConn, PgPoolStatus};
pub use crate::client::pg_config::PgConfig;

/// Deadpool-managed connection pool over async diesel connections.
pub type ConnectionPool = deadpool::managed::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// A single connection checked out of the [`ConnectionPool`].
pub type PooledConnection =
    deadpool::managed::Object<AsyncDieselConnectionManager<AsyncPgConnection>>;
