//! Startup migration runner.
//!
//! Embedded migrations are executed through diesel's blocking harness on the
//! tokio blocking thread pool, wrapping a pooled async connection.

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

impl PgClient {
    /// Runs all pending migrations on the database.
    ///
    /// Returns the list of applied migration versions, which is empty when
    /// the schema is already up to date.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::Migration`] if a migration fails to apply; the
    /// database is left at the last successfully applied migration.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_MIGRATION)]
    pub async fn run_pending_migrations(&self) -> PgResult<Vec<String>> {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            "Starting database migration process"
        );

        let start_time = Instant::now();
        let conn = self.get_pooled_connection().await?;
        let mut conn: AsyncConnectionWrapper<_> = conn.into();

        let results = spawn_blocking(move || {
            conn.run_pending_migrations(MIGRATIONS).map(|versions| {
                versions
                    .into_iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
            })
        })
        .await;

        let duration = start_time.elapsed();
        let results = results.map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Migration task panicked, join error occurred"
            );
            PgError::Migration(err.into())
        })?;

        let versions = results.map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Database migration process failed"
            );
            PgError::Migration(err)
        })?;

        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            migrations_count = versions.len(),
            "Database migration process completed"
        );

        Ok(versions)
    }
}
