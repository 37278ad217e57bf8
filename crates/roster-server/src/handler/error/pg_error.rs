//! Translation of database errors into HTTP errors.

use roster_postgres::PgError;

use crate::handler::{Error, ErrorKind};

impl From<PgError> for Error {
    fn from(error: PgError) -> Self {
        if let Some(violation) = error.constraint_violation() {
            return violation.into();
        }

        if error.is_not_found() {
            return ErrorKind::NotFound.into_error();
        }

        tracing::error!(
            target: roster_postgres::TRACING_TARGET_QUERY,
            error = %error,
            "database operation failed"
        );

        ErrorKind::InternalServerError.into_error()
    }
}
