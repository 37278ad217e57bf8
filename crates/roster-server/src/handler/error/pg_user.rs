//! User-table constraint violations mapped to HTTP errors.

use roster_postgres::types::{ConstraintViolation, UserConstraints};

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error {
    fn from(constraint: UserConstraints) -> Self {
        match constraint {
            UserConstraints::UsernameUnique => {
                ErrorKind::Conflict.with_message("Username is already taken")
            }
            UserConstraints::UsernameNotEmpty => {
                ErrorKind::BadRequest.with_validation("Username cannot be empty")
            }
            UserConstraints::PasswordHashNotEmpty => {
                ErrorKind::BadRequest.with_validation("Password cannot be empty")
            }
            UserConstraints::PrimaryKey => ErrorKind::InternalServerError.into_error(),
        }
    }
}

impl From<ConstraintViolation> for Error {
    fn from(violation: ConstraintViolation) -> Self {
        match violation {
            ConstraintViolation::Users(constraint) => constraint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_username_is_a_conflict() {
        let error = Error::from(UserConstraints::UsernameUnique);
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.message(), Some("Username is already taken"));
    }

    #[test]
    fn check_constraints_are_bad_requests() {
        for constraint in [
            UserConstraints::UsernameNotEmpty,
            UserConstraints::PasswordHashNotEmpty,
        ] {
            let error = Error::from(constraint);
            assert_eq!(error.kind(), ErrorKind::BadRequest);
        }
    }
}
