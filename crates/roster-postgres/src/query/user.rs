//! User repository: typed lookups for the user directory.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::Pagination;
use crate::model::{NewUser, User};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for user directory operations.
///
/// Lookups are typed rather than an open-ended field-equality filter, so
/// every query path is checked at compile time.
pub trait UserRepository {
    /// Inserts a new user with a pre-hashed password.
    ///
    /// Username uniqueness is enforced by the `users_username_key` database
    /// constraint; a duplicate surfaces as a constraint violation in the
    /// returned [`PgError`].
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by its unique identifier.
    fn find_user_by_id(
        &mut self,
        user_id: i64,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by username.
    ///
    /// Used at login and for registration existence checks. The username is
    /// matched after trimming surrounding whitespace.
    fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Lists users in a department, ordered by username.
    ///
    /// `None` selects users with no department assigned, mirroring the
    /// optional department claim carried by session tokens.
    fn find_users_by_department(
        &mut self,
        department: Option<&str>,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<User>>> + Send;

    /// Checks whether a username is already registered.
    fn username_exists(&mut self, username: &str) -> impl Future<Output = PgResult<bool>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, mut new_user: NewUser) -> PgResult<User> {
        use schema::users;

        // Normalize fields: trim whitespace
        new_user.username = new_user.username.trim().to_owned();
        if let Some(ref mut department) = new_user.department {
            *department = department.trim().to_owned();
        }

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_user_by_id(&mut self, user_id: i64) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_username(&mut self, username: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::username.eq(username.trim()))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_users_by_department(
        &mut self,
        department: Option<&str>,
        pagination: Pagination,
    ) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        match department {
            Some(department) => users::table
                .filter(dsl::department.eq(department))
                .order(dsl::username.asc())
                .limit(pagination.limit)
                .offset(pagination.offset)
                .select(User::as_select())
                .load(self)
                .await
                .map_err(PgError::from),
            None => users::table
                .filter(dsl::department.is_null())
                .order(dsl::username.asc())
                .limit(pagination.limit)
                .offset(pagination.offset)
                .select(User::as_select())
                .load(self)
                .await
                .map_err(PgError::from),
        }
    }

    async fn username_exists(&mut self, username: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::username.eq(username.trim()))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }
}
