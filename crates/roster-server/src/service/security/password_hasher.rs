//! Password hashing and verification using Argon2id.
//!
//! Cost parameters are supplied by configuration so the work factor can be
//! raised without a code change. Hashing and verification return HTTP-level
//! errors ready for handler consumption.

use argon2::password_hash::Error as ArgonError;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version};
use serde::{Deserialize, Serialize};

use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceError, ServiceResult};

/// Tracing target for password hashing operations.
const TRACING_TARGET: &str = "roster_server::service::password_hasher";

/// Tunable Argon2id cost parameters.
///
/// Defaults match the `argon2` crate's recommended parameters. Raising any
/// of these increases the computational cost of every hash and verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHasherConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of iterations (time cost).
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for PasswordHasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing and verification service using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        Self { argon2 }
    }

    /// Creates a hasher from configured cost parameters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the parameters are outside the
    /// ranges Argon2 accepts; the service refuses to start rather than
    /// hashing with a broken work factor.
    pub fn from_config(config: &PasswordHasherConfig) -> ServiceResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| {
                ServiceError::config(format!("invalid password hashing parameters: {e}"))
            })?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Ok(Self { argon2 })
    }

    /// Hashes a password with a fresh cryptographically secure salt.
    ///
    /// The returned PHC string embeds the algorithm, parameters, and salt,
    /// and can be stored directly in the directory.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if salt generation or the
    /// hashing operation fails. The password itself is never logged.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let password_hash = self
            .argon2
            .hash_password(password.as_bytes())
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError.with_context("Hash generation error")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC-format hash.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::InvalidCredentials` for an incorrect password
    /// - `ErrorKind::InternalServerError` for a malformed stored hash or a
    ///   verification system error
    ///
    /// Verification is timing-safe and the error does not reveal why it
    /// failed.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "invalid password hash format in stored record"
            );

            ErrorKind::InternalServerError.with_context("Hash format error")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::PasswordInvalid) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "password verification failed: incorrect password"
                );

                Err(ErrorKind::InvalidCredentials.into_error())
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification system error"
                );

                Err(ErrorKind::InternalServerError.with_context("Verification error"))
            }
        }
    }

    /// Performs a dummy verification to keep timing consistent.
    ///
    /// Used when the username does not exist, so unknown-user and
    /// wrong-password login attempts take comparable time and usernames
    /// cannot be enumerated via timing analysis. Always returns `false`
    /// after performing real cryptographic work.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        use rand::RngExt;

        let password_len = rand::random_range(16..32);
        let dummy_password: String = (0..password_len)
            .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
            .collect();

        if let Ok(dummy_hash) = self.hash_password(&dummy_password) {
            let _ = self.verify_password(password, &dummy_hash);
        }

        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
