//! Session token signing keys.
//!
//! The signing secret is process-wide configuration, loaded once at startup
//! and injected into handlers. Rotating the secret invalidates every
//! outstanding session token; that is the accepted failure mode, no graceful
//! rotation exists.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::service::{ServiceError, ServiceResult};

/// Minimum accepted secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Session signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionKeysConfig {
    /// Shared secret used to sign and verify session tokens.
    pub secret: String,
    /// Session validity window in minutes.
    pub ttl_minutes: i64,
}

/// HMAC keys used to sign and verify session tokens.
///
/// Thread-safe and cheap to clone; all clones share the same key material.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl SessionKeys {
    /// Creates session keys from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the secret is shorter than 32 bytes or the TTL
    /// is not positive.
    pub fn from_config(config: &SessionKeysConfig) -> ServiceResult<Self> {
        if config.secret.len() < MIN_SECRET_BYTES {
            return Err(ServiceError::session_keys(format!(
                "session secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        if config.ttl_minutes <= 0 {
            return Err(ServiceError::session_keys(
                "session TTL must be a positive number of minutes",
            ));
        }

        let secret = config.secret.as_bytes();
        let inner = Arc::new(SessionKeysInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_minutes: config.ttl_minutes,
        });

        tracing::info!(
            target: TRACING_TARGET_AUTHENTICATION,
            ttl_minutes = config.ttl_minutes,
            "session signing keys loaded"
        );

        Ok(Self { inner })
    }

    /// Returns the key used to sign session tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Returns the key used to verify session tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the configured session validity window in minutes.
    #[inline]
    pub fn ttl_minutes(&self) -> i64 {
        self.inner.ttl_minutes
    }

    /// Validates that the keys are functional for token operations.
    ///
    /// Performs a sign/verify round trip with throwaway claims.
    pub fn validate_keys(&self) -> ServiceResult<()> {
        use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};

        #[derive(Debug, Serialize, Deserialize)]
        struct TestClaims {
            sub: String,
            exp: i64,
        }

        let claims = TestClaims {
            sub: "startup-check".to_string(),
            exp: jiff::Timestamp::now().as_second() + 300,
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, self.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                "key validation failed during encoding"
            );
            ServiceError::session_keys("key validation encoding failed")
        })?;

        let validation = Validation::new(Algorithm::HS256);
        decode::<TestClaims>(&token, self.decoding_key(), &validation).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                "key validation failed during decoding"
            );
            ServiceError::session_keys("key validation decoding failed")
        })?;

        Ok(())
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_minutes", &self.inner.ttl_minutes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_valid_keys() {
        let keys = SessionKeys::from_config(&SessionKeysConfig {
            secret: "a-test-secret-that-is-long-enough-0123".to_string(),
            ttl_minutes: 120,
        })
        .unwrap();

        assert_eq!(keys.ttl_minutes(), 120);
        assert!(keys.validate_keys().is_ok());
    }

    #[test]
    fn reject_short_secret() {
        let result = SessionKeys::from_config(&SessionKeysConfig {
            secret: "too-short".to_string(),
            ttl_minutes: 120,
        });
        assert!(result.is_err());
    }

    #[test]
    fn reject_non_positive_ttl() {
        let result = SessionKeys::from_config(&SessionKeysConfig {
            secret: "a-test-secret-that-is-long-enough-0123".to_string(),
            ttl_minutes: 0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let keys = SessionKeys::from_config(&SessionKeysConfig {
            secret: "a-test-secret-that-is-long-enough-0123".to_string(),
            ttl_minutes: 120,
        })
        .unwrap();

        let debug = format!("{keys:?}");
        assert!(!debug.contains("long-enough"));
    }
}
