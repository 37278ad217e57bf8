//! Application state and dependency injection.

mod config;
mod error;
mod security;

use roster_postgres::PgClient;

pub use crate::service::config::ServiceConfig;
pub use crate::service::error::{ServiceError, ServiceResult};
pub use crate::service::security::{
    PasswordHasher, PasswordHasherConfig, SessionKeys, SessionKeysConfig,
};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to the database, applies pending migrations, and constructs
    /// the hasher and session keys from the configured parameters. All
    /// configuration failures surface here, before the server accepts
    /// requests.
    pub async fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        let service_state = Self {
            postgres: config.connect_postgres().await?,
            password_hasher: config.build_password_hasher()?,
            session_keys: config.load_session_keys()?,
        };

        service_state.session_keys.validate_keys()?;

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
