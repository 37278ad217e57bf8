//! HTTP server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Result as AnyhowResult, anyhow};
use axum::http::{HeaderValue, Method, header};
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

/// HTTP server configuration: network binding, timeouts, and CORS.
///
/// # Environment Variables
///
/// - `HOST` - Server host address (default: 127.0.0.1)
/// - `PORT` - Server port (default: 3000, valid range: 1024-65535)
/// - `REQUEST_TIMEOUT` - Request processing timeout in seconds (default: 30)
/// - `SHUTDOWN_TIMEOUT` - Graceful shutdown timeout in seconds (default: 30)
/// - `CORS_ALLOWED_ORIGINS` - Comma-separated list of allowed CORS origins
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to.
    ///
    /// Use "127.0.0.1" for localhost only, "0.0.0.0" for all interfaces.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port number for the server to listen on.
    ///
    /// Must be in the range 1024-65535; ports below 1024 require root
    /// privileges.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Maximum time in seconds to wait for a request to complete.
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Maximum time in seconds to wait for graceful shutdown.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,

    /// List of allowed CORS origins.
    ///
    /// If empty, localhost origins are used for development.
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

/// Default host address for development.
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.port < 1024 {
            return Err(anyhow!(
                "port {} requires root privileges; use a port in 1024-65535",
                self.port
            ));
        }

        if !(1..=300).contains(&self.request_timeout) {
            return Err(anyhow!("request timeout must be between 1 and 300 seconds"));
        }

        if !(1..=300).contains(&self.shutdown_timeout) {
            return Err(anyhow!(
                "shutdown timeout must be between 1 and 300 seconds"
            ));
        }

        Ok(())
    }

    /// Returns the socket address to bind to.
    #[inline]
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns whether the server binds to all interfaces.
    #[inline]
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Returns the graceful shutdown window as a [`Duration`].
    #[inline]
    pub fn shutdown_duration(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Builds the CORS layer from the configured origins.
    ///
    /// Falls back to common localhost development origins when no origin is
    /// configured. Credentials are allowed because the session cookie rides
    /// along on every guarded request.
    pub fn cors_layer(&self) -> AnyhowResult<CorsLayer> {
        let origins: Vec<HeaderValue> = if self.cors_allowed_origins.is_empty() {
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ]
        } else {
            self.cors_allowed_origins
                .iter()
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .map_err(|e| anyhow!("invalid CORS origin {origin:?}: {e}"))
                })
                .collect::<AnyhowResult<_>>()?
        };

        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ServerConfig {
        ServerConfig {
            host: default_host(),
            port: 3000,
            request_timeout: 30,
            shutdown_timeout: 30,
            cors_allowed_origins: Vec::new(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn privileged_port_is_rejected() {
        let mut config = sample_config();
        config.port = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_timeouts_are_rejected() {
        let mut config = sample_config();
        config.request_timeout = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.shutdown_timeout = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn server_addr_combines_host_and_port() {
        let config = sample_config();
        assert_eq!(config.server_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.binds_to_all_interfaces());
    }

    #[test]
    fn cors_layer_rejects_invalid_origin() {
        let mut config = sample_config();
        config.cors_allowed_origins = vec!["http://ok.example".into(), "bad\norigin".into()];
        assert!(config.cors_layer().is_err());
    }
}
