//! CLI configuration management.
//!
//! The configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig    # Host, port, timeouts, CORS
//! └── service: ServiceArgs    # Database, session secret, hashing cost
//! ```
//!
//! Every option can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod server;
mod service;

use clap::Parser;

pub use server::ServerConfig;
pub use service::ServiceArgs;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "roster")]
#[command(about = "Roster user directory and session authentication server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Service configuration (database, session secret, hashing cost).
    #[clap(flatten)]
    pub service: ServiceArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
