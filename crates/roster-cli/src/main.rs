#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use roster_server::service::ServiceState;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "roster_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "roster_cli::server::shutdown";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    log_startup_info();

    cli.server
        .validate()
        .context("invalid server configuration")?;

    let service_config = cli
        .service
        .to_service_config()
        .context("invalid service configuration")?;

    let state = ServiceState::from_config(&service_config)
        .await
        .context("failed to create service state")?;

    let router = create_router(state, &cli)?;
    server::serve_http(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// request tracing wraps timeouts, which wrap CORS, which wraps the routes.
fn create_router(state: ServiceState, cli: &Cli) -> anyhow::Result<Router> {
    let api_routes: Router = roster_server::handler::routes(state.clone()).with_state(state);

    let cors = cli.server.cors_layer().context("invalid CORS origin")?;
    let timeout =
        tower_http::timeout::TimeoutLayer::new(Duration::from_secs(cli.server.request_timeout));

    Ok(api_routes
        .layer(cors)
        .layer(timeout)
        .layer(TraceLayer::new_for_http()))
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting roster server"
    );

    tracing::debug!(
        target: TRACING_TARGET_SERVER_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "build information"
    );
}
