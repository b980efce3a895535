//! Artifact Registry Server
//!
//! Main entry point for the artifact listing HTTP server.
//! This binary loads the artifact catalog, wires the listing service and
//! serves the API with graceful shutdown.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use artifact_registry_api::build_api_server_with_config;
use artifact_registry_service::{DefaultArtifactListingService, InMemoryArtifactCatalog};
use clap::Parser;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};

use config::ServerConfig;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory
    #[arg(short, long, env = "CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Environment (development, production, etc.)
    #[arg(short, long, env = "ENVIRONMENT", default_value = "development")]
    environment: String,

    /// Server host
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// JSON file with artifact metadata to serve
    #[arg(long, env = "CATALOG_SEED")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = resolve_config(&args)?;

    telemetry::init(&config.logging).context("Failed to initialize telemetry")?;

    info!("Starting Artifact Registry Server");
    info!("Environment: {}", args.environment);
    info!("Server: {}", config.bind_address());

    let catalog = load_catalog(&config)?;
    let listing = Arc::new(DefaultArtifactListingService::new(
        Arc::new(catalog),
        config.pagination,
    ));

    let app = build_api_server_with_config(listing, config.http.clone());

    let http_addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid HTTP bind address")?;

    let listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .context("Failed to bind HTTP server")?;

    info!("HTTP Server listening on http://{}", http_addr);

    if config.server.graceful_shutdown {
        let shutdown_started = Arc::new(Notify::new());
        let notifier = Arc::clone(&shutdown_started);

        let server = axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                notifier.notify_one();
            })
            .into_future();

        let timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
        info!("Graceful shutdown timeout: {} seconds", timeout.as_secs());

        tokio::select! {
            res = server => res.context("HTTP Server error")?,
            _ = async {
                shutdown_started.notified().await;
                tokio::time::sleep(timeout).await;
            } => {
                warn!("Graceful shutdown timed out, dropping open connections");
            }
        }
    } else {
        axum::serve(listener, app.into_make_service())
            .await
            .context("HTTP Server error")?;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Load file and environment configuration, then apply command-line overrides
///
/// A broken configuration stops startup rather than falling back to
/// defaults, which would silently serve an empty catalog.
fn resolve_config(args: &Args) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(&args.config_dir, &args.environment).with_context(|| {
        format!(
            "Failed to load configuration from {} ({})",
            args.config_dir.display(),
            args.environment
        )
    })?;

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(log_level) = &args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(seed) = &args.seed {
        config.catalog.seed_path = Some(seed.clone());
    }

    Ok(config)
}

/// Build the in-memory catalog, seeded from JSON when configured
fn load_catalog(config: &ServerConfig) -> Result<InMemoryArtifactCatalog> {
    match &config.catalog.seed_path {
        Some(path) => InMemoryArtifactCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => {
            warn!("No catalog seed configured, serving an empty catalog");
            Ok(InMemoryArtifactCatalog::new())
        }
    }
}

/// Graceful shutdown signal handler
///
/// Waits for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
