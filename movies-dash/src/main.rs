//! movies-dash - interactive genre dashboard over the `movies` store
//!
//! Takes one snapshot of the store at startup, then serves the filter and
//! redraw page. The store connection is not held while serving.

use anyhow::{Context, Result};
use clap::Parser;
use movies_common::config::{resolve_data_dir, DataPaths, TomlConfig};
use movies_dash::api::buildinfo::BuildInfo;
use movies_dash::dashboard::DashboardData;
use movies_dash::{build_router, AppState};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};

/// Command-line arguments for movies-dash
#[derive(Parser, Debug)]
#[command(name = "movies-dash")]
#[command(about = "Interactive movie analytics dashboard")]
#[command(version)]
struct Args {
    /// Data folder holding the store
    #[arg(short, long, env = "MOVIES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Listen address (overrides the config file)
    #[arg(short, long, env = "MOVIES_DASH_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.logging.level).into()),
        )
        .init();

    // Log build identification before touching the store
    info!("Starting movies-dash {}", BuildInfo::current());

    let paths = DataPaths::new(resolve_data_dir(args.data_dir.as_deref(), &config));
    info!("Database path: {}", paths.database.display());

    let data = match DashboardData::load(&paths.database).await {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to load dashboard data: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(data, config.dashboard.page_size);
    let app = build_router(state);

    let bind = args.bind.unwrap_or(config.dashboard.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    info!("movies-dash listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
///
/// A signal that cannot be installed is logged and never fires; the other
/// one still stops the server.
async fn shutdown_signal() {
    tokio::select! {
        _ = ctrl_c() => info!("Received Ctrl+C, stopping dashboard"),
        _ = terminate() => info!("Received SIGTERM, stopping dashboard"),
    }
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!("SIGTERM handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
