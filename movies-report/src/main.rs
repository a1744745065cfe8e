//! movies-report - static report over the `movies` store
//!
//! Prints the revenue ranking and the mean rating per genre, then writes
//! the rating trend and ROI distribution charts to `<data>/outputs`.

use anyhow::{Context, Result};
use clap::Parser;
use movies_common::config::{resolve_data_dir, DataPaths, TomlConfig};
use movies_common::queries::DEFAULT_TOP_N;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for movies-report
#[derive(Parser, Debug)]
#[command(name = "movies-report")]
#[command(about = "Summaries and charts from the movies store")]
#[command(version)]
struct Args {
    /// Data folder holding the store and the outputs folder
    #[arg(short, long, env = "MOVIES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Rows in the revenue ranking
    #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
    top: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .init();

    info!("Starting movies-report v{}", env!("CARGO_PKG_VERSION"));

    let paths = DataPaths::new(resolve_data_dir(args.data_dir.as_deref(), &config));
    info!("Database path: {}", paths.database.display());

    let artifacts = match movies_report::report::run(&paths, args.top).await {
        Ok(artifacts) => artifacts,
        Err(e) => {
            error!("Report failed: {}", e);
            return Err(e).context("Report stage failed");
        }
    };

    info!("Rating trend: {}", artifacts.rating_trend.display());
    info!("ROI distribution: {}", artifacts.roi_distribution.display());

    Ok(())
}
