//! movies-etl - Transformer and Loader stages
//!
//! `transform` cleans the raw input file into the intermediate file,
//! `load` rebuilds the `movies` table from it, `run` does both in order.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use movies_common::config::{resolve_data_dir, DataPaths, TomlConfig};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for movies-etl
#[derive(Parser, Debug)]
#[command(name = "movies-etl")]
#[command(about = "Clean the raw movie file and load it into the store")]
#[command(version)]
struct Args {
    /// Data folder holding the raw file, intermediate file and store
    #[arg(short, long, global = true, env = "MOVIES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Raw file → intermediate file
    Transform,
    /// Intermediate file → store (replaces the table)
    Load,
    /// Transform, then load
    Run,
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

    info!("Starting movies-etl v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = resolve_data_dir(args.data_dir.as_deref(), &config);
    let paths = DataPaths::new(data_dir);
    info!("Data folder: {}", paths.data_dir.display());

    match args.command {
        Command::Transform => {
            movies_etl::transform::run(&paths).context("Transform stage failed")?;
        }
        Command::Load => {
            movies_etl::load::run(&paths).await.context("Load stage failed")?;
        }
        Command::Run => {
            movies_etl::transform::run(&paths).context("Transform stage failed")?;
            movies_etl::load::run(&paths).await.context("Load stage failed")?;
        }
    }

    Ok(())
}
