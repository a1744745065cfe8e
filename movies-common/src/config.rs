//! Configuration loading and data folder resolution
//!
//! Data folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `MOVIES_DATA_DIR`
//! 3. TOML config file (`data_dir` key)
//! 4. Compiled default `./data` (fallback)
//!
//! A missing or unreadable config file never stops a stage; it is logged
//! and the compiled defaults are used instead.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the data folder
pub const DATA_DIR_ENV: &str = "MOVIES_DATA_DIR";

/// Environment variable naming an explicit config file
pub const CONFIG_FILE_ENV: &str = "MOVIES_CONFIG";

/// Raw input file name inside the data folder
pub const RAW_FILE_NAME: &str = "tmdb_5000_movies.csv";

/// Intermediate (clean) file name inside the data folder
pub const CLEAN_FILE_NAME: &str = "movies_clean.csv";

/// Store file name inside the data folder
pub const DB_FILE_NAME: &str = "movies.db";

/// Report output folder name inside the data folder
pub const OUTPUT_DIR_NAME: &str = "outputs";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND: &str = "127.0.0.1:8050";
const DEFAULT_PAGE_SIZE: i64 = 20;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[dashboard]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Listen address for the dashboard server
    pub bind: String,
    /// Rows per table page
    pub page_size: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// `[logging]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the config file if one exists, otherwise defaults
    ///
    /// Parse failures are logged and fall back to defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = locate_config_file() else {
            debug!("No config file found, using compiled defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Locate the config file for the platform
///
/// `MOVIES_CONFIG` wins; then the user config dir, then `/etc` on Linux.
fn locate_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        let path = PathBuf::from(path);
        return path.exists().then_some(path);
    }

    let user_config = dirs::config_dir().map(|d| d.join("movies-pipeline").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/movies-pipeline/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolve the data folder following the priority order above
pub fn resolve_data_dir(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATA_DIR_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.data_dir {
        return path.clone();
    }

    PathBuf::from(DEFAULT_DATA_DIR)
}

/// File locations for every stage, derived from the data folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub raw_csv: PathBuf,
    pub clean_csv: PathBuf,
    pub database: PathBuf,
    pub output_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            raw_csv: data_dir.join(RAW_FILE_NAME),
            clean_csv: data_dir.join(CLEAN_FILE_NAME),
            database: data_dir.join(DB_FILE_NAME),
            output_dir: data_dir.join(OUTPUT_DIR_NAME),
            data_dir,
        }
    }

    /// Create the data folder if missing
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Create the report output folder if missing
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}
