//! Configuration system using TOML files.
//!
//! Config is read from the OS-standard config directory:
//! - Windows: %APPDATA%\book-isbn\config.toml
//! - macOS: ~/Library/Application Support/book-isbn/config.toml
//! - Linux: ~/.config/book-isbn/config.toml
//!
//! or from an explicit path given on the command line. Every field has a
//! default, so a partial file (or no file at all) is fine. Command-line flags
//! override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::enrichment::{FailurePolicy, PoolConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// Where titles come from
    pub source: SourceConfig,

    /// Lookup pool settings
    pub enrichment: EnrichmentConfig,

    /// Where results go
    pub output: OutputConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Google Books API key (optional, raises the daily quota)
    pub google_books_api_key: Option<String>,
}

/// Title source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Bookmeter user id whose wish list is read
    pub user_id: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            user_id: "XXXXXX".to_string(),
        }
    }
}

/// Enrichment pool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Maximum concurrent lookups (signed so that bad values can be reported)
    pub concurrency_limit: i64,

    /// Log a line per title
    pub verbose: bool,

    /// "abort" or "best-effort"
    pub failure_policy: FailurePolicy,

    /// Per-lookup deadline in seconds (unset = no deadline)
    pub lookup_timeout_secs: Option<u64>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 3,
            verbose: false,
            failure_policy: FailurePolicy::Abort,
            lookup_timeout_secs: None,
        }
    }
}

impl EnrichmentConfig {
    /// Convert to the pool's settings, rejecting limits below one
    pub fn to_pool_config(&self) -> Result<PoolConfig, ConfigError> {
        let concurrency_limit = usize::try_from(self.concurrency_limit)
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or(ConfigError::InvalidLimit(self.concurrency_limit))?;

        let lookup_timeout = match self.lookup_timeout_secs {
            Some(0) => return Err(ConfigError::InvalidTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(PoolConfig {
            concurrency_limit,
            verbose: self.verbose,
            failure_policy: self.failure_policy,
            lookup_timeout,
        })
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON file the book list is written to
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./book_list.json"),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("book-isbn"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path
///
/// Unlike [`load`], a missing or broken file is an error: the user asked for it.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Concurrency limit must be a positive integer, got {0}")]
    InvalidLimit(i64),

    #[error("Lookup timeout must be at least one second")]
    InvalidTimeout,
}

// ============================================================================
// Tests
// ============================================================================
