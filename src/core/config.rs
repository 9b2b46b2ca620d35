//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.kodex/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KodexConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.kodex/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kodex").join("config.toml"))
}

/// Load config from `~/.kodex/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KodexConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KodexConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KodexConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(KodexConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: KodexConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Kodex Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# Base URL of the law library backend.
# base_url = "http://localhost:5000/api"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Could not create config directory {}: {}", parent.display(), e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Could not write default config {}: {}", path.display(), e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves the final configuration: defaults, then the config file, then
/// the `KODEX_BASE_URL` env var, then the CLI flag. Trailing slashes are
/// stripped so URL joining stays predictable.
pub fn resolve(config: KodexConfig, cli_base_url: Option<String>) -> ResolvedConfig {
    let mut base_url = DEFAULT_BASE_URL.to_string();

    if let Some(url) = config.api.base_url {
        base_url = url;
    }
    if let Ok(url) = std::env::var("KODEX_BASE_URL")
        && !url.is_empty()
    {
        base_url = url;
    }
    if let Some(url) = cli_base_url {
        base_url = url;
    }

    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
    }
}
