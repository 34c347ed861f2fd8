//! Core TOML config loading: read from path or platform default.

use crate::schema::TetherConfig;
use crate::validation;
use std::path::Path;
use tether_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// Validation failures are logged as warnings; callers that need a hard
/// failure run [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<TetherConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: TetherConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from `$TETHER_CONFIG` or the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/tether/config.toml`
/// On Linux: `~/.config/tether/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<TetherConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(TetherConfig::default());
    }

    load_from_path(&path)
}
