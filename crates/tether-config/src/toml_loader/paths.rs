//! Where the config file lives, and writing the documented default.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tether_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TETHER_CONFIG";

const APP_DIR: &str = "tether";
const CONFIG_FILE: &str = "config.toml";

/// The config file to use: `$TETHER_CONFIG` if set and non-empty, else
/// `<config dir>/tether/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(std::env::var_os(CONFIG_ENV), dirs::config_dir())
}

pub(crate) fn resolve_config_path(
    explicit: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    match explicit.filter(|p| !p.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => config_dir
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into())),
    }
}

/// Write the commented default config to `path`, creating parents.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("failed to {what} {}: {e}", at.display()))
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_error("create config directory", parent, e))?;
    }
    std::fs::write(path, default_config_toml())
        .map_err(|e| io_error("write default config to", path, e))?;

    info!(path = %path.display(), "created default config");
    Ok(())
}
