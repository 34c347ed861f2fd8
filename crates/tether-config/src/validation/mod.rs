//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod bridge;
mod helpers;
mod navigation;

#[cfg(test)]
mod tests;

use crate::schema::TetherConfig;
use tether_common::ConfigError;

pub use helpers::is_js_identifier;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TetherConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    bridge::validate_bridge(&mut errors, config);
    navigation::validate_navigation(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
