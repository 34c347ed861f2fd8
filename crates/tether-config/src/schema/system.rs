//! System configuration types: logging.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "tether=debug",
            LogLevel::Info => "tether=info",
            LogLevel::Warning => "tether=warn",
            LogLevel::Error => "tether=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_directives() {
        assert_eq!(LogLevel::Debug.as_directive(), "tether=debug");
        assert_eq!(LogLevel::Warning.as_directive(), "tether=warn");
    }

    #[test]
    fn level_parses_uppercase() {
        let cfg: LoggingConfig = toml::from_str("level = \"DEBUG\"").unwrap();
        assert_eq!(cfg.level, LogLevel::Debug);
    }
}
