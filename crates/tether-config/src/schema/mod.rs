//! Configuration schema types for Tether.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod navigation;
mod share;
mod system;

pub use bridge::*;
pub use navigation::*;
pub use share::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Tether.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TetherConfig {
    pub bridge: BridgeSection,
    pub navigation: NavigationConfig,
    pub share: ShareConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bridge_section() {
        let config = TetherConfig::default();
        assert_eq!(config.bridge.namespace, "NativeBridge");
        assert_eq!(config.bridge.page_finished_handler, "pageFinished");
        assert!(config.bridge.user_agent.is_none());
    }

    #[test]
    fn default_navigation_section() {
        let config = TetherConfig::default();
        assert_eq!(
            config.navigation.handled_triggers,
            vec![NavigationTrigger::UserClick]
        );
        assert_eq!(
            config.navigation.history_triggers,
            vec![NavigationTrigger::HistoryPush, NavigationTrigger::HistoryPop]
        );
        assert!(config.navigation.fragment_is_history);
    }

    #[test]
    fn default_share_and_logging() {
        let config = TetherConfig::default();
        assert_eq!(config.share.default_item_order, ShareItemOrder::MessageFirst);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: TetherConfig = toml::from_str(
            r#"
[navigation]
handled_triggers = ["user_click", "form_submission"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.navigation.handled_triggers,
            vec![
                NavigationTrigger::UserClick,
                NavigationTrigger::FormSubmission
            ]
        );
        assert!(config.navigation.fragment_is_history);
        assert_eq!(config.bridge.namespace, "NativeBridge");
    }

    #[test]
    fn unknown_trigger_name_is_rejected() {
        let result: Result<TetherConfig, _> = toml::from_str(
            r#"
[navigation]
handled_triggers = ["teleport"]
"#,
        );
        assert!(result.is_err());
    }
}
