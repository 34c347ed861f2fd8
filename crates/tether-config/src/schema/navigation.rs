//! Navigation section: which triggers are pushed and which are history moves.

use serde::{Deserialize, Serialize};

/// Trigger kinds as they appear in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTrigger {
    UserClick,
    FormSubmission,
    BackForward,
    Reload,
    Programmatic,
    HistoryPush,
    HistoryPop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Full-load triggers eligible for internal (pushed) handling.
    /// Anything else goes to the web content's default path.
    pub handled_triggers: Vec<NavigationTrigger>,
    /// Triggers classified as history-stack navigations.
    pub history_triggers: Vec<NavigationTrigger>,
    /// Treat a same-document fragment change as a history-stack navigation.
    pub fragment_is_history: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            handled_triggers: vec![NavigationTrigger::UserClick],
            history_triggers: vec![NavigationTrigger::HistoryPush, NavigationTrigger::HistoryPop],
            fragment_is_history: true,
        }
    }
}
