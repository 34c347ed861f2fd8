//! Bridge section: script namespace and page hooks.

use serde::{Deserialize, Serialize};

/// Script-facing bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSection {
    /// Global object under which capabilities are exposed to script.
    pub namespace: String,
    /// Function on the namespace object invoked after each page finishes loading.
    pub page_finished_handler: String,
    /// User agent for web content requests. `None` keeps the engine default.
    pub user_agent: Option<String>,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            namespace: "NativeBridge".into(),
            page_finished_handler: "pageFinished".into(),
            user_agent: None,
        }
    }
}
