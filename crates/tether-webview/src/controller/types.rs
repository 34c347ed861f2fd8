use std::rc::Rc;

use crate::capability::share::ItemOrder;
use crate::host::{NavigationChrome, NavigationContainer, ScriptRuntime, ShareHost, WebContent};
use crate::navigation::TriggerKind;

/// Static settings of one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Global object capabilities are bound under.
    pub namespace: String,
    /// `<namespace>.<handler>()` is called after every finished load.
    pub page_finished_handler: String,
    /// Full-load triggers pushed as new pages; others are forwarded.
    pub handled_triggers: Vec<TriggerKind>,
    /// Triggers classified as history-stack navigation.
    pub history_triggers: Vec<TriggerKind>,
    pub fragment_is_history: bool,
    pub share_item_order: ItemOrder,
    pub user_agent: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            namespace: "NativeBridge".into(),
            page_finished_handler: "pageFinished".into(),
            handled_triggers: vec![TriggerKind::UserClick],
            history_triggers: vec![TriggerKind::HistoryPush, TriggerKind::HistoryPop],
            fragment_is_history: true,
            share_item_order: ItemOrder::MessageFirst,
            user_agent: None,
        }
    }
}

/// Host collaborators, injected once at construction.
#[derive(Clone)]
pub struct HostServices {
    pub runtime: Rc<dyn ScriptRuntime>,
    pub content: Rc<dyn WebContent>,
    pub container: Rc<dyn NavigationContainer>,
    pub chrome: Rc<dyn NavigationChrome>,
    pub share: Rc<dyn ShareHost>,
}
