//! Config file types to controller settings.

use tether_config::{NavigationTrigger, ShareItemOrder, TetherConfig};
use tether_webview::capability::share::ItemOrder;
use tether_webview::{ControllerConfig, TriggerKind};

fn trigger(t: NavigationTrigger) -> TriggerKind {
    match t {
        NavigationTrigger::UserClick => TriggerKind::UserClick,
        NavigationTrigger::FormSubmission => TriggerKind::FormSubmission,
        NavigationTrigger::BackForward => TriggerKind::BackForward,
        NavigationTrigger::Reload => TriggerKind::Reload,
        NavigationTrigger::Programmatic => TriggerKind::Programmatic,
        NavigationTrigger::HistoryPush => TriggerKind::HistoryPush,
        NavigationTrigger::HistoryPop => TriggerKind::HistoryPop,
    }
}

pub fn controller_config(config: &TetherConfig) -> ControllerConfig {
    ControllerConfig {
        namespace: config.bridge.namespace.clone(),
        page_finished_handler: config.bridge.page_finished_handler.clone(),
        handled_triggers: config
            .navigation
            .handled_triggers
            .iter()
            .copied()
            .map(trigger)
            .collect(),
        history_triggers: config
            .navigation
            .history_triggers
            .iter()
            .copied()
            .map(trigger)
            .collect(),
        fragment_is_history: config.navigation.fragment_is_history,
        share_item_order: match config.share.default_item_order {
            ShareItemOrder::MessageFirst => ItemOrder::MessageFirst,
            ShareItemOrder::UrlFirst => ItemOrder::UrlFirst,
        },
        user_agent: config.bridge.user_agent.clone(),
    }
}
