//! Full load vs. history-stack classification.
//!
//! Which triggers count as history-stack navigation belongs to the host,
//! so the policy is injected into the state machine.

use std::collections::HashSet;

use super::intent::{strip_fragment, NavigationIntent, TriggerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationClass {
    /// Replaces the document and its script context.
    FullLoad,
    /// Moves within the current document; the context survives.
    HistoryStack,
}

pub trait NavigationClassifier {
    fn classify(&self, intent: &NavigationIntent, current_url: Option<&str>) -> NavigationClass;
}

/// Classifies by trigger, plus same-document fragment changes.
#[derive(Debug, Clone)]
pub struct TriggerClassifier {
    history_triggers: HashSet<TriggerKind>,
    fragment_is_history: bool,
}

impl TriggerClassifier {
    pub fn new(
        history_triggers: impl IntoIterator<Item = TriggerKind>,
        fragment_is_history: bool,
    ) -> Self {
        Self {
            history_triggers: history_triggers.into_iter().collect(),
            fragment_is_history,
        }
    }
}

impl Default for TriggerClassifier {
    fn default() -> Self {
        Self::new([TriggerKind::HistoryPush, TriggerKind::HistoryPop], true)
    }
}

impl NavigationClassifier for TriggerClassifier {
    fn classify(&self, intent: &NavigationIntent, current_url: Option<&str>) -> NavigationClass {
        if self.history_triggers.contains(&intent.trigger) {
            return NavigationClass::HistoryStack;
        }
        if self.fragment_is_history {
            if let Some(current) = current_url {
                let target = &intent.request.url;
                if target.contains('#') && strip_fragment(target) == strip_fragment(current) {
                    return NavigationClass::HistoryStack;
                }
            }
        }
        NavigationClass::FullLoad
    }
}
