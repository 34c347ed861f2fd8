//! Navigation/load state machine.
//!
//! Decides for each navigation whether it is pushed onto the presentation
//! stack, forwarded to the host's default loading path, or is a
//! history-stack move inside the current document. Only this type mutates
//! [`LoadState`].

mod classify;
mod intent;

pub use classify::{NavigationClass, NavigationClassifier, TriggerClassifier};
pub use intent::{
    ContentRef, NavigationIntent, NavigationRequest, PresentationMode, PresentationNode,
    TriggerKind,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tether_common::NodeId;
use tracing::{debug, info};

use crate::delegate::ControllerDelegate;
use crate::host::NavigationContainer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    None,
    UrlLoaded,
    HistoryStackNavigated,
}

/// What [`NavigationStateMachine::handle`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A pushed node was appended to the container.
    Pushed(NodeId),
    /// Not handled here. The request is the original, untouched, for the
    /// host's default path.
    Forwarded(NavigationRequest),
    /// Moved within the current document. The script context survives.
    HistoryNavigated,
}

pub struct NavigationStateMachine {
    state: LoadState,
    handled_triggers: HashSet<TriggerKind>,
    classifier: Box<dyn NavigationClassifier>,
    current_url: Option<String>,
}

impl NavigationStateMachine {
    /// `handled_triggers` are the full-load triggers pushed onto the stack;
    /// every other full load is forwarded.
    pub fn new(
        handled_triggers: impl IntoIterator<Item = TriggerKind>,
        classifier: Box<dyn NavigationClassifier>,
    ) -> Self {
        Self {
            state: LoadState::None,
            handled_triggers: handled_triggers.into_iter().collect(),
            classifier,
            current_url: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn set_current_url(&mut self, url: impl Into<String>) {
        self.current_url = Some(url.into());
    }

    pub fn handle(
        &mut self,
        intent: NavigationIntent,
        delegate: Option<&dyn ControllerDelegate>,
        container: &dyn NavigationContainer,
    ) -> NavigationOutcome {
        let class = self.classifier.classify(&intent, self.current_url());
        if class == NavigationClass::HistoryStack {
            debug!(url = %intent.request.url, trigger = ?intent.trigger, "history-stack navigation");
            self.state = LoadState::HistoryStackNavigated;
            self.current_url = Some(intent.request.url);
            return NavigationOutcome::HistoryNavigated;
        }

        if !self.handled_triggers.contains(&intent.trigger) {
            debug!(url = %intent.request.url, trigger = ?intent.trigger, "trigger not handled, forwarding");
            return NavigationOutcome::Forwarded(intent.request);
        }
        let should_open = delegate
            .and_then(|d| d.should_open_request(&intent.request))
            .unwrap_or(true);
        if !should_open {
            debug!(url = %intent.request.url, "delegate declined, forwarding");
            return NavigationOutcome::Forwarded(intent.request);
        }

        let request = prepare_request(intent.request, delegate);
        NavigationOutcome::Pushed(self.append(request, None, container))
    }

    /// Push `request` as a new page.
    pub fn push(
        &mut self,
        request: NavigationRequest,
        title: Option<String>,
        delegate: Option<&dyn ControllerDelegate>,
        container: &dyn NavigationContainer,
    ) -> NodeId {
        let request = prepare_request(request, delegate);
        self.append(request, title, container)
    }

    /// Present content modally. Never touches [`LoadState`].
    pub fn present_modal(
        &self,
        content: ContentRef,
        title: Option<String>,
        delegate: Option<&dyn ControllerDelegate>,
        container: &dyn NavigationContainer,
    ) -> NodeId {
        let content = match content {
            ContentRef::Request(request) => ContentRef::Request(prepare_request(request, delegate)),
            html => html,
        };
        let node = PresentationNode::modal(content, title);
        let id = node.id;
        let untaken = match delegate {
            Some(d) => d.present_modal(node),
            None => Some(node),
        };
        match untaken {
            Some(node) => {
                info!(node = %id.short(), "presenting modal");
                container.present_modal(node);
            }
            None => debug!(node = %id.short(), "delegate presented modal"),
        }
        id
    }

    /// Record an in-place load of `url`.
    pub fn record_load(&mut self, url: impl Into<String>) {
        self.state = LoadState::UrlLoaded;
        self.current_url = Some(url.into());
    }

    fn append(
        &mut self,
        request: NavigationRequest,
        title: Option<String>,
        container: &dyn NavigationContainer,
    ) -> NodeId {
        let node = PresentationNode::pushed(request, title);
        let id = node.id;
        info!(node = %id.short(), "pushing navigation node");
        self.state = LoadState::UrlLoaded;
        container.append_pushed(node);
        id
    }
}

/// Apply the delegate's rewrite hook before a request leaves the bridge.
pub fn prepare_request(
    request: NavigationRequest,
    delegate: Option<&dyn ControllerDelegate>,
) -> NavigationRequest {
    match delegate.and_then(|d| d.rewrite_request(&request)) {
        Some(rewritten) => {
            debug!(from = %request.url, to = %rewritten.url, "request rewritten");
            rewritten
        }
        None => request,
    }
}

#[cfg(test)]
mod tests;
