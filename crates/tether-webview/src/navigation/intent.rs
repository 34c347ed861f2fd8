//! Navigation value types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tether_common::NodeId;

/// A URL plus the request metadata a rewrite hook may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl NavigationRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

pub(crate) fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(doc, _)| doc)
}

/// What caused a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    UserClick,
    FormSubmission,
    BackForward,
    Reload,
    Programmatic,
    /// Client-side route change via `pushState` / `replaceState`.
    HistoryPush,
    /// Client-side `popstate`.
    HistoryPop,
}

/// A navigation the state machine has to decide on. Consumed by
/// [`super::NavigationStateMachine::handle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub request: NavigationRequest,
    pub trigger: TriggerKind,
}

impl NavigationIntent {
    pub fn new(request: NavigationRequest, trigger: TriggerKind) -> Self {
        Self { request, trigger }
    }

    pub fn user_click(url: impl Into<String>) -> Self {
        Self::new(NavigationRequest::new(url), TriggerKind::UserClick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    Pushed,
    Modal,
}

/// What a presentation node shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRef {
    Request(NavigationRequest),
    Html(String),
}

/// A unit of presentation for the host's navigation container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationNode {
    pub id: NodeId,
    pub content: ContentRef,
    pub mode: PresentationMode,
    pub title: Option<String>,
}

impl PresentationNode {
    pub fn pushed(request: NavigationRequest, title: Option<String>) -> Self {
        Self {
            id: NodeId::new(),
            content: ContentRef::Request(request),
            mode: PresentationMode::Pushed,
            title,
        }
    }

    pub fn modal(content: ContentRef, title: Option<String>) -> Self {
        Self {
            id: NodeId::new(),
            content,
            mode: PresentationMode::Modal,
            title,
        }
    }
}
