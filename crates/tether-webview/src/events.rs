//! Host event types.

use serde::{Deserialize, Serialize};

use crate::navigation::NavigationIntent;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

#[cfg(feature = "wry")]
impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events the embedding host feeds to a [`crate::WebController`].
#[derive(Debug, Clone)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// A fresh script global environment exists. Only for engines with a
    /// native context-created callback; script-signaled creation arrives
    /// as an `IpcMessage`.
    ScriptContextCreated,
    /// Document title changed.
    TitleChanged { title: String },
    /// A message was posted by script.
    IpcMessage { body: String },
    /// The web content wants to navigate.
    NavigationRequested { intent: NavigationIntent },
    /// The web content was closed / destroyed.
    Closed,
}
