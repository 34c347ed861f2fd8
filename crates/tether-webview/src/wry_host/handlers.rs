use std::collections::HashSet;

use tracing::{debug, warn};
use wry::WebViewBuilder;

use super::Shared;
use crate::events::{PageLoadState, WebViewEvent};
use crate::navigation::{NavigationIntent, NavigationRequest, TriggerKind};

/// Whether the engine may perform a navigation to `url` without asking the
/// controller first: a load the bridge requested itself, or a jump within
/// the document on screen.
pub fn should_pass(url: &str, current: &str, pass: &mut HashSet<String>) -> bool {
    if pass.remove(url) {
        return true;
    }
    let document = |u: &str| u.split_once('#').map_or(u.to_string(), |(d, _)| d.to_string());
    url == "about:blank" || (url.contains('#') && document(url) == document(current))
}

pub(super) fn attach_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    shared: Shared,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        // The context-created signal arrives here like any other message;
        // the controller decides whether the state allows it.
        let body = request.body().to_string();
        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(body_len = body.len(), "IPC message from script");
        shared.push(WebViewEvent::IpcMessage { body });
    })
}

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    shared: Shared,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        if let Ok(mut current) = shared.current.lock() {
            current.clone_from(&url);
        }
        shared.push(WebViewEvent::PageLoad { state, url });
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    shared: Shared,
) -> WebViewBuilder<'a> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(title = %title, "title changed");
        shared.push(WebViewEvent::TitleChanged { title });
    })
}

/// Navigations the bridge did not start are held back and queued for the
/// controller, which pushes, forwards, or treats them as history moves.
pub(super) fn attach_navigation_handler<'a>(
    builder: WebViewBuilder<'a>,
    shared: Shared,
) -> WebViewBuilder<'a> {
    builder.with_navigation_handler(move |url| {
        let current = shared
            .current
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default();
        let passed = match shared.pass.lock() {
            Ok(mut pass) => should_pass(&url, &current, &mut pass),
            Err(_) => false,
        };
        if passed {
            debug!(url = %url, "navigation allowed");
            return true;
        }

        debug!(url = %url, "navigation held for controller");
        shared.push(WebViewEvent::NavigationRequested {
            intent: NavigationIntent::new(NavigationRequest::new(url), TriggerKind::UserClick),
        });
        false
    })
}
