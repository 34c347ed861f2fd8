//! Host adapter over a `wry::WebView`.
//!
//! wry handlers run inside the platform's event callbacks, so they only
//! queue [`WebViewEvent`]s. The host loop drains the queue and feeds each
//! event to its [`crate::WebController`].

mod handlers;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tether_common::BridgeError;
use tracing::debug;
use wry::http::{HeaderMap, HeaderName, HeaderValue};
use wry::{raw_window_handle, WebView, WebViewBuilder};

use crate::controller::ControllerConfig;
use crate::events::WebViewEvent;
use crate::glue;
use crate::host::{ScriptRuntime, WebContent};
use crate::navigation::NavigationRequest;

pub use handlers::should_pass;

const BLANK_PAGE: &str = "<html><body></body></html>";

/// State shared with the wry handler closures.
#[derive(Clone, Default)]
pub(crate) struct Shared {
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// URLs the bridge itself asked to load; let through once.
    pub(crate) pass: Arc<Mutex<HashSet<String>>>,
    /// URL of the document on screen.
    pub(crate) current: Arc<Mutex<String>>,
}

impl Shared {
    pub(crate) fn push(&self, event: WebViewEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn allow_once(&self, url: &str) {
        if let Ok(mut pass) = self.pass.lock() {
            pass.insert(url.to_string());
        }
    }
}

pub struct WryHost {
    webview: WebView,
    shared: Shared,
}

impl WryHost {
    /// Create the web view as a child of `window`, with the bridge shim as
    /// its initialization script.
    pub fn build_as_child<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: &ControllerConfig,
        initial: Option<&NavigationRequest>,
    ) -> Result<Self, wry::Error> {
        let shared = Shared::default();
        let init_script = glue::initialization_script(&config.namespace);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(cfg!(debug_assertions))
            .with_initialization_script(&init_script);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_ipc_handler(builder, shared.clone());
        builder = handlers::attach_page_load_handler(builder, shared.clone());
        builder = handlers::attach_title_handler(builder, shared.clone());
        builder = handlers::attach_navigation_handler(builder, shared.clone());

        builder = match initial {
            Some(request) => {
                shared.allow_once(&request.url);
                builder.with_url(&request.url)
            }
            None => builder.with_html(BLANK_PAGE),
        };

        let webview = builder.build_as_child(window)?;
        debug!(initial = ?initial.map(|r| r.url.as_str()), "web view created");
        Ok(Self { webview, shared })
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.shared
            .events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn inner(&self) -> &WebView {
        &self.webview
    }
}

fn host_error(e: wry::Error) -> BridgeError {
    BridgeError::Host(e.to_string())
}

fn header_map(request: &NavigationRequest) -> Result<HeaderMap, BridgeError> {
    let mut map = HeaderMap::new();
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| BridgeError::invalid(format!("header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| BridgeError::invalid(format!("header value {value:?}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

impl ScriptRuntime for WryHost {
    fn evaluate_script(&self, js: &str) -> Result<(), BridgeError> {
        self.webview.evaluate_script(js).map_err(host_error)
    }
}

impl WebContent for WryHost {
    fn load_request(&self, request: &NavigationRequest) -> Result<(), BridgeError> {
        self.shared.allow_once(&request.url);
        if request.headers.is_empty() {
            self.webview.load_url(&request.url).map_err(host_error)
        } else {
            let headers = header_map(request)?;
            self.webview
                .load_url_with_headers(&request.url, headers)
                .map_err(host_error)
        }
    }

    fn go_back(&self) -> bool {
        // wry exposes no history query; script history decides.
        self.webview.evaluate_script("history.back();").is_ok()
    }
}
