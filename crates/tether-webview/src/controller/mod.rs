//! The web content host facade.
//!
//! [`WebController`] wires the lifecycle, the registry population, the
//! navigation state machine and the delegate hooks together. A host feeds
//! it the three content notifications (load started, context created,
//! load finished) plus script messages and navigation requests, either
//! directly or as [`crate::WebViewEvent`]s through `handle_event`.

mod handlers;
mod types;

pub use types::{ControllerConfig, HostServices};

use std::rc::{Rc, Weak};

use serde_json::Value;
use tether_common::{BridgeError, NodeId};
use tracing::{debug, info, warn};

use crate::capability::navigation_bar::{NavigationBarCapability, NAVIGATION_BAR};
use crate::capability::share::{ShareCapability, ShareDelegate, SHARE};
use crate::capability::Capability;
use crate::context::{ContextState, Lifecycle};
use crate::delegate::ControllerDelegate;
use crate::glue::{self, is_script_identifier};
use crate::navigation::{
    prepare_request, ContentRef, LoadState, NavigationIntent, NavigationOutcome,
    NavigationRequest, NavigationStateMachine, TriggerClassifier,
};
use crate::registry::BridgeRegistry;

pub struct WebController {
    config: ControllerConfig,
    services: HostServices,
    lifecycle: Lifecycle,
    navigation: NavigationStateMachine,
    delegate: Option<Weak<dyn ControllerDelegate>>,
    share_delegate: Option<Weak<dyn ShareDelegate>>,
    url: Option<String>,
    title: Option<String>,
}

impl WebController {
    pub fn new(config: ControllerConfig, services: HostServices) -> Result<Self, BridgeError> {
        for (what, name) in [
            ("namespace", &config.namespace),
            ("page finished handler", &config.page_finished_handler),
        ] {
            if !is_script_identifier(name) {
                return Err(BridgeError::invalid(format!(
                    "{what} {name:?} is not a script identifier"
                )));
            }
        }

        let classifier = TriggerClassifier::new(
            config.history_triggers.iter().copied(),
            config.fragment_is_history,
        );
        let navigation = NavigationStateMachine::new(
            config.handled_triggers.iter().copied(),
            Box::new(classifier),
        );
        let lifecycle = Lifecycle::new(services.runtime.clone(), &config.namespace);

        Ok(Self {
            config,
            services,
            lifecycle,
            navigation,
            delegate: None,
            share_delegate: None,
            url: None,
            title: None,
        })
    }

    /// Install the delegate. Held weakly; the caller keeps it alive.
    pub fn set_delegate<D: ControllerDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    /// Install the share delegate, used from the next script context on.
    pub fn set_share_delegate<D: ShareDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.share_delegate = Some(weak);
    }

    fn delegate(&self) -> Option<Rc<dyn ControllerDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // -- content ------------------------------------------------------------

    pub fn load_url(&mut self, url: &str) -> Result<(), BridgeError> {
        self.load_request(NavigationRequest::new(url))
    }

    /// Load in place, after the rewrite hook.
    pub fn load_request(&mut self, request: NavigationRequest) -> Result<(), BridgeError> {
        let delegate = self.delegate();
        let request = prepare_request(request, delegate.as_deref());
        info!(url = %request.url, "loading");
        self.url = Some(request.url.clone());
        self.navigation.record_load(&request.url);
        self.services.content.load_request(&request)
    }

    pub fn push_url(&mut self, url: &str, title: Option<String>) -> NodeId {
        let delegate = self.delegate();
        self.navigation.push(
            NavigationRequest::new(url),
            title,
            delegate.as_deref(),
            self.services.container.as_ref(),
        )
    }

    pub fn present_modal_url(&self, url: &str, title: Option<String>) -> NodeId {
        self.present_modal(ContentRef::Request(NavigationRequest::new(url)), title)
    }

    pub fn present_modal_html(&self, html: &str, title: Option<String>) -> NodeId {
        self.present_modal(ContentRef::Html(html.to_string()), title)
    }

    fn present_modal(&self, content: ContentRef, title: Option<String>) -> NodeId {
        let delegate = self.delegate();
        self.navigation.present_modal(
            content,
            title,
            delegate.as_deref(),
            self.services.container.as_ref(),
        )
    }

    pub fn go_back(&self) -> bool {
        self.services.content.go_back()
    }

    /// Decide on a navigation and carry out the decision.
    pub fn navigation_requested(
        &mut self,
        intent: NavigationIntent,
    ) -> Result<NavigationOutcome, BridgeError> {
        let delegate = self.delegate();
        let outcome = self.navigation.handle(
            intent,
            delegate.as_deref(),
            self.services.container.as_ref(),
        );
        if let NavigationOutcome::Forwarded(request) = &outcome {
            self.services.content.load_request(request)?;
        }
        Ok(outcome)
    }

    // -- content notifications ----------------------------------------------

    pub fn load_started(&mut self, url: &str) {
        debug!(url, "load started");
        self.lifecycle.load_started();
        if let Some(d) = self.delegate() {
            d.did_start_load(url);
        }
    }

    /// A fresh global environment exists. Populates and installs the new
    /// generation before returning; returns its number.
    pub fn script_context_created(&mut self) -> Result<u64, BridgeError> {
        let delegate = self.delegate();
        let share_delegate = self.share_delegate.clone();
        let services = &self.services;
        let config = &self.config;

        let context = self.lifecycle.context_created(|registry| {
            register_builtins(registry, services, config, share_delegate);
            if let Some(d) = &delegate {
                d.configure_script_objects(registry);
            }
        })?;

        if let Some(d) = &delegate {
            d.did_create_script_context(context.generation());
        }
        Ok(context.generation())
    }

    pub fn load_finished(&mut self, url: &str) -> Result<(), BridgeError> {
        info!(url, "load finished");
        self.navigation.set_current_url(url);
        if let Some(d) = self.delegate() {
            d.did_finish_load(url);
        }
        match self.lifecycle.context() {
            Ok(ctx) => ctx.evaluate(&glue::page_finished(
                &self.config.namespace,
                &self.config.page_finished_handler,
            )),
            Err(_) => {
                debug!(url, "no script context at load finish");
                Ok(())
            }
        }
    }

    // -- script objects -----------------------------------------------------

    /// Register into the live generation and bind immediately.
    pub fn add_script_object(
        &mut self,
        name: &str,
        capability: Box<dyn Capability>,
    ) -> Result<(), BridgeError> {
        self.lifecycle.registry_mut()?.register(name, capability)
    }

    pub fn add_script_method<F>(&mut self, name: &str, function: F) -> Result<(), BridgeError>
    where
        F: Fn(&[Value]) -> Result<Option<Value>, BridgeError> + 'static,
    {
        self.lifecycle
            .registry_mut()?
            .register_function(name, Box::new(function))
    }

    pub fn evaluate_script(&self, js: &str) -> Result<(), BridgeError> {
        self.lifecycle.context()?.evaluate(js)
    }

    /// Push a message to the script handler registered with
    /// `<namespace>.on(kind, fn)`.
    pub fn send(&self, kind: &str, payload: &Value) -> Result<(), BridgeError> {
        let js = glue::dispatch_message(&self.config.namespace, kind, payload);
        self.evaluate_script(&js)
    }

    // -- accessors ----------------------------------------------------------

    /// The last URL requested through `load_url` / `load_request`.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The URL of the document currently shown.
    pub fn current_url(&self) -> Option<&str> {
        self.navigation.current_url()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn load_state(&self) -> LoadState {
        self.navigation.state()
    }

    pub fn generation(&self) -> u64 {
        self.lifecycle.generation()
    }

    pub fn context_state(&self) -> ContextState {
        self.lifecycle.state()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn registry(&self) -> Result<&BridgeRegistry, BridgeError> {
        self.lifecycle.registry()
    }
}

impl Drop for WebController {
    fn drop(&mut self) {
        self.lifecycle.teardown();
    }
}

/// Capabilities every generation starts with.
fn register_builtins(
    registry: &mut BridgeRegistry,
    services: &HostServices,
    config: &ControllerConfig,
    share_delegate: Option<Weak<dyn ShareDelegate>>,
) {
    let builtins: [(&str, Box<dyn Capability>); 2] = [
        (
            NAVIGATION_BAR,
            Box::new(NavigationBarCapability::new(services.chrome.clone())),
        ),
        (
            SHARE,
            Box::new(ShareCapability::new(
                services.share.clone(),
                share_delegate,
                config.share_item_order,
            )),
        ),
    ];
    for (name, capability) in builtins {
        if let Err(e) = registry.register(name, capability) {
            warn!(capability = name, error = %e, "failed to register built-in capability");
        }
    }
}
