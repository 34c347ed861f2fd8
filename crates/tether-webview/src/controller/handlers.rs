//! Routing of host events and script messages.

use tether_common::BridgeError;
use tracing::{debug, info, warn};

use super::WebController;
use crate::context::ContextState;
use crate::events::{PageLoadState, WebViewEvent};
use crate::glue::CONTEXT_CREATED_MESSAGE;
use crate::ipc::{BridgeMessage, HistoryKind};
use crate::navigation::{NavigationIntent, NavigationRequest, TriggerKind};

impl WebController {
    /// Dispatch one queued host event.
    pub fn handle_event(&mut self, event: WebViewEvent) -> Result<(), BridgeError> {
        match event {
            WebViewEvent::PageLoad {
                state: PageLoadState::Started,
                url,
            } => {
                self.load_started(&url);
                Ok(())
            }
            WebViewEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => self.load_finished(&url),
            WebViewEvent::ScriptContextCreated => self.script_context_created().map(|_| ()),
            WebViewEvent::TitleChanged { title } => {
                debug!(title = %title, "title changed");
                self.title = Some(title);
                Ok(())
            }
            WebViewEvent::IpcMessage { body } => self.handle_ipc(&body),
            WebViewEvent::NavigationRequested { intent } => {
                self.navigation_requested(intent).map(|_| ())
            }
            WebViewEvent::Closed => {
                info!("web content closed");
                self.lifecycle.teardown();
                Ok(())
            }
        }
    }

    /// Route a message posted by the script shim.
    pub fn handle_ipc(&mut self, body: &str) -> Result<(), BridgeError> {
        if body.trim() == CONTEXT_CREATED_MESSAGE {
            // Page script can post this too; only a document being loaded
            // may start a generation this way.
            return match self.context_state() {
                ContextState::Absent | ContextState::Creating => {
                    self.script_context_created().map(|_| ())
                }
                state => {
                    warn!(?state, "ignored context-created message outside a load");
                    Ok(())
                }
            };
        }

        let message = BridgeMessage::from_json(body).inspect_err(|e| {
            warn!(body_len = body.len(), error = %e, "rejected script message");
        })?;
        match message {
            BridgeMessage::Invoke {
                capability,
                member,
                args,
            } => {
                debug!(capability = %capability, member = %member, "invoke");
                self.lifecycle
                    .registry_mut()?
                    .dispatch_invoke(&capability, &member, args)
            }
            BridgeMessage::Set {
                capability,
                member,
                value,
            } => {
                debug!(capability = %capability, member = %member, "set");
                self.lifecycle
                    .registry_mut()?
                    .dispatch_set(&capability, &member, value)
            }
            BridgeMessage::Call { function, args } => {
                debug!(function = %function, "call");
                self.lifecycle.registry()?.dispatch_call(&function, args)
            }
            BridgeMessage::History { kind, url } => {
                let trigger = match kind {
                    HistoryKind::Push | HistoryKind::Replace => TriggerKind::HistoryPush,
                    HistoryKind::Pop => TriggerKind::HistoryPop,
                };
                let intent = NavigationIntent::new(NavigationRequest::new(url), trigger);
                self.navigation_requested(intent).map(|_| ())
            }
        }
    }
}
