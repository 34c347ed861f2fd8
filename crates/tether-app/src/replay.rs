//! Session replay: feed recorded host events through a controller.

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{json, Value};
use tether_common::{BridgeError, TetherError};
use tether_webview::capability::navigation_bar::BarSide;
use tether_webview::capability::share::ShareOutcome;
use tether_webview::{
    ControllerConfig, NavigationIntent, NavigationOutcome, NavigationRequest, TriggerKind,
    WebController,
};
use tracing::{debug, info};

use crate::recording::RecordingHost;

/// One host event in a session file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    LoadUrl {
        url: String,
    },
    LoadStarted {
        url: String,
    },
    ContextCreated,
    LoadFinished {
        url: String,
    },
    /// A message posted by script. Either the raw string or the message
    /// object itself.
    Ipc {
        message: Value,
    },
    Navigate {
        url: String,
        #[serde(default = "default_trigger")]
        trigger: TriggerKind,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
    PresentModal {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        html: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
    FinishShare {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        completed: bool,
        #[serde(default)]
        activity_type: Option<String>,
    },
    TapBarItem {
        side: BarSide,
        #[serde(default)]
        index: usize,
    },
    Send {
        kind: String,
        #[serde(default)]
        payload: Value,
    },
    GoBack,
}

fn default_trigger() -> TriggerKind {
    TriggerKind::UserClick
}

pub fn load_session(path: &Path) -> Result<Vec<SessionEvent>, TetherError> {
    let raw = std::fs::read_to_string(path)?;
    parse_session(&raw)
}

pub fn parse_session(raw: &str) -> Result<Vec<SessionEvent>, TetherError> {
    serde_json::from_str(raw).map_err(|e| TetherError::Other(format!("invalid session: {e}")))
}

/// Replay `events` and return every recorded line, in order.
///
/// Bridge errors are recorded and replay continues, the same way a script
/// error never stops the host.
pub fn run(config: ControllerConfig, events: Vec<SessionEvent>) -> Result<Vec<Value>, TetherError> {
    let host = RecordingHost::new();
    let mut controller = WebController::new(config, host.services())?;
    info!(events = events.len(), "replaying session");

    for (step, event) in events.into_iter().enumerate() {
        debug!(step, ?event, "replay step");
        host.record(json!({ "step": step, "event": event_name(&event) }));
        if let Err(e) = apply(&mut controller, &host, event) {
            host.record(json!({
                "step": step,
                "error": { "code": e.script_code(), "message": e.to_string() },
            }));
        }
    }

    drop(controller);
    Ok(host.take_log())
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::LoadUrl { .. } => "load_url",
        SessionEvent::LoadStarted { .. } => "load_started",
        SessionEvent::ContextCreated => "context_created",
        SessionEvent::LoadFinished { .. } => "load_finished",
        SessionEvent::Ipc { .. } => "ipc",
        SessionEvent::Navigate { .. } => "navigate",
        SessionEvent::PresentModal { .. } => "present_modal",
        SessionEvent::FinishShare { .. } => "finish_share",
        SessionEvent::TapBarItem { .. } => "tap_bar_item",
        SessionEvent::Send { .. } => "send",
        SessionEvent::GoBack => "go_back",
    }
}

fn apply(
    controller: &mut WebController,
    host: &Rc<RecordingHost>,
    event: SessionEvent,
) -> Result<(), BridgeError> {
    match event {
        SessionEvent::LoadUrl { url } => controller.load_url(&url),
        SessionEvent::LoadStarted { url } => {
            controller.load_started(&url);
            Ok(())
        }
        SessionEvent::ContextCreated => {
            let generation = controller.script_context_created()?;
            host.record(json!({ "generation": generation }));
            Ok(())
        }
        SessionEvent::LoadFinished { url } => controller.load_finished(&url),
        SessionEvent::Ipc { message } => {
            let body = match message {
                Value::String(s) => s,
                other => other.to_string(),
            };
            controller.handle_ipc(&body)
        }
        SessionEvent::Navigate {
            url,
            trigger,
            headers,
        } => {
            let request = NavigationRequest { url, headers };
            let outcome = controller.navigation_requested(NavigationIntent::new(request, trigger))?;
            host.record(json!({ "outcome": outcome_value(&outcome) }));
            Ok(())
        }
        SessionEvent::PresentModal { url, html, title } => {
            match (url, html) {
                (Some(url), None) => controller.present_modal_url(&url, title),
                (None, Some(html)) => controller.present_modal_html(&html, title),
                _ => {
                    return Err(BridgeError::invalid(
                        "present_modal needs exactly one of url or html",
                    ))
                }
            };
            Ok(())
        }
        SessionEvent::FinishShare {
            index,
            completed,
            activity_type,
        } => {
            let outcome = ShareOutcome {
                completed,
                activity_type,
            };
            host.finish_share(index, outcome)
        }
        SessionEvent::TapBarItem { side, index } => host.tap(side, index),
        SessionEvent::Send { kind, payload } => controller.send(&kind, &payload),
        SessionEvent::GoBack => {
            controller.go_back();
            Ok(())
        }
    }
}

fn outcome_value(outcome: &NavigationOutcome) -> Value {
    match outcome {
        NavigationOutcome::Pushed(id) => json!({ "pushed": id }),
        NavigationOutcome::Forwarded(request) => json!({ "forwarded": request }),
        NavigationOutcome::HistoryNavigated => json!("history_navigated"),
    }
}
