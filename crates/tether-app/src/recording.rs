//! Host collaborators that record every call instead of rendering.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{json, Value};
use tether_common::BridgeError;
use tether_webview::capability::navigation_bar::{BarItem, BarSide};
use tether_webview::capability::share::{
    ApplicationActivity, ShareCompletion, ShareItem, ShareOutcome,
};
use tether_webview::{
    HostServices, NavigationChrome, NavigationContainer, NavigationRequest, PresentationNode,
    ScriptRuntime, ShareHost, WebContent,
};

/// Scripts longer than this are recorded as a preview.
const SCRIPT_PREVIEW_CHARS: usize = 240;

#[derive(Default)]
pub struct RecordingHost {
    log: RefCell<Vec<Value>>,
    shares: RefCell<Vec<Option<ShareCompletion>>>,
    bar: RefCell<HashMap<BarSide, Vec<BarItem>>>,
    history: Cell<usize>,
}

impl RecordingHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn services(self: &Rc<Self>) -> HostServices {
        HostServices {
            runtime: self.clone(),
            content: self.clone(),
            container: self.clone(),
            chrome: self.clone(),
            share: self.clone(),
        }
    }

    pub fn record(&self, entry: Value) {
        self.log.borrow_mut().push(entry);
    }

    pub fn take_log(&self) -> Vec<Value> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Finish a presented share; `None` picks the latest one still open.
    pub fn finish_share(
        &self,
        index: Option<usize>,
        outcome: ShareOutcome,
    ) -> Result<(), BridgeError> {
        let completion = {
            let mut shares = self.shares.borrow_mut();
            let index = match index {
                Some(i) => i,
                None => shares
                    .iter()
                    .rposition(Option::is_some)
                    .ok_or_else(|| BridgeError::invalid("no open share sheet"))?,
            };
            shares
                .get_mut(index)
                .and_then(Option::take)
                .ok_or_else(|| BridgeError::invalid(format!("share {index} is not open")))?
        };
        completion.finish(outcome);
        Ok(())
    }

    /// Tap a navigation bar item, firing its script action.
    pub fn tap(&self, side: BarSide, index: usize) -> Result<(), BridgeError> {
        let action = self
            .bar
            .borrow()
            .get(&side)
            .and_then(|items| items.get(index))
            .ok_or_else(|| BridgeError::invalid(format!("no bar item {side:?}[{index}]")))?
            .action
            .clone();
        match action {
            Some(action) => action.fire(&[]),
            None => Ok(()),
        }
    }
}

fn preview(js: &str) -> String {
    if js.chars().count() <= SCRIPT_PREVIEW_CHARS {
        js.to_string()
    } else {
        let head: String = js.chars().take(SCRIPT_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

impl ScriptRuntime for RecordingHost {
    fn evaluate_script(&self, js: &str) -> Result<(), BridgeError> {
        self.record(json!({
            "call": "evaluate_script",
            "len": js.len(),
            "js": preview(js.trim()),
        }));
        Ok(())
    }
}

impl WebContent for RecordingHost {
    fn load_request(&self, request: &NavigationRequest) -> Result<(), BridgeError> {
        self.history.set(self.history.get() + 1);
        self.record(json!({ "call": "load_request", "request": request }));
        Ok(())
    }

    fn go_back(&self) -> bool {
        let depth = self.history.get();
        let moved = depth > 1;
        if moved {
            self.history.set(depth - 1);
        }
        self.record(json!({ "call": "go_back", "moved": moved }));
        moved
    }
}

impl NavigationContainer for RecordingHost {
    fn append_pushed(&self, node: PresentationNode) {
        self.record(json!({ "call": "append_pushed", "node": node }));
    }

    fn present_modal(&self, node: PresentationNode) {
        self.record(json!({ "call": "present_modal", "node": node }));
    }
}

impl NavigationChrome for RecordingHost {
    fn set_items(&self, side: BarSide, items: &[BarItem]) {
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        self.record(json!({ "call": "set_items", "side": side, "titles": titles }));
        self.bar.borrow_mut().insert(side, items.to_vec());
    }
}

impl ShareHost for RecordingHost {
    fn present_share(
        &self,
        items: Vec<ShareItem>,
        excluded_types: Vec<String>,
        application_activities: Vec<ApplicationActivity>,
        on_complete: ShareCompletion,
    ) {
        let index = {
            let mut shares = self.shares.borrow_mut();
            shares.push(Some(on_complete));
            shares.len() - 1
        };
        self.record(json!({
            "call": "present_share",
            "index": index,
            "items": items,
            "excluded_types": excluded_types,
            "application_activities": application_activities,
        }));
    }
}
