//! `navigationBar`: script control over the navigation bar items.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tether_common::BridgeError;
use tracing::debug;

use super::args::type_name;
use super::{Capability, Member, ScriptCallback};
use crate::context::ScriptContext;
use crate::host::NavigationChrome;
use crate::ipc::callback_id;

pub const NAVIGATION_BAR: &str = "navigationBar";

static SURFACE: &[Member] = &[
    Member::property("leftItems", true),
    Member::property("rightItems", true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSide {
    Left,
    Right,
}

impl BarSide {
    pub fn property_name(self) -> &'static str {
        match self {
            BarSide::Left => "leftItems",
            BarSide::Right => "rightItems",
        }
    }

    fn from_property(name: &str) -> Option<Self> {
        match name {
            "leftItems" => Some(BarSide::Left),
            "rightItems" => Some(BarSide::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarItemStyle {
    #[default]
    Plain,
    Done,
}

/// One button in the navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    pub title: String,
    pub style: BarItemStyle,
    /// Fired with no arguments when the item is tapped.
    pub action: Option<ScriptCallback>,
}

impl BarItem {
    fn to_value(&self) -> Value {
        json!({ "title": self.title, "style": self.style })
    }
}

pub struct NavigationBarCapability {
    chrome: Rc<dyn NavigationChrome>,
    left: Vec<BarItem>,
    right: Vec<BarItem>,
}

impl NavigationBarCapability {
    pub fn new(chrome: Rc<dyn NavigationChrome>) -> Self {
        Self {
            chrome,
            left: Vec::new(),
            right: Vec::new(),
        }
    }

    pub fn items(&self, side: BarSide) -> &[BarItem] {
        match side {
            BarSide::Left => &self.left,
            BarSide::Right => &self.right,
        }
    }
}

impl Capability for NavigationBarCapability {
    fn surface(&self) -> &'static [Member] {
        SURFACE
    }

    fn property(&self, member: &str) -> Option<Value> {
        let side = BarSide::from_property(member)?;
        Some(Value::Array(
            self.items(side).iter().map(BarItem::to_value).collect(),
        ))
    }

    fn set_property(
        &mut self,
        member: &str,
        value: Value,
        context: &ScriptContext,
    ) -> Result<(), BridgeError> {
        let side = BarSide::from_property(member)
            .ok_or_else(|| BridgeError::CapabilityNotFound(member.to_string()))?;
        let items = parse_items(&value, context)?;
        debug!(side = ?side, count = items.len(), "navigation bar items set");
        self.chrome.set_items(side, &items);
        let previous = std::mem::replace(self.side_mut(side), items);
        release_actions(&previous, self.items(side));
        Ok(())
    }

    fn detach(&mut self) {
        for side in [BarSide::Left, BarSide::Right] {
            let previous = std::mem::take(self.side_mut(side));
            if !previous.is_empty() {
                self.chrome.set_items(side, &[]);
                release_actions(&previous, &[]);
            }
        }
    }
}

impl NavigationBarCapability {
    fn side_mut(&mut self, side: BarSide) -> &mut Vec<BarItem> {
        match side {
            BarSide::Left => &mut self.left,
            BarSide::Right => &mut self.right,
        }
    }
}

/// Release the actions of replaced items that the new items do not reuse.
fn release_actions(replaced: &[BarItem], kept: &[BarItem]) {
    for action in replaced.iter().filter_map(|item| item.action.as_ref()) {
        if !kept.iter().any(|item| item.action.as_ref() == Some(action)) {
            action.release();
        }
    }
}

fn parse_items(value: &Value, context: &ScriptContext) -> Result<Vec<BarItem>, BridgeError> {
    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        other => {
            return Err(BridgeError::invalid(format!(
                "bar items must be an array, got {}",
                type_name(other)
            )))
        }
    };
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_item(i, entry, context))
        .collect()
}

fn parse_item(index: usize, entry: &Value, context: &ScriptContext) -> Result<BarItem, BridgeError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| BridgeError::invalid(format!("bar item {index} must be an object")))?;

    let title = match obj.get("title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => {
            return Err(BridgeError::invalid(format!(
                "bar item {index} needs a non-empty title"
            )))
        }
    };

    let style = match obj.get("style") {
        None | Some(Value::Null) => BarItemStyle::default(),
        Some(v) => serde_json::from_value(v.clone()).map_err(|_| {
            BridgeError::invalid(format!("bar item {index} has unknown style {v}"))
        })?,
    };

    let action = match obj.get("action") {
        None | Some(Value::Null) => None,
        Some(v) => {
            let id = callback_id(v).ok_or_else(|| {
                BridgeError::invalid(format!("bar item {index} action must be a function"))
            })?;
            Some(ScriptCallback::new(context.clone(), id))
        }
    };

    Ok(BarItem {
        title,
        style,
        action,
    })
}
