//! `share`: hand a URL and/or message to the system share sheet.
//!
//! The five [`ShareDelegate`] hooks run in a fixed order for every call:
//! `activity_items`, `excluded_activity_types`, `application_activities`,
//! `present`, and finally `completion_handler` once the sheet is done.
//! A hook that returns `None` selects the default for that step.

use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tether_common::BridgeError;
use tracing::{debug, info};

use super::args::ArgBag;
use super::{Capability, Invocation, Member, Param};
use crate::host::ShareHost;

pub const SHARE: &str = "share";

static SURFACE: &[Member] = &[Member::method("share", &[Param::object("options")])];

/// One item handed to the share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ShareItem {
    Text(String),
    Url(String),
}

/// A custom target offered alongside the system ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationActivity {
    pub activity_type: String,
    pub title: String,
}

/// Result of a share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOutcome {
    pub completed: bool,
    pub activity_type: Option<String>,
}

impl ShareOutcome {
    pub fn completed(activity_type: impl Into<String>) -> Self {
        Self {
            completed: true,
            activity_type: Some(activity_type.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            completed: false,
            activity_type: None,
        }
    }

    /// The value passed to the script callback.
    pub fn to_value(&self) -> Value {
        json!({ "completed": self.completed, "activityType": self.activity_type })
    }
}

/// Options of one `share` call after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareContent {
    pub url: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemOrder {
    #[default]
    MessageFirst,
    UrlFirst,
}

impl ShareContent {
    pub fn default_items(&self, order: ItemOrder) -> Vec<ShareItem> {
        let message = self.message.clone().map(ShareItem::Text);
        let url = self.url.clone().map(ShareItem::Url);
        let ordered = match order {
            ItemOrder::MessageFirst => [message, url],
            ItemOrder::UrlFirst => [url, message],
        };
        ordered.into_iter().flatten().collect()
    }
}

/// Single-use completion token for one presented share sheet.
///
/// Dropping it unfinished reports a cancelled share.
pub struct ShareCompletion {
    inner: Option<Box<dyn FnOnce(ShareOutcome)>>,
}

impl ShareCompletion {
    pub fn new(f: impl FnOnce(ShareOutcome) + 'static) -> Self {
        Self {
            inner: Some(Box::new(f)),
        }
    }

    pub fn finish(mut self, outcome: ShareOutcome) {
        if let Some(f) = self.inner.take() {
            f(outcome);
        }
    }
}

impl Drop for ShareCompletion {
    fn drop(&mut self) {
        if let Some(f) = self.inner.take() {
            f(ShareOutcome::cancelled());
        }
    }
}

impl fmt::Debug for ShareCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareCompletion")
            .field("pending", &self.inner.is_some())
            .finish()
    }
}

/// Everything needed to present one share sheet.
#[derive(Debug)]
pub struct ShareSheet {
    pub items: Vec<ShareItem>,
    pub excluded_types: Vec<String>,
    pub application_activities: Vec<ApplicationActivity>,
    pub on_complete: ShareCompletion,
}

pub type ShareCompletionHandler = Box<dyn FnOnce(&ShareOutcome)>;

/// Optional overrides for the share action.
pub trait ShareDelegate {
    /// Items to share. Default: message, then URL (order configurable).
    fn activity_items(&self, content: &ShareContent) -> Option<Vec<ShareItem>> {
        let _ = content;
        None
    }

    /// Activity types to hide. Default: none.
    fn excluded_activity_types(&self) -> Option<Vec<String>> {
        None
    }

    /// Custom targets. Default: none.
    fn application_activities(&self) -> Option<Vec<ApplicationActivity>> {
        None
    }

    /// Present the sheet yourself by returning `None`; the delegate then
    /// owns `sheet.on_complete`. Default: hand it back for the host.
    fn present(&self, sheet: ShareSheet) -> Option<ShareSheet> {
        Some(sheet)
    }

    /// Native handling of the outcome, asked for when the sheet finishes.
    fn completion_handler(&self) -> Option<ShareCompletionHandler> {
        None
    }
}

pub struct ShareCapability {
    host: Rc<dyn ShareHost>,
    delegate: Option<Weak<dyn ShareDelegate>>,
    order: ItemOrder,
}

impl ShareCapability {
    pub fn new(
        host: Rc<dyn ShareHost>,
        delegate: Option<Weak<dyn ShareDelegate>>,
        order: ItemOrder,
    ) -> Self {
        Self {
            host,
            delegate,
            order,
        }
    }

    fn delegate(&self) -> Option<Rc<dyn ShareDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn share(&self, call: &mut Invocation) -> Result<(), BridgeError> {
        let options = ArgBag::from_value(call.arg(0))?;
        let content = ShareContent {
            url: options.optional_url("url")?,
            message: options.optional_string("message")?,
        };
        if content.url.is_none() && content.message.is_none() {
            return Err(BridgeError::invalid("share needs a url or a message"));
        }

        let delegate = self.delegate();
        let hooks = delegate.as_deref();
        let items = hooks
            .and_then(|d| d.activity_items(&content))
            .unwrap_or_else(|| content.default_items(self.order));
        let excluded_types = hooks
            .and_then(|d| d.excluded_activity_types())
            .unwrap_or_default();
        let application_activities = hooks
            .and_then(|d| d.application_activities())
            .unwrap_or_default();

        let completion = call.defer();
        let handler_source = self.delegate.clone();
        let on_complete = ShareCompletion::new(move |outcome| {
            let handler = handler_source
                .as_ref()
                .and_then(Weak::upgrade)
                .and_then(|d| d.completion_handler());
            match handler {
                Some(handler) => handler(&outcome),
                None => debug!(
                    completed = outcome.completed,
                    activity = ?outcome.activity_type,
                    "share finished"
                ),
            }
            completion.resolve(Some(outcome.to_value()));
        });

        let sheet = ShareSheet {
            items,
            excluded_types,
            application_activities,
            on_complete,
        };
        let sheet = match hooks {
            Some(d) => d.present(sheet),
            None => Some(sheet),
        };
        if let Some(sheet) = sheet {
            info!(items = sheet.items.len(), "presenting share sheet");
            self.host.present_share(
                sheet.items,
                sheet.excluded_types,
                sheet.application_activities,
                sheet.on_complete,
            );
        }
        Ok(())
    }
}

impl Capability for ShareCapability {
    fn surface(&self) -> &'static [Member] {
        SURFACE
    }

    fn invoke(&mut self, member: &str, call: &mut Invocation) -> Result<Option<Value>, BridgeError> {
        match member {
            "share" => self.share(call).map(|()| None),
            other => Err(BridgeError::CapabilityNotFound(other.to_string())),
        }
    }
}
