//! Share section.

use serde::{Deserialize, Serialize};

/// Order of the default share items when both a URL and a message are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShareItemOrder {
    #[default]
    MessageFirst,
    UrlFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShareConfig {
    pub default_item_order: ShareItemOrder,
}
