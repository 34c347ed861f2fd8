//! Interfaces the bridge needs from its embedding host.
//!
//! All methods take `&self`; implementations use interior mutability and
//! are only ever called on the thread that owns the web content.

use tether_common::BridgeError;

use crate::capability::navigation_bar::{BarItem, BarSide};
use crate::capability::share::{ApplicationActivity, ShareCompletion, ShareItem};
use crate::navigation::{NavigationRequest, PresentationNode};

/// The embedded script runtime.
pub trait ScriptRuntime {
    /// Run `js` in the current global environment.
    ///
    /// When called from inside the host's "context created" notification,
    /// the script must run before any script belonging to the document.
    fn evaluate_script(&self, js: &str) -> Result<(), BridgeError>;
}

/// The web content view: in-place loading and its own history.
pub trait WebContent {
    /// Load a request in place. This is also the default path for
    /// navigations the bridge does not handle itself.
    fn load_request(&self, request: &NavigationRequest) -> Result<(), BridgeError>;

    /// Step back in the content's history. Returns `false` if there is
    /// nothing to go back to.
    fn go_back(&self) -> bool;
}

/// The navigation container that owns the presentation stack.
pub trait NavigationContainer {
    fn append_pushed(&self, node: PresentationNode);
    fn present_modal(&self, node: PresentationNode);
}

/// Navigation bar chrome rendering.
pub trait NavigationChrome {
    /// Replace the items on one side of the bar. An empty slice clears it.
    fn set_items(&self, side: BarSide, items: &[BarItem]);
}

/// The system share sheet.
pub trait ShareHost {
    /// Present a share sheet. `on_complete` must be finished at most once;
    /// dropping it unfinished reports a cancelled share.
    fn present_share(
        &self,
        items: Vec<ShareItem>,
        excluded_types: Vec<String>,
        application_activities: Vec<ApplicationActivity>,
        on_complete: ShareCompletion,
    );
}
