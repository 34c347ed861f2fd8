//! Optional host hooks into the controller.

use crate::navigation::{NavigationRequest, PresentationNode};
use crate::registry::BridgeRegistry;

/// Customization points of a [`crate::WebController`].
///
/// Every method has a default; a host overrides only what it needs. The
/// controller holds its delegate weakly, so a delegate that owns the
/// controller creates no cycle.
pub trait ControllerDelegate {
    /// Whether a full-load navigation is pushed as a new page. `None`
    /// keeps the default of `true`; `Some(false)` forwards the request to
    /// the host's default loading path unchanged.
    fn should_open_request(&self, request: &NavigationRequest) -> Option<bool> {
        let _ = request;
        None
    }

    /// Substitute URL or headers before a request is dispatched. `None`
    /// keeps the request as is.
    fn rewrite_request(&self, request: &NavigationRequest) -> Option<NavigationRequest> {
        let _ = request;
        None
    }

    fn did_start_load(&self, url: &str) {
        let _ = url;
    }

    fn did_finish_load(&self, url: &str) {
        let _ = url;
    }

    /// Called after the new generation is installed.
    fn did_create_script_context(&self, generation: u64) {
        let _ = generation;
    }

    /// Register objects every generation should have. Runs before the
    /// generation is installed, after the built-in capabilities.
    fn configure_script_objects(&self, registry: &mut BridgeRegistry) {
        let _ = registry;
    }

    /// Present a modal node yourself by returning `None`. The default
    /// hands it back to the navigation container.
    fn present_modal(&self, node: PresentationNode) -> Option<PresentationNode> {
        Some(node)
    }
}
