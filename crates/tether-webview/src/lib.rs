//! Script bridge between embedded web content and native capabilities.
//!
//! - Capability objects with an explicit, allow-listed script surface
//! - A per-context registry that installs them into the script global
//! - Script context lifecycle (one generation per loaded document)
//! - Navigation/load state machine deciding push vs. in-place loads
//! - Delegate hooks for the embedding host
//! - [`WebController`], the single facade a host drives
//!
//! Everything runs on the thread that owns the web content; shared state
//! uses `Rc`/`RefCell` and delegates are held through `Weak` handles.

pub mod capability;
pub mod context;
pub mod controller;
pub mod delegate;
pub mod events;
pub mod glue;
pub mod host;
pub mod ipc;
pub mod navigation;
pub mod registry;

#[cfg(feature = "wry")]
pub mod wry_host;

#[cfg(test)]
pub(crate) mod testing;

pub use capability::{
    Capability, Completion, Invocation, Member, MemberKind, Param, ParamKind, ScriptCallback,
};
pub use context::{ContextState, Lifecycle, ScriptContext};
pub use controller::{ControllerConfig, HostServices, WebController};
pub use delegate::ControllerDelegate;
pub use events::{PageLoadState, WebViewEvent};
pub use host::{NavigationChrome, NavigationContainer, ScriptRuntime, ShareHost, WebContent};
pub use ipc::{BridgeMessage, HistoryKind};
pub use navigation::{
    ContentRef, LoadState, NavigationIntent, NavigationOutcome, NavigationRequest,
    NavigationStateMachine, PresentationMode, PresentationNode, TriggerKind,
};
pub use registry::BridgeRegistry;
pub use tether_common::BridgeError;
