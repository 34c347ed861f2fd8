//! Script callbacks bound to one context generation.

use std::fmt;

use serde_json::Value;
use tether_common::BridgeError;
use tracing::debug;

use crate::context::ScriptContext;
use crate::glue;

/// Single-use completion of a script call.
///
/// Settles the script's callback exactly once: explicitly through
/// [`Completion::resolve`] / [`Completion::reject`], or with `undefined`
/// when dropped unsettled. Settling against a context that has since been
/// torn down is dropped without reaching script.
pub struct Completion {
    context: ScriptContext,
    callback: Option<String>,
    settled: bool,
}

impl Completion {
    pub(crate) fn new(context: ScriptContext, callback: Option<String>) -> Self {
        Self {
            context,
            callback,
            settled: false,
        }
    }

    /// A completion with no script callback behind it.
    pub(crate) fn detached(context: ScriptContext) -> Self {
        Self::new(context, None)
    }

    /// Generation of the context the call came from.
    pub fn generation(&self) -> u64 {
        self.context.generation()
    }

    pub fn resolve(mut self, value: Option<Value>) {
        self.settle(Ok(value));
    }

    pub fn reject(mut self, err: BridgeError) {
        self.settle(Err(err));
    }

    fn settle(&mut self, outcome: Result<Option<Value>, BridgeError>) {
        if self.settled {
            return;
        }
        self.settled = true;
        let Some(id) = self.callback.take() else {
            return;
        };
        let js = glue::resolve_callback(self.context.namespace(), &id, &outcome);
        if let Err(e) = self.context.evaluate(&js) {
            debug!(
                generation = self.context.generation(),
                callback = %id,
                error = %e,
                "completion dropped"
            );
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.settle(Ok(None));
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("generation", &self.context.generation())
            .field("callback", &self.callback)
            .field("settled", &self.settled)
            .finish()
    }
}

/// A script function that native code may call any number of times, for
/// as long as its context generation lives.
#[derive(Clone)]
pub struct ScriptCallback {
    context: ScriptContext,
    id: String,
}

impl ScriptCallback {
    pub(crate) fn new(context: ScriptContext, id: impl Into<String>) -> Self {
        Self {
            context,
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.context.generation()
    }

    /// Call the function with positional arguments. Fails with
    /// `ContextUnavailable` once the generation is gone.
    pub fn fire(&self, args: &[Value]) -> Result<(), BridgeError> {
        let js = glue::fire_callback(self.context.namespace(), &self.id, args);
        self.context.evaluate(&js)
    }

    /// Drop the function from the script-side callback table. A release
    /// after the generation is gone has nothing left to free.
    pub(crate) fn release(&self) {
        let js = glue::release_callback(self.context.namespace(), &self.id);
        if let Err(e) = self.context.evaluate(&js) {
            debug!(callback = %self.id, error = %e, "callback release skipped");
        }
    }
}

impl PartialEq for ScriptCallback {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.context.generation() == other.context.generation()
    }
}

impl fmt::Debug for ScriptCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptCallback")
            .field("generation", &self.context.generation())
            .field("id", &self.id)
            .finish()
    }
}
