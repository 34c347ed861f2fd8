//! Script execution context lifecycle.
//!
//! One [`ScriptContext`] generation exists per loaded document. The
//! [`Lifecycle`] owns the only strong reference to the live state; every
//! handle given out (capability callbacks, completions) holds a weak one
//! plus the generation it was created for, so work scheduled against a
//! torn-down generation is dropped instead of reaching the next document.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tether_common::BridgeError;
use tracing::{debug, info, warn};

use crate::host::ScriptRuntime;
use crate::registry::BridgeRegistry;

/// `Absent → Creating → Ready → Destroyed → Creating → ...`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextState {
    #[default]
    Absent,
    Creating,
    Ready,
    Destroyed,
}

struct ContextCell {
    state: ContextState,
    generation: u64,
    runtime: Rc<dyn ScriptRuntime>,
}

/// Non-owning handle to one context generation.
#[derive(Clone)]
pub struct ScriptContext {
    cell: Weak<RefCell<ContextCell>>,
    generation: u64,
    namespace: Rc<str>,
}

impl ScriptContext {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether this generation is still the Ready one.
    pub fn is_live(&self) -> bool {
        self.live_runtime().is_some()
    }

    fn live_runtime(&self) -> Option<Rc<dyn ScriptRuntime>> {
        let cell = self.cell.upgrade()?;
        let cell = cell.borrow();
        if cell.state == ContextState::Ready && cell.generation == self.generation {
            let runtime = cell.runtime.clone();
            Some(runtime)
        } else {
            None
        }
    }

    /// Evaluate script in this generation.
    pub fn evaluate(&self, js: &str) -> Result<(), BridgeError> {
        let runtime = self.live_runtime().ok_or(BridgeError::ContextUnavailable)?;
        runtime.evaluate_script(js)
    }
}

impl fmt::Debug for ScriptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptContext")
            .field("generation", &self.generation)
            .field("namespace", &self.namespace)
            .field("live", &self.is_live())
            .finish()
    }
}

/// Owns context state and the registry of the current generation.
pub struct Lifecycle {
    cell: Rc<RefCell<ContextCell>>,
    namespace: Rc<str>,
    registry: Option<BridgeRegistry>,
}

impl Lifecycle {
    pub fn new(runtime: Rc<dyn ScriptRuntime>, namespace: &str) -> Self {
        Self {
            cell: Rc::new(RefCell::new(ContextCell {
                state: ContextState::Absent,
                generation: 0,
                runtime,
            })),
            namespace: Rc::from(namespace),
            registry: None,
        }
    }

    pub fn state(&self) -> ContextState {
        self.cell.borrow().state
    }

    /// Generation of the most recent context; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.cell.borrow().generation
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Content started loading: the current document is on its way out.
    pub fn load_started(&mut self) {
        if matches!(self.state(), ContextState::Ready | ContextState::Creating) {
            self.destroy();
        }
        self.set_state(ContextState::Creating);
        debug!(generation = self.generation(), "script context creating");
    }

    /// The runtime built a fresh global environment.
    ///
    /// Starts a new generation, lets `populate` fill its registry, then
    /// installs every binding before returning. The caller must be inside
    /// the host's context-created notification so that this runs before
    /// any document script.
    pub fn context_created<F>(&mut self, populate: F) -> Result<ScriptContext, BridgeError>
    where
        F: FnOnce(&mut BridgeRegistry),
    {
        if self.state() == ContextState::Ready {
            // Host skipped load_started, e.g. a reload it did not report.
            self.destroy();
        }
        let generation = {
            let mut cell = self.cell.borrow_mut();
            cell.generation += 1;
            cell.state = ContextState::Ready;
            cell.generation
        };
        let context = self.handle(generation);

        let mut registry = BridgeRegistry::new(self.namespace.clone());
        populate(&mut registry);
        if let Err(e) = registry.install_into(&context) {
            warn!(generation, error = %e, "failed to install bridge");
            registry.unregister_all();
            self.set_state(ContextState::Destroyed);
            return Err(e);
        }

        info!(
            generation,
            capabilities = registry.len(),
            "script context ready"
        );
        self.registry = Some(registry);
        Ok(context)
    }

    /// The host is going away.
    pub fn teardown(&mut self) {
        if self.state() != ContextState::Absent {
            self.destroy();
        }
    }

    /// Handle on the Ready generation.
    pub fn context(&self) -> Result<ScriptContext, BridgeError> {
        self.ready_generation().map(|g| self.handle(g))
    }

    pub fn registry(&self) -> Result<&BridgeRegistry, BridgeError> {
        self.ready_generation()?;
        self.registry.as_ref().ok_or(BridgeError::ContextUnavailable)
    }

    pub fn registry_mut(&mut self) -> Result<&mut BridgeRegistry, BridgeError> {
        self.ready_generation()?;
        self.registry.as_mut().ok_or(BridgeError::ContextUnavailable)
    }

    fn ready_generation(&self) -> Result<u64, BridgeError> {
        let cell = self.cell.borrow();
        match cell.state {
            ContextState::Ready => Ok(cell.generation),
            _ => Err(BridgeError::ContextUnavailable),
        }
    }

    fn handle(&self, generation: u64) -> ScriptContext {
        ScriptContext {
            cell: Rc::downgrade(&self.cell),
            generation,
            namespace: self.namespace.clone(),
        }
    }

    fn set_state(&self, state: ContextState) {
        self.cell.borrow_mut().state = state;
    }

    fn destroy(&mut self) {
        // Invalidate handles first so detach hooks cannot reach script.
        self.set_state(ContextState::Destroyed);
        if let Some(mut registry) = self.registry.take() {
            registry.unregister_all();
        }
        debug!(generation = self.generation(), "script context destroyed");
    }
}
