//! Per-generation mapping from script names to native objects.

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tether_common::BridgeError;
use tracing::{debug, warn};

use crate::capability::{
    check_arguments, find_member, validate_binding_name, validate_surface, Capability, Completion,
    Invocation, MemberKind,
};
use crate::context::ScriptContext;
use crate::glue;
use crate::ipc::split_trailing_callback;

/// A native function bound as a script global.
pub type ScriptFunction = Box<dyn Fn(&[Value]) -> Result<Option<Value>, BridgeError>>;

/// Capabilities and free functions of one context generation.
///
/// Created empty for every new generation and installed exactly once into
/// it. After installation, further registrations bind immediately.
pub struct BridgeRegistry {
    namespace: Rc<str>,
    capabilities: HashMap<String, Box<dyn Capability>>,
    functions: HashMap<String, ScriptFunction>,
    installed: Option<ScriptContext>,
}

impl BridgeRegistry {
    pub(crate) fn new(namespace: Rc<str>) -> Self {
        Self {
            namespace,
            capabilities: HashMap::new(),
            functions: HashMap::new(),
            installed: None,
        }
    }

    /// Bind `capability` under `name`, replacing and detaching any object
    /// already registered there.
    pub fn register(
        &mut self,
        name: &str,
        capability: Box<dyn Capability>,
    ) -> Result<(), BridgeError> {
        validate_binding_name(name)?;
        validate_surface(capability.surface())?;
        if self.functions.contains_key(name) {
            return Err(BridgeError::invalid(format!(
                "{name:?} is already bound as a function"
            )));
        }

        if let Some(ctx) = self.installed.clone() {
            ctx.evaluate(&self.binding_for(name, capability.as_ref()))?;
        }
        if let Some(mut previous) = self.capabilities.insert(name.to_string(), capability) {
            debug!(capability = name, "replacing capability");
            previous.detach();
        }
        Ok(())
    }

    /// Bind a free function as `window.<name>`.
    pub fn register_function(
        &mut self,
        name: &str,
        function: ScriptFunction,
    ) -> Result<(), BridgeError> {
        validate_binding_name(name)?;
        if self.capabilities.contains_key(name) {
            return Err(BridgeError::invalid(format!(
                "{name:?} is already bound as a capability"
            )));
        }
        if let Some(ctx) = self.installed.clone() {
            ctx.evaluate(&glue::function_binding(&self.namespace, name))?;
        }
        self.functions.insert(name.to_string(), function);
        Ok(())
    }

    /// Detach and drop everything. Used before context teardown.
    pub fn unregister_all(&mut self) {
        for (name, capability) in self.capabilities.iter_mut() {
            debug!(capability = %name, "detaching capability");
            capability.detach();
        }
        self.capabilities.clear();
        self.functions.clear();
        self.installed = None;
    }

    /// Install the shim and every binding into `ctx`.
    pub fn install_into(&mut self, ctx: &ScriptContext) -> Result<(), BridgeError> {
        if let Some(current) = &self.installed {
            if current.generation() == ctx.generation() {
                warn!(
                    generation = ctx.generation(),
                    "registry already installed in this generation"
                );
                return Ok(());
            }
        }

        let mut js = glue::bootstrap_script(&self.namespace);
        let mut names: Vec<&String> = self.capabilities.keys().collect();
        names.sort();
        for name in names {
            js.push('\n');
            js.push_str(&self.binding_for(name, self.capabilities[name].as_ref()));
        }
        let mut functions: Vec<&String> = self.functions.keys().collect();
        functions.sort();
        for name in functions {
            js.push('\n');
            js.push_str(&glue::function_binding(&self.namespace, name));
        }

        ctx.evaluate(&js)?;
        self.installed = Some(ctx.clone());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name) || self.functions.contains_key(name)
    }

    /// Registered capability names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.capabilities.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run a method call from script.
    ///
    /// The script callback, if any, is always settled: with the returned
    /// value, with the error, or later by a capability that deferred it.
    /// Unknown names settle as `undefined`.
    pub fn dispatch_invoke(
        &mut self,
        capability: &str,
        member: &str,
        args: Vec<Value>,
    ) -> Result<(), BridgeError> {
        let ctx = self.installed_context()?;
        let (args, callback) = split_trailing_callback(args);
        let completion = Completion::new(ctx.clone(), callback);

        let Some(target) = self.capabilities.get_mut(capability) else {
            completion.resolve(None);
            return Err(BridgeError::CapabilityNotFound(capability.to_string()));
        };
        let params = match find_member(target.surface(), member).map(|m| m.kind) {
            Some(MemberKind::Method(params)) => params,
            _ => {
                completion.resolve(None);
                return Err(BridgeError::CapabilityNotFound(format!(
                    "{capability}.{member}"
                )));
            }
        };
        if let Err(e) = check_arguments(params, &args) {
            warn!(capability, member, error = %e, "rejected call arguments");
            completion.reject(e.clone());
            return Err(e);
        }

        let mut call = Invocation::new(args, ctx, completion);
        let result = target.invoke(member, &mut call);
        if let Some(completion) = call.take_completion() {
            match &result {
                Ok(value) => completion.resolve(value.clone()),
                Err(e) => completion.reject(e.clone()),
            }
        }
        result.map(|_| ())
    }

    /// Apply a property assignment from script.
    ///
    /// On failure the script-side mirror is put back to the native value
    /// and the error goes to `<namespace>.onerror`.
    pub fn dispatch_set(
        &mut self,
        capability: &str,
        member: &str,
        value: Value,
    ) -> Result<(), BridgeError> {
        let ctx = self.installed_context()?;
        let target = self
            .capabilities
            .get_mut(capability)
            .ok_or_else(|| BridgeError::CapabilityNotFound(capability.to_string()))?;

        let result = match find_member(target.surface(), member).map(|m| m.kind) {
            Some(MemberKind::Property { writable: true }) => {
                target.set_property(member, value, &ctx)
            }
            Some(MemberKind::Property { writable: false }) => Err(BridgeError::invalid(format!(
                "{capability}.{member} is read-only"
            ))),
            _ => Err(BridgeError::CapabilityNotFound(format!(
                "{capability}.{member}"
            ))),
        };

        if let Err(e) = &result {
            let native = target.property(member).unwrap_or(Value::Null);
            let mut js = glue::sync_property(&self.namespace, capability, member, &native);
            js.push_str(&glue::report_error(&self.namespace, e));
            ctx.evaluate(&js)?;
        }
        result
    }

    /// Run a free function called from script.
    pub fn dispatch_call(&self, function: &str, args: Vec<Value>) -> Result<(), BridgeError> {
        let ctx = self.installed_context()?;
        let (args, callback) = split_trailing_callback(args);
        let completion = Completion::new(ctx, callback);
        let Some(f) = self.functions.get(function) else {
            completion.resolve(None);
            return Err(BridgeError::CapabilityNotFound(function.to_string()));
        };
        let result = f(&args);
        match &result {
            Ok(value) => completion.resolve(value.clone()),
            Err(e) => completion.reject(e.clone()),
        }
        result.map(|_| ())
    }

    /// Re-read a property from native and update the script mirror.
    pub fn push_property(&self, capability: &str, member: &str) -> Result<(), BridgeError> {
        let ctx = self.installed_context()?;
        let value = self
            .capabilities
            .get(capability)
            .and_then(|c| c.property(member))
            .ok_or_else(|| BridgeError::CapabilityNotFound(format!("{capability}.{member}")))?;
        ctx.evaluate(&glue::sync_property(
            &self.namespace,
            capability,
            member,
            &value,
        ))
    }

    fn installed_context(&self) -> Result<ScriptContext, BridgeError> {
        self.installed
            .clone()
            .filter(ScriptContext::is_live)
            .ok_or(BridgeError::ContextUnavailable)
    }

    fn binding_for(&self, name: &str, capability: &dyn Capability) -> String {
        let surface = capability.surface();
        let properties: Vec<(&str, Value)> = surface
            .iter()
            .filter(|m| matches!(m.kind, MemberKind::Property { .. }))
            .filter_map(|m| capability.property(m.name).map(|v| (m.name, v)))
            .collect();
        glue::capability_binding(&self.namespace, name, surface, &properties)
    }
}
