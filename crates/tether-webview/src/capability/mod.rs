//! Capability objects: native objects with a declared script surface.
//!
//! A capability lists its members up front in [`Capability::surface`]. The
//! registry binds exactly those members into script and refuses calls to
//! anything else, whatever the native type happens to implement.

pub mod args;
mod callback;
pub mod navigation_bar;
pub mod share;

pub use args::ArgBag;
pub use callback::{Completion, ScriptCallback};

use serde_json::Value;
use tether_common::BridgeError;

use crate::context::ScriptContext;
use crate::glue::{is_script_identifier, RESERVED_NAMES};

/// Shape a positional argument must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Any,
    Object,
    Array,
    String,
}

impl ParamKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamKind::Any => true,
            ParamKind::Object => value.is_object(),
            ParamKind::Array => value.is_array(),
            ParamKind::String => value.is_string(),
        }
    }
}

/// One declared parameter of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub optional: bool,
}

impl Param {
    pub const fn new(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
        }
    }

    pub const fn object(name: &'static str) -> Self {
        Self::new(name, ParamKind::Object)
    }

    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A method. A trailing script function is taken as its completion
    /// callback and is not counted against the parameters.
    Method(&'static [Param]),
    /// A property, read synchronously from the script-side mirror.
    Property { writable: bool },
}

/// A member visible to script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub kind: MemberKind,
}

impl Member {
    pub const fn method(name: &'static str, params: &'static [Param]) -> Self {
        Self {
            name,
            kind: MemberKind::Method(params),
        }
    }

    pub const fn property(name: &'static str, writable: bool) -> Self {
        Self {
            name,
            kind: MemberKind::Property { writable },
        }
    }
}

/// Arguments and completion of one method call from script.
pub struct Invocation {
    pub args: Vec<Value>,
    context: ScriptContext,
    completion: Option<Completion>,
}

impl Invocation {
    pub(crate) fn new(args: Vec<Value>, context: ScriptContext, completion: Completion) -> Self {
        Self {
            args,
            context,
            completion: Some(completion),
        }
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn context(&self) -> &ScriptContext {
        &self.context
    }

    /// Take the completion to finish the call later. The return value of
    /// [`Capability::invoke`] is then ignored.
    pub fn defer(&mut self) -> Completion {
        self.completion
            .take()
            .unwrap_or_else(|| Completion::detached(self.context.clone()))
    }

    pub(crate) fn take_completion(&mut self) -> Option<Completion> {
        self.completion.take()
    }
}

/// A native object exposed to script under a name in the namespace.
pub trait Capability {
    /// The complete script surface. Nothing else is reachable from script.
    fn surface(&self) -> &'static [Member];

    /// Handle a call to one of the declared methods. Arguments have already
    /// been checked against the declared parameters.
    fn invoke(&mut self, member: &str, call: &mut Invocation) -> Result<Option<Value>, BridgeError> {
        let _ = call;
        Err(BridgeError::CapabilityNotFound(member.to_string()))
    }

    /// Current native value of a declared property.
    fn property(&self, member: &str) -> Option<Value> {
        let _ = member;
        None
    }

    /// Assign a declared, writable property.
    fn set_property(
        &mut self,
        member: &str,
        value: Value,
        context: &ScriptContext,
    ) -> Result<(), BridgeError> {
        let _ = (value, context);
        Err(BridgeError::invalid(format!("{member} is read-only")))
    }

    /// Undo native side effects before the object is replaced or its
    /// context is torn down.
    fn detach(&mut self) {}
}

/// Check a surface at registration time.
pub fn validate_surface(surface: &[Member]) -> Result<(), BridgeError> {
    if surface.is_empty() {
        return Err(BridgeError::invalid("capability declares no members"));
    }
    for (i, member) in surface.iter().enumerate() {
        if !is_script_identifier(member.name) || member.name.starts_with('_') {
            return Err(BridgeError::invalid(format!(
                "member name {:?} is not a valid script identifier",
                member.name
            )));
        }
        if surface[..i].iter().any(|m| m.name == member.name) {
            return Err(BridgeError::invalid(format!(
                "member {:?} is declared twice",
                member.name
            )));
        }
    }
    Ok(())
}

/// Check a name for a capability or free function.
pub(crate) fn validate_binding_name(name: &str) -> Result<(), BridgeError> {
    if !is_script_identifier(name) || name.starts_with('_') || RESERVED_NAMES.contains(&name) {
        return Err(BridgeError::invalid(format!(
            "{name:?} cannot be used as a script binding name"
        )));
    }
    Ok(())
}

pub(crate) fn find_member<'a>(surface: &'a [Member], name: &str) -> Option<&'a Member> {
    surface.iter().find(|m| m.name == name)
}

/// Check positional arguments against declared parameters.
pub(crate) fn check_arguments(params: &[Param], args: &[Value]) -> Result<(), BridgeError> {
    if args.len() > params.len() {
        return Err(BridgeError::invalid(format!(
            "expected at most {} argument(s), got {}",
            params.len(),
            args.len()
        )));
    }
    for (i, param) in params.iter().enumerate() {
        match args.get(i) {
            None | Some(Value::Null) if param.optional => {}
            None | Some(Value::Null) => {
                return Err(BridgeError::invalid(format!(
                    "missing argument {:?}",
                    param.name
                )));
            }
            Some(value) if !param.kind.accepts(value) => {
                return Err(BridgeError::invalid(format!(
                    "argument {:?} must be {:?}",
                    param.name, param.kind
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn surface_must_not_be_empty() {
        assert!(validate_surface(&[]).is_err());
    }

    #[test]
    fn surface_rejects_duplicates_and_bad_names() {
        let dup = [Member::property("a", true), Member::method("a", &[])];
        assert!(validate_surface(&dup).is_err());

        let bad = [Member::method("do-it", &[])];
        assert!(validate_surface(&bad).is_err());

        let private = [Member::method("_secret", &[])];
        assert!(validate_surface(&private).is_err());

        let ok = [Member::method("share", &[]), Member::property("items", false)];
        assert!(validate_surface(&ok).is_ok());
    }

    #[test]
    fn binding_names_exclude_shim_members() {
        assert!(validate_binding_name("share").is_ok());
        assert!(validate_binding_name("on").is_err());
        assert!(validate_binding_name("onerror").is_err());
        assert!(validate_binding_name("_tether").is_err());
        assert!(validate_binding_name("").is_err());
    }

    #[test]
    fn arguments_checked_against_params() {
        static PARAMS: &[Param] = &[
            Param::object("options"),
            Param::new("label", ParamKind::String).optional(),
        ];
        assert!(check_arguments(PARAMS, &[json!({})]).is_ok());
        assert!(check_arguments(PARAMS, &[json!({}), json!("x")]).is_ok());
        assert!(check_arguments(PARAMS, &[json!({}), Value::Null]).is_ok());

        assert!(matches!(
            check_arguments(PARAMS, &[]),
            Err(BridgeError::InvalidArgument(_))
        ));
        assert!(check_arguments(PARAMS, &[json!("no")]).is_err());
        assert!(check_arguments(PARAMS, &[json!({}), json!(1)]).is_err());
        assert!(check_arguments(PARAMS, &[json!({}), json!("x"), json!(3)]).is_err());
    }
}
