//! JavaScript generated by the bridge.
//!
//! Rust never hands script a live object: capabilities are exposed by
//! evaluating small binding snippets that forward calls through the shim.
//! Every name and value is embedded as a JSON literal.

use serde_json::Value;
use tether_common::BridgeError;

use crate::capability::{Member, MemberKind};

/// Message the initialization script posts once the shim exists in a new
/// document. Page script can post it as well, so the controller honours it
/// only while no context is Ready.
pub const CONTEXT_CREATED_MESSAGE: &str = r#"{"kind":"context_created"}"#;

/// Names on the namespace object owned by the shim.
pub(crate) const RESERVED_NAMES: &[&str] = &["on", "onerror"];

const BOOTSTRAP_TEMPLATE: &str = r#"
(function(ns) {
    var root = window[ns] = window[ns] || {};
    if (root._tether) { return; }
    var seq = 0;
    var callbacks = {};
    var props = {};
    var handlers = {};
    function post(kind, payload) {
        window.ipc.postMessage(JSON.stringify({ kind: kind, payload: payload }));
    }
    function encode(value) {
        if (typeof value === 'function') {
            var id = 'cb' + (++seq);
            callbacks[id] = value;
            return { '$callback': id };
        }
        if (Array.isArray(value)) { return value.map(encode); }
        if (value && typeof value === 'object') {
            var out = {};
            Object.keys(value).forEach(function(k) { out[k] = encode(value[k]); });
            return out;
        }
        return value;
    }
    function slot(cap) { return props[cap] = props[cap] || {}; }
    Object.defineProperty(root, '_tether', { value: {
        invoke: function(cap, member, args) {
            post('invoke', { capability: cap, member: member, args: encode(Array.prototype.slice.call(args)) });
        },
        call: function(name, args) {
            post('call', { 'function': name, args: encode(Array.prototype.slice.call(args)) });
        },
        get: function(cap, member) { return slot(cap)[member]; },
        set: function(cap, member, value) {
            slot(cap)[member] = value;
            post('set', { capability: cap, member: member, value: encode(value) });
        },
        sync: function(cap, member, value) { slot(cap)[member] = value; },
        resolve: function(id, error, value) {
            var cb = callbacks[id];
            if (!cb) { return; }
            delete callbacks[id];
            cb(error, value);
        },
        fire: function(id, args) {
            var cb = callbacks[id];
            if (cb) { cb.apply(null, args); }
        },
        release: function(id) { delete callbacks[id]; },
        dispatch: function(kind, payload) {
            var handler = handlers[kind];
            if (handler) { handler(payload); }
        },
        error: function(error) {
            if (typeof root.onerror === 'function') { root.onerror(error); }
        }
    }});
    root.on = function(kind, callback) { handlers[kind] = callback; };
    function notifyHistory(kind) {
        post('history', { kind: kind, url: String(window.location.href) });
    }
    ['pushState', 'replaceState'].forEach(function(name) {
        var original = history[name];
        if (typeof original !== 'function') { return; }
        history[name] = function() {
            var result = original.apply(history, arguments);
            notifyHistory(name === 'pushState' ? 'push' : 'replace');
            return result;
        };
    });
    window.addEventListener('popstate', function() { notifyHistory('pop'); });
})(__NAMESPACE__);
"#;

/// Encode a string as a JavaScript string literal.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Encode a JSON value as a JavaScript literal.
fn js_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Whether `name` is a plain script identifier usable as a property name.
pub fn is_script_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Run `body` with `t` bound to the shim, doing nothing if the shim is gone.
fn with_shim(namespace: &str, body: &str) -> String {
    let ns = js_string(namespace);
    format!("(function(t){{if(!t){{return;}}{body}}})(window[{ns}]&&window[{ns}]._tether);")
}

/// The shim that every script context starts with. Safe to run twice.
pub fn bootstrap_script(namespace: &str) -> String {
    BOOTSTRAP_TEMPLATE.replace("__NAMESPACE__", &js_string(namespace))
}

/// Script for the initialization hook of engines that run it before page
/// scripts: installs the shim, then signals that the context exists.
pub fn initialization_script(namespace: &str) -> String {
    format!(
        "{}\nwindow.ipc.postMessage({});",
        bootstrap_script(namespace),
        js_string(CONTEXT_CREATED_MESSAGE)
    )
}

/// Bind one capability onto the namespace object.
///
/// Only the declared members exist on the resulting frozen object, so any
/// other member reads as `undefined` in script. `properties` seeds the
/// property mirror with the native values.
pub fn capability_binding(
    namespace: &str,
    name: &str,
    surface: &[Member],
    properties: &[(&str, Value)],
) -> String {
    let cap = js_string(name);
    let mut body = String::from("var o={};");
    for (member, value) in properties {
        body.push_str(&format!(
            "t.sync({cap},{},{});",
            js_string(member),
            js_value(value)
        ));
    }
    for member in surface {
        let m = js_string(member.name);
        match member.kind {
            MemberKind::Method(_) => body.push_str(&format!(
                "o[{m}]=function(){{t.invoke({cap},{m},arguments);}};"
            )),
            MemberKind::Property { writable: true } => body.push_str(&format!(
                "Object.defineProperty(o,{m},{{enumerable:true,get:function(){{return t.get({cap},{m});}},set:function(v){{t.set({cap},{m},v);}}}});"
            )),
            MemberKind::Property { writable: false } => body.push_str(&format!(
                "Object.defineProperty(o,{m},{{enumerable:true,get:function(){{return t.get({cap},{m});}}}});"
            )),
        }
    }
    body.push_str(&format!(
        "window[{}][{cap}]=Object.freeze(o);",
        js_string(namespace)
    ));
    with_shim(namespace, &body)
}

/// Bind a free function as a script global.
pub fn function_binding(namespace: &str, name: &str) -> String {
    let f = js_string(name);
    with_shim(
        namespace,
        &format!("window[{f}]=function(){{t.call({f},arguments);}};"),
    )
}

/// Script-visible error value: `{code, message}`.
pub fn error_value(err: &BridgeError) -> Value {
    serde_json::json!({
        "code": err.script_code(),
        "message": err.to_string(),
    })
}

/// Settle a one-shot callback. The callback receives `(error, value)`.
pub fn resolve_callback(
    namespace: &str,
    callback_id: &str,
    outcome: &Result<Option<Value>, BridgeError>,
) -> String {
    let (error, value) = match outcome {
        Ok(Some(v)) => ("null".to_string(), js_value(v)),
        Ok(None) => ("null".to_string(), "undefined".to_string()),
        Err(e) => (js_value(&error_value(e)), "undefined".to_string()),
    };
    with_shim(
        namespace,
        &format!("t.resolve({},{error},{value});", js_string(callback_id)),
    )
}

/// Fire a persistent callback with positional arguments.
pub fn fire_callback(namespace: &str, callback_id: &str, args: &[Value]) -> String {
    let args = Value::Array(args.to_vec());
    with_shim(
        namespace,
        &format!("t.fire({},{});", js_string(callback_id), js_value(&args)),
    )
}

/// Forget a persistent callback so its function can be collected.
pub fn release_callback(namespace: &str, callback_id: &str) -> String {
    with_shim(
        namespace,
        &format!("t.release({});", js_string(callback_id)),
    )
}

/// Overwrite one property in the script-side mirror.
pub fn sync_property(namespace: &str, capability: &str, member: &str, value: &Value) -> String {
    with_shim(
        namespace,
        &format!(
            "t.sync({},{},{});",
            js_string(capability),
            js_string(member),
            js_value(value)
        ),
    )
}

/// Report an error that has no callback to the namespace's `onerror`.
pub fn report_error(namespace: &str, err: &BridgeError) -> String {
    with_shim(
        namespace,
        &format!("t.error({});", js_value(&error_value(err))),
    )
}

/// Deliver a host push to the handler script registered with `on(kind, fn)`.
pub fn dispatch_message(namespace: &str, kind: &str, payload: &Value) -> String {
    with_shim(
        namespace,
        &format!("t.dispatch({},{});", js_string(kind), js_value(payload)),
    )
}

/// Call `<namespace>.<handler>()` if script defined it.
pub fn page_finished(namespace: &str, handler: &str) -> String {
    let ns = js_string(namespace);
    let h = js_string(handler);
    format!(
        "(function(root){{if(root&&typeof root[{h}]==='function'){{root[{h}]();}}}})(window[{ns}]);"
    )
}
