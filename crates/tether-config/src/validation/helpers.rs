//! Shared validation helpers.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a plain JavaScript identifier (no unicode escapes).
static JS_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Whether `name` can be used as a script global or property name.
pub fn is_js_identifier(name: &str) -> bool {
    JS_IDENT_RE.is_match(name)
}

/// Push an error if `value` is not a JavaScript identifier.
pub(crate) fn validate_identifier(errors: &mut Vec<String>, name: &str, value: &str) {
    if !is_js_identifier(value) {
        errors.push(format!("{name} = {value:?} is not a valid script identifier"));
    }
}
