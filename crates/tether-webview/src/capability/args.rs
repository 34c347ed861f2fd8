//! Validation and coercion of loosely-typed script argument bags.

use serde_json::{Map, Value};
use tether_common::BridgeError;

/// An options object passed from script. Absent or `null` reads as empty.
#[derive(Debug, Clone, Copy)]
pub struct ArgBag<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ArgBag<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Result<Self, BridgeError> {
        match value {
            None | Some(Value::Null) => Ok(Self { map: None }),
            Some(Value::Object(map)) => Ok(Self { map: Some(map) }),
            Some(other) => Err(BridgeError::invalid(format!(
                "expected an options object, got {}",
                type_name(other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map?.get(key)? {
            Value::Null => None,
            v => Some(v),
        }
    }

    /// A string option. Numbers and booleans are coerced; blank strings
    /// read as absent.
    pub fn optional_string(&self, key: &str) -> Result<Option<String>, BridgeError> {
        let text = match self.get(key) {
            None => return Ok(None),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                return Err(BridgeError::invalid(format!(
                    "{key} must be a string, got {}",
                    type_name(other)
                )))
            }
        };
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    /// An absolute URL option. Blank strings read as absent.
    pub fn optional_url(&self, key: &str) -> Result<Option<String>, BridgeError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) if has_scheme(s.trim()) => Ok(Some(s.trim().to_string())),
            Some(Value::String(s)) => Err(BridgeError::invalid(format!(
                "{key} is not an absolute URL: {s:?}"
            ))),
            Some(other) => Err(BridgeError::invalid(format!(
                "{key} must be a URL string, got {}",
                type_name(other)
            ))),
        }
    }
}

/// `scheme ":" rest` with an RFC 3986 scheme and a non-empty rest.
pub(crate) fn has_scheme(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !url.contains(char::is_whitespace)
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
