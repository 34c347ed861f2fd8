//! Messages posted from script to the host.
//!
//! The shim installed by [`crate::glue::bootstrap_script`] posts JSON of the
//! form `{"kind": ..., "payload": {...}}` through `window.ipc.postMessage`.
//! Functions passed as arguments are replaced by `{"$callback": "<id>"}`
//! references before posting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tether_common::BridgeError;

/// Key marking a callback reference inside script arguments.
pub const CALLBACK_KEY: &str = "$callback";

/// How script moved within its own history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Push,
    Replace,
    Pop,
}

/// A typed message from script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum BridgeMessage {
    /// Call a method on a capability.
    Invoke {
        capability: String,
        member: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    /// Assign a capability property.
    Set {
        capability: String,
        member: String,
        #[serde(default)]
        value: Value,
    },
    /// Call a registered free function.
    Call {
        function: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    /// Client-side route change (`history.pushState` and friends).
    History { kind: HistoryKind, url: String },
}

impl BridgeMessage {
    /// Parse a message from a raw JSON string (from script `postMessage`).
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw)
            .map_err(|e| BridgeError::invalid(format!("malformed bridge message: {e}")))
    }
}

/// The callback id if `value` is a `{"$callback": id}` reference.
pub fn callback_id(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    obj.get(CALLBACK_KEY)?.as_str()
}

/// Split a trailing callback reference off an argument list.
pub(crate) fn split_trailing_callback(mut args: Vec<Value>) -> (Vec<Value>, Option<String>) {
    let id = args.last().and_then(callback_id).map(str::to_string);
    if id.is_some() {
        args.pop();
    }
    (args, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_invoke() {
        let raw = r#"{"kind":"invoke","payload":{"capability":"share","member":"share","args":[{"url":"http://example.com/"},{"$callback":"cb1"}]}}"#;
        let msg = BridgeMessage::from_json(raw).unwrap();
        match msg {
            BridgeMessage::Invoke {
                capability,
                member,
                args,
            } => {
                assert_eq!(capability, "share");
                assert_eq!(member, "share");
                assert_eq!(args.len(), 2);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn parses_set_and_call() {
        let set = BridgeMessage::from_json(
            r#"{"kind":"set","payload":{"capability":"navigationBar","member":"leftItems","value":[]}}"#,
        )
        .unwrap();
        assert!(matches!(set, BridgeMessage::Set { ref member, .. } if member == "leftItems"));

        let call =
            BridgeMessage::from_json(r#"{"kind":"call","payload":{"function":"log"}}"#).unwrap();
        assert!(matches!(call, BridgeMessage::Call { ref args, .. } if args.is_empty()));
    }

    #[test]
    fn parses_history() {
        let msg = BridgeMessage::from_json(
            r#"{"kind":"history","payload":{"kind":"push","url":"https://shop.test/cart"}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            BridgeMessage::History {
                kind: HistoryKind::Push,
                url: "https://shop.test/cart".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_kind_and_garbage() {
        assert!(matches!(
            BridgeMessage::from_json(r#"{"kind":"eval","payload":"alert(1)"}"#),
            Err(BridgeError::InvalidArgument(_))
        ));
        assert!(BridgeMessage::from_json("not json").is_err());
        assert!(BridgeMessage::from_json("").is_err());
    }

    #[test]
    fn callback_reference_detection() {
        assert_eq!(callback_id(&json!({"$callback": "cb3"})), Some("cb3"));
        assert_eq!(callback_id(&json!({"$callback": 3})), None);
        assert_eq!(callback_id(&json!({"$callback": "cb3", "x": 1})), None);
        assert_eq!(callback_id(&json!("cb3")), None);
    }

    #[test]
    fn trailing_callback_is_split_off() {
        let (args, id) = split_trailing_callback(vec![json!({"a": 1}), json!({"$callback": "cb9"})]);
        assert_eq!(args, vec![json!({"a": 1})]);
        assert_eq!(id.as_deref(), Some("cb9"));

        let (args, id) = split_trailing_callback(vec![json!({"$callback": "cb1"}), json!(2)]);
        assert_eq!(args.len(), 2);
        assert!(id.is_none());
    }
}
