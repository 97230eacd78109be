//! Raw timeline and state events
//!
//! The SDK owns event decoding and decryption; this layer only sees the
//! cleartext type, ids and JSON content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{EventId, RoomId, UserId};

/// An event as delivered by the messaging SDK
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub event_id: EventId,
    pub room_id: RoomId,
    pub sender: UserId,
    /// Present on state events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_key: Option<String>,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub redacted: bool,
}

impl RawEvent {
    /// A new event with empty object content
    pub fn new(
        event_type: impl Into<String>,
        event_id: impl Into<EventId>,
        room_id: impl Into<RoomId>,
        sender: impl Into<UserId>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            event_id: event_id.into(),
            room_id: room_id.into(),
            sender: sender.into(),
            state_key: None,
            content: Value::Object(Default::default()),
            redacted: false,
        }
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    pub fn with_state_key(mut self, state_key: impl Into<String>) -> Self {
        self.state_key = Some(state_key.into());
        self
    }

    /// Mark as redacted; redaction strips the content
    pub fn redact(mut self) -> Self {
        self.redacted = true;
        self.content = Value::Object(Default::default());
        self
    }

    pub fn is_state(&self) -> bool {
        self.state_key.is_some()
    }

    /// Look up a top-level string field of the content
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_helpers() {
        let event = RawEvent::new("m.room.message", "$1", "!r:x", "@a:x")
            .with_content(json!({ "body": "hi", "n": 3 }));

        assert_eq!(event.content_str("body"), Some("hi"));
        assert_eq!(event.content_str("n"), None);
        assert!(!event.is_state());
    }

    #[test]
    fn test_redact_clears_content() {
        let event = RawEvent::new("m.room.message", "$1", "!r:x", "@a:x")
            .with_content(json!({ "body": "hi" }))
            .redact();

        assert!(event.redacted);
        assert_eq!(event.content, json!({}));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let event: RawEvent = serde_json::from_value(json!({
            "type": "uk.half-shot.bridge",
            "event_id": "$b",
            "room_id": "!r:x",
            "sender": "@bot:x",
            "state_key": "irc",
            "content": { "protocol": { "id": "irc" } }
        }))
        .unwrap();

        assert!(event.is_state());
        assert!(!event.redacted);
        assert_eq!(event.event_type, "uk.half-shot.bridge");
    }
}
