//! Voice broadcast info events
//!
//! An info event is a state event (keyed by the broadcaster's user id) that
//! announces a broadcast and each of its lifecycle changes. Follow-up info
//! events reference the original one through `m.relates_to`.

use serde::{Deserialize, Serialize};

use parley_model::{DeviceId, EventId, RawEvent, RoomId, UserId};

use super::info_state::{lenient_state, VoiceBroadcastInfoState};
use crate::error::{BroadcastError, Result};

/// Event type of voice broadcast info (state) events
pub const VOICE_BROADCAST_INFO_EVENT_TYPE: &str = "io.element.voice_broadcast_info";

/// Content key marking an audio message as a broadcast chunk
pub const VOICE_BROADCAST_CHUNK_EVENT_TYPE: &str = "io.element.voice_broadcast_chunk";

/// Relation type used by follow-up info events and chunks
pub const REFERENCE_REL_TYPE: &str = "m.reference";

/// `m.relates_to` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatesTo {
    pub rel_type: String,
    pub event_id: EventId,
}

impl RelatesTo {
    pub fn reference(event_id: EventId) -> Self {
        Self {
            rel_type: REFERENCE_REL_TYPE.to_string(),
            event_id,
        }
    }
}

/// Content of an info event
///
/// Parsing is lenient: missing or unknown fields become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoiceBroadcastInfoEventContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,

    #[serde(default, deserialize_with = "lenient_state", skip_serializing_if = "Option::is_none")]
    pub state: Option<VoiceBroadcastInfoState>,

    /// Chunk length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_length: Option<u64>,

    #[serde(rename = "m.relates_to", default, skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<RelatesTo>,
}

impl VoiceBroadcastInfoEventContent {
    pub fn new(device_id: DeviceId, state: VoiceBroadcastInfoState) -> Self {
        Self {
            device_id: Some(device_id),
            state: Some(state),
            chunk_length: None,
            relates_to: None,
        }
    }

    pub fn with_chunk_length(mut self, seconds: u64) -> Self {
        self.chunk_length = Some(seconds);
        self
    }

    pub fn referencing(mut self, event_id: EventId) -> Self {
        self.relates_to = Some(RelatesTo::reference(event_id));
        self
    }

    /// Serialize for sending
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A voice broadcast info event
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastInfoEvent {
    pub event_id: EventId,
    pub room_id: RoomId,
    pub sender: UserId,
    pub content: VoiceBroadcastInfoEventContent,
}

impl BroadcastInfoEvent {
    pub fn new(
        event_id: impl Into<EventId>,
        room_id: impl Into<RoomId>,
        sender: impl Into<UserId>,
        content: VoiceBroadcastInfoEventContent,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            room_id: room_id.into(),
            sender: sender.into(),
            content,
        }
    }

    /// Build from a raw SDK event
    ///
    /// Fails only if the event is not an info event; malformed content is
    /// read as empty content.
    pub fn from_raw(event: &RawEvent) -> Result<Self> {
        if event.event_type != VOICE_BROADCAST_INFO_EVENT_TYPE {
            return Err(BroadcastError::NotAnInfoEvent(event.event_type.clone()));
        }

        let content = match serde_json::from_value(event.content.clone()) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    "Unreadable voice broadcast info content in {}: {}",
                    event.event_id,
                    e
                );
                VoiceBroadcastInfoEventContent::default()
            }
        };

        Ok(Self {
            event_id: event.event_id.clone(),
            room_id: event.room_id.clone(),
            sender: event.sender.clone(),
            content,
        })
    }

    /// Lifecycle state announced by this event, if any
    pub fn state(&self) -> Option<VoiceBroadcastInfoState> {
        self.content.state
    }

    /// Id of the event that started the broadcast
    ///
    /// Follow-up events point at it through their relation; the starting
    /// event has no relation and is its own root.
    pub fn broadcast_id(&self) -> &EventId {
        self.content
            .relates_to
            .as_ref()
            .map(|r| &r.event_id)
            .unwrap_or(&self.event_id)
    }
}
