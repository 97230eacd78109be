//! Broadcast audio chunks
//!
//! Chunks are ordinary audio messages tagged with a sequence number and a
//! reference to the broadcast's info event. Only their ordering metadata is
//! read here; the audio itself is fetched and decoded elsewhere.

use std::time::Duration;

use parley_model::{EventId, RawEvent};

use super::info_event::VOICE_BROADCAST_CHUNK_EVENT_TYPE;

/// Ordering metadata for one broadcast chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceBroadcastChunk {
    pub event_id: EventId,
    /// 1-based position within the broadcast
    pub sequence: u32,
    pub duration: Duration,
    /// Info event this chunk belongs to
    pub broadcast_id: Option<EventId>,
}

impl VoiceBroadcastChunk {
    pub fn new(event_id: impl Into<EventId>, sequence: u32, duration: Duration) -> Self {
        Self {
            event_id: event_id.into(),
            sequence,
            duration,
            broadcast_id: None,
        }
    }

    /// Read chunk metadata from a raw event
    ///
    /// Returns `None` for events that are not broadcast chunks.
    pub fn from_raw(event: &RawEvent) -> Option<Self> {
        let marker = event.content.get(VOICE_BROADCAST_CHUNK_EVENT_TYPE)?;
        let sequence = marker.get("sequence")?.as_u64()?;
        let sequence = u32::try_from(sequence).ok()?;

        let duration_ms = event
            .content
            .get("info")
            .and_then(|info| info.get("duration"))
            .and_then(|d| d.as_u64())
            .unwrap_or(0);

        let broadcast_id = event
            .content
            .get("m.relates_to")
            .and_then(|r| r.get("event_id"))
            .and_then(|id| id.as_str())
            .map(EventId::new);

        Some(Self {
            event_id: event.event_id.clone(),
            sequence,
            duration: Duration::from_millis(duration_ms),
            broadcast_id,
        })
    }
}
