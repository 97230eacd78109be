//! Timeline display predicates

use parley_model::{RawEvent, UserId};

use crate::model::{VoiceBroadcastInfoState, VOICE_BROADCAST_INFO_EVENT_TYPE};

/// Whether `event` gets a voice broadcast tile in the timeline
///
/// Only the starting info event (or a redacted one) becomes a tile; later
/// lifecycle events are folded into it.
pub fn should_display_as_voice_broadcast_tile(event: &RawEvent) -> bool {
    if event.event_type != VOICE_BROADCAST_INFO_EVENT_TYPE {
        return false;
    }
    if event.redacted {
        return true;
    }
    event
        .content_str("state")
        .and_then(VoiceBroadcastInfoState::parse)
        == Some(VoiceBroadcastInfoState::Started)
}

/// Whether a broadcast tile shows the recording controls
///
/// True for broadcasts sent by the local user that have not stopped.
pub fn should_display_as_voice_broadcast_recording_tile(
    state: Option<VoiceBroadcastInfoState>,
    my_user_id: &UserId,
    event: &RawEvent,
) -> bool {
    &event.sender == my_user_id && state != Some(VoiceBroadcastInfoState::Stopped)
}
