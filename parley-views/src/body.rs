//! Timeline tile for a voice broadcast info event
//!
//! Picks the recording body for the local user's own unfinished broadcast
//! and the playback body for everything else. Instances come from the
//! broadcast stores so every tile of the same broadcast shares one model.

use std::sync::Arc;

use parley_broadcast::{
    should_display_as_voice_broadcast_recording_tile, BroadcastInfoEvent, BroadcastStores, Result,
};
use parley_model::{RawEvent, RoomDirectory, RoomMember, StateEventSender, UserId};

use crate::i18n::Translator;
use crate::molecules::{VoiceBroadcastPlaybackBody, VoiceBroadcastRecordingBody};
use crate::node::Node;

/// The body chosen for one info event
#[derive(Debug, Clone)]
pub enum VoiceBroadcastBody {
    Recording(VoiceBroadcastRecordingBody),
    Playback(VoiceBroadcastPlaybackBody),
}

impl VoiceBroadcastBody {
    /// Choose and build the body for `event`
    ///
    /// Fails when `event` is not a voice broadcast info event. `sender` is
    /// the member who sent it; the room name comes from `directory` and
    /// falls back to the room id.
    pub fn for_event(
        event: &RawEvent,
        sender: RoomMember,
        my_user_id: &UserId,
        stores: &BroadcastStores,
        state_sender: Arc<dyn StateEventSender>,
        directory: &dyn RoomDirectory,
    ) -> Result<Self> {
        let info_event = BroadcastInfoEvent::from_raw(event)?;
        let room_name = directory
            .room(&info_event.room_id)
            .map(|room| room.name)
            .unwrap_or_else(|| info_event.room_id.to_string());

        if should_display_as_voice_broadcast_recording_tile(info_event.state(), my_user_id, event) {
            let recording = stores.recordings.get_by_info_event(&info_event, state_sender);
            return Ok(VoiceBroadcastBody::Recording(VoiceBroadcastRecordingBody::new(
                recording, sender, room_name,
            )));
        }

        let playback = stores.playbacks.get_by_info_event(&info_event);
        Ok(VoiceBroadcastBody::Playback(
            VoiceBroadcastPlaybackBody::new(playback, sender, room_name).with_store(stores.playbacks.clone()),
        ))
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, VoiceBroadcastBody::Recording(_))
    }

    pub fn render(&self, t: &dyn Translator) -> Node {
        match self {
            VoiceBroadcastBody::Recording(body) => body.render(t),
            VoiceBroadcastBody::Playback(body) => body.render(t),
        }
    }
}
