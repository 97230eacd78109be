use std::sync::Arc;

use parley_broadcast::{VoiceBroadcastInfoState, VoiceBroadcastPlayback, VoiceBroadcastPlaybacksStore};
use parley_model::RoomMember;

use crate::atoms::{PlaybackControlButton, VoiceBroadcastHeader};
use crate::i18n::Translator;
use crate::node::Node;

/// Tile shown to listeners of a broadcast
#[derive(Debug, Clone)]
pub struct VoiceBroadcastPlaybackBody {
    playback: Arc<VoiceBroadcastPlayback>,
    sender: RoomMember,
    room_name: String,
    /// Made to point at this playback when it starts
    store: Option<VoiceBroadcastPlaybacksStore>,
}

impl VoiceBroadcastPlaybackBody {
    pub fn new(playback: Arc<VoiceBroadcastPlayback>, sender: RoomMember, room_name: impl Into<String>) -> Self {
        Self {
            playback,
            sender,
            room_name: room_name.into(),
            store: None,
        }
    }

    /// Become the store's current playback on play, pausing the previous one
    pub fn with_store(mut self, store: VoiceBroadcastPlaybacksStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn playback(&self) -> &Arc<VoiceBroadcastPlayback> {
        &self.playback
    }

    /// Render against the playback's current state
    ///
    /// The tree is a snapshot; render again after the state changes.
    pub fn render(&self, t: &dyn Translator) -> Node {
        let live = self.playback.info_event().state() != Some(VoiceBroadcastInfoState::Stopped);
        let playback = Arc::clone(&self.playback);
        let store = self.store.clone();
        let control = PlaybackControlButton::new(
            self.playback.state(),
            Arc::new(move || {
                if let Some(store) = &store {
                    if !playback.state().is_playing() {
                        store.set_current(Arc::clone(&playback));
                    }
                }
                let state = playback.toggle();
                tracing::debug!("Playback {} toggled to {:?}", playback.id(), state);
            }),
        );

        Node::div()
            .with_class("mx_VoiceBroadcastPlaybackBody")
            .with_child(VoiceBroadcastHeader::new(self.sender.clone(), self.room_name.as_str(), live).render(t))
            .with_child(
                Node::div()
                    .with_class("mx_VoiceBroadcastPlaybackBody_controls")
                    .with_child(control.render(t)),
            )
    }
}
