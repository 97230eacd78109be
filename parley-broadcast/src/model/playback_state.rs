//! Playback state enumeration

use serde::{Deserialize, Serialize};

/// What the local player is doing with a broadcast
///
/// UI-local; distinct from the four-valued `VoiceBroadcastInfoState` that
/// travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VoiceBroadcastPlaybackState {
    /// Audio is playing
    Playing,
    /// Playback is paused and can be resumed
    Paused,
    /// Nothing is playing
    #[default]
    Stopped,
}

impl VoiceBroadcastPlaybackState {
    pub fn is_playing(self) -> bool {
        self == VoiceBroadcastPlaybackState::Playing
    }
}
