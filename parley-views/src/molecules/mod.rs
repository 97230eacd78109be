//! Broadcast tile bodies composed from the atoms

mod playback_body;
mod recording_body;

pub use playback_body::VoiceBroadcastPlaybackBody;
pub use recording_body::VoiceBroadcastRecordingBody;
