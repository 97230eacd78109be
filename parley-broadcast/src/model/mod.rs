//! Model types for parley-broadcast

mod chunk;
mod info_event;
mod info_state;
mod playback_state;

pub use chunk::VoiceBroadcastChunk;
pub use info_event::{
    BroadcastInfoEvent, RelatesTo, VoiceBroadcastInfoEventContent, REFERENCE_REL_TYPE,
    VOICE_BROADCAST_CHUNK_EVENT_TYPE, VOICE_BROADCAST_INFO_EVENT_TYPE,
};
pub use info_state::VoiceBroadcastInfoState;
pub use playback_state::VoiceBroadcastPlaybackState;
