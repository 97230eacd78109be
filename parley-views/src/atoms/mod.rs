//! Stateless building blocks of the voice broadcast tiles

mod live_badge;
mod playback_control_button;
mod voice_broadcast_header;

pub use live_badge::LiveBadge;
pub use playback_control_button::PlaybackControlButton;
pub use voice_broadcast_header::VoiceBroadcastHeader;
