//! Starting a new broadcast

use std::sync::Arc;

use parley_model::{DeviceId, RoomId, StateEventSender, UserId};

use crate::config::BroadcastConfig;
use crate::error::{BroadcastError, Result};
use crate::model::{
    BroadcastInfoEvent, VoiceBroadcastInfoEventContent, VoiceBroadcastInfoState,
    VOICE_BROADCAST_INFO_EVENT_TYPE,
};
use crate::recording::VoiceBroadcastRecording;
use crate::stores::BroadcastStores;

/// Announce a new broadcast in `room_id` and make its recording current
///
/// Refuses while another recording is live. The Started info event carries
/// the configured chunk length and is keyed by the local user's id.
pub fn start_new_voice_broadcast_recording(
    room_id: &RoomId,
    my_user_id: &UserId,
    device_id: &DeviceId,
    sender: Arc<dyn StateEventSender>,
    stores: &BroadcastStores,
    config: &BroadcastConfig,
) -> Result<Arc<VoiceBroadcastRecording>> {
    config.validate()?;

    if let Some(live) = stores.recordings.current() {
        tracing::warn!(
            "Refusing to start a voice broadcast in {}: {} is still recording",
            room_id,
            live.id()
        );
        return Err(BroadcastError::AlreadyRecording {
            room_id: live.info_event().room_id.clone(),
        });
    }

    let content = VoiceBroadcastInfoEventContent::new(device_id.clone(), VoiceBroadcastInfoState::Started)
        .with_chunk_length(config.chunk_length.as_secs());
    let event_id = sender.send_state_event(
        room_id,
        VOICE_BROADCAST_INFO_EVENT_TYPE,
        my_user_id.as_str(),
        content.to_value()?,
    )?;

    tracing::info!("Started voice broadcast {} in {}", event_id, room_id);

    let info_event = BroadcastInfoEvent::new(event_id, room_id.clone(), my_user_id.clone(), content);
    let recording = stores.recordings.get_by_info_event(&info_event, sender);
    stores.recordings.set_current(Arc::clone(&recording));
    Ok(recording)
}
