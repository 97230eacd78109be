use std::sync::Arc;

use parley_broadcast::VoiceBroadcastRecording;
use parley_model::RoomMember;

use crate::atoms::VoiceBroadcastHeader;
use crate::i18n::Translator;
use crate::icon::{icon, IconColour, IconType};
use crate::node::Node;

/// Tile shown to the broadcaster while recording
#[derive(Debug, Clone)]
pub struct VoiceBroadcastRecordingBody {
    recording: Arc<VoiceBroadcastRecording>,
    sender: RoomMember,
    room_name: String,
}

impl VoiceBroadcastRecordingBody {
    pub fn new(recording: Arc<VoiceBroadcastRecording>, sender: RoomMember, room_name: impl Into<String>) -> Self {
        Self {
            recording,
            sender,
            room_name: room_name.into(),
        }
    }

    pub fn recording(&self) -> &Arc<VoiceBroadcastRecording> {
        &self.recording
    }

    pub fn render(&self, t: &dyn Translator) -> Node {
        let stop = (!self.recording.is_stopped()).then(|| {
            let recording = Arc::clone(&self.recording);
            Node::button()
                .with_class("mx_VoiceBroadcastRecordingBody_stop")
                .with_attr("aria-label", t.t("stop voice broadcast"))
                .with_child(icon(IconType::Stop, IconColour::CompoundSecondaryContent))
                .on_click(move || {
                    if let Err(e) = recording.stop() {
                        tracing::warn!("Failed to stop voice broadcast {}: {}", recording.id(), e);
                    }
                })
        });

        Node::div()
            .with_class("mx_VoiceBroadcastRecordingBody")
            .with_child(VoiceBroadcastHeader::new(self.sender.clone(), self.room_name.as_str(), true).render(t))
            .with_optional_child(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use parley_broadcast::{BroadcastInfoEvent, VoiceBroadcastInfoEventContent, VoiceBroadcastInfoState};
    use parley_model::{DeviceId, EventId, RoomId, SendError, StateEventSender};
    use serde_json::Value;

    struct AcceptAll;

    impl StateEventSender for AcceptAll {
        fn send_state_event(&self, _: &RoomId, _: &str, _: &str, _: Value) -> Result<EventId, SendError> {
            Ok(EventId::new("$next"))
        }
    }

    fn body() -> VoiceBroadcastRecordingBody {
        let content = VoiceBroadcastInfoEventContent::new(DeviceId::new("DEV"), VoiceBroadcastInfoState::Started);
        let info = BroadcastInfoEvent::new("$info", "!room:example.com", "@me:example.com", content);
        VoiceBroadcastRecordingBody::new(
            Arc::new(VoiceBroadcastRecording::new(info, Arc::new(AcceptAll))),
            RoomMember::new("@me:example.com", "Me"),
            "My room",
        )
    }

    #[test]
    fn test_recording_is_always_live() {
        let node = body().render(&Catalog::english());
        assert!(node.find_by_class("mx_LiveBadge").is_some());
        assert!(node.find_by_label("stop voice broadcast").is_some());
    }

    #[test]
    fn test_stop_removes_control() {
        let body = body();
        let t = Catalog::english();

        assert!(body.render(&t).find_by_label("stop voice broadcast").unwrap().click());
        assert!(body.recording().is_stopped());
        assert!(body.render(&t).find_by_label("stop voice broadcast").is_none());
    }
}
