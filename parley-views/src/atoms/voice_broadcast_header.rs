use parley_model::RoomMember;

use crate::atoms::LiveBadge;
use crate::i18n::Translator;
use crate::icon::{icon, IconColour, IconType};
use crate::node::Node;

/// Header of a broadcast tile: who broadcasts, where, and whether it's live
#[derive(Debug, Clone)]
pub struct VoiceBroadcastHeader {
    pub sender: RoomMember,
    pub room_name: String,
    pub live: bool,
    /// Adds a "Voice broadcast" line under the room name
    pub show_broadcast: bool,
}

impl VoiceBroadcastHeader {
    pub fn new(sender: RoomMember, room_name: impl Into<String>, live: bool) -> Self {
        Self {
            sender,
            room_name: room_name.into(),
            live,
            show_broadcast: false,
        }
    }

    pub fn with_broadcast_line(mut self) -> Self {
        self.show_broadcast = true;
        self
    }

    pub fn render(&self, t: &dyn Translator) -> Node {
        let broadcast = self.show_broadcast.then(|| {
            Node::div()
                .with_class("mx_VoiceBroadcastHeader_line")
                .with_child(icon(IconType::Live, IconColour::CompoundSecondaryContent))
                .with_child(Node::text(t.t("Voice broadcast")))
        });
        let live_badge = self.live.then(|| LiveBadge.render(t));

        Node::div()
            .with_class("mx_VoiceBroadcastHeader")
            .with_child(self.avatar())
            .with_child(
                Node::div()
                    .with_class("mx_VoiceBroadcastHeader_content")
                    .with_child(
                        Node::div()
                            .with_class("mx_VoiceBroadcastHeader_sender")
                            .with_text(self.sender.name.as_str()),
                    )
                    .with_child(
                        Node::div()
                            .with_class("mx_VoiceBroadcastHeader_room")
                            .with_text(self.room_name.as_str()),
                    )
                    .with_optional_child(broadcast),
            )
            .with_optional_child(live_badge)
    }

    fn avatar(&self) -> Node {
        let avatar = Node::new("img")
            .with_class("mx_MemberAvatar")
            .with_attr("data-user-id", self.sender.user_id.as_str())
            .with_attr("alt", "");
        match &self.sender.avatar_url {
            Some(url) => avatar.with_attr("src", url.as_str()),
            None => avatar,
        }
    }
}
