use parley_broadcast::VoiceBroadcastPlaybackState;

use crate::i18n::Translator;
use crate::icon::{icon, IconColour, IconType};
use crate::node::{ClickHandler, Node};

/// Play/pause control of a broadcast playback
///
/// A pure function of the playback state and the click handler.
#[derive(Clone)]
pub struct PlaybackControlButton {
    pub state: VoiceBroadcastPlaybackState,
    pub on_click: ClickHandler,
}

impl PlaybackControlButton {
    pub fn new(state: VoiceBroadcastPlaybackState, on_click: ClickHandler) -> Self {
        Self { state, on_click }
    }

    /// Icon shown for `state`
    pub fn icon_for(state: VoiceBroadcastPlaybackState) -> IconType {
        match state {
            VoiceBroadcastPlaybackState::Playing => IconType::Pause,
            VoiceBroadcastPlaybackState::Paused => IconType::Play,
            VoiceBroadcastPlaybackState::Stopped => IconType::Play,
        }
    }

    /// Untranslated accessible label for `state`
    pub fn label_for(state: VoiceBroadcastPlaybackState) -> &'static str {
        match state {
            VoiceBroadcastPlaybackState::Playing => "pause voice broadcast",
            VoiceBroadcastPlaybackState::Paused | VoiceBroadcastPlaybackState::Stopped => {
                "resume voice broadcast"
            }
        }
    }

    pub fn render(&self, t: &dyn Translator) -> Node {
        Node::button()
            .with_class("mx_BroadcastPlaybackControlButton")
            .with_attr("aria-label", t.t(Self::label_for(self.state)))
            .with_click_handler(self.on_click.clone())
            .with_child(icon(Self::icon_for(self.state), IconColour::CompoundSecondaryContent))
    }
}
