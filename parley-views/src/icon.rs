//! Icon atom

use crate::node::Node;

/// Glyphs used by the voice broadcast widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconType {
    Live,
    Pause,
    Play,
    Stop,
}

impl IconType {
    pub fn as_str(self) -> &'static str {
        match self {
            IconType::Live => "live",
            IconType::Pause => "pause",
            IconType::Play => "play",
            IconType::Stop => "stop",
        }
    }
}

/// Theme colour applied to an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconColour {
    Accent,
    LiveBadge,
    #[default]
    CompoundSecondaryContent,
}

impl IconColour {
    pub fn as_str(self) -> &'static str {
        match self {
            IconColour::Accent => "accent",
            IconColour::LiveBadge => "live-badge",
            IconColour::CompoundSecondaryContent => "compound-secondary-content",
        }
    }
}

/// Render an icon
pub fn icon(icon_type: IconType, colour: IconColour) -> Node {
    Node::new("i")
        .with_class("mx_Icon")
        .with_class(format!("mx_Icon_{}", colour.as_str()))
        .with_attr("data-icon", icon_type.as_str())
        .with_attr("aria-hidden", "true")
}
