use crate::i18n::Translator;
use crate::icon::{icon, IconColour, IconType};
use crate::node::Node;

/// "Live" pill shown on broadcasts that are still being recorded
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveBadge;

impl LiveBadge {
    pub fn render(&self, t: &dyn Translator) -> Node {
        Node::div()
            .with_class("mx_LiveBadge")
            .with_child(icon(IconType::Live, IconColour::LiveBadge))
            .with_child(Node::text(t.t("Live")))
    }
}
