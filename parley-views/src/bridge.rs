//! Bridge settings tab
//!
//! Lists the bridges connected to a room, one card per bridge state event.

use parley_model::RawEvent;
use serde::Deserialize;

use crate::i18n::Translator;
use crate::node::Node;

/// State event types describing a bridge
pub const BRIDGE_EVENT_TYPES: &[&str] = &["uk.half-shot.bridge"];

/// A protocol, network or channel named in a bridge event
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct BridgeEndpoint {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub displayname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
}

impl BridgeEndpoint {
    pub fn name(&self) -> &str {
        match &self.displayname {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}

/// Content of a bridge state event
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct BridgeContent {
    #[serde(default)]
    pub protocol: Option<BridgeEndpoint>,
    #[serde(default)]
    pub network: Option<BridgeEndpoint>,
    #[serde(default)]
    pub channel: Option<BridgeEndpoint>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Bridge state events among a room's current state
pub fn bridge_state_events(state: &[RawEvent]) -> Vec<&RawEvent> {
    state
        .iter()
        .filter(|event| event.is_state() && BRIDGE_EVENT_TYPES.contains(&event.event_type.as_str()))
        .collect()
}

/// Render one bridge card
///
/// Returns `None` when the content lacks a channel or protocol.
pub fn bridge_card(event: &RawEvent, t: &dyn Translator) -> Option<Node> {
    let content: BridgeContent = match serde_json::from_value(event.content.clone()) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Unreadable bridge event {}: {}", event.event_id, e);
            return None;
        }
    };
    let channel = content.channel.as_ref()?;
    let protocol = content.protocol.as_ref()?;

    let network_name = content.network.as_ref().map(|n| n.name()).unwrap_or("");
    let heading = if network_name.is_empty() {
        channel.name().to_string()
    } else {
        t.translate(
            "%(channelName)s on %(networkName)s",
            &[("channelName", channel.name()), ("networkName", network_name)],
        )
    };

    let status = match content.status.as_deref() {
        Some("active") => Some(t.t("Active")),
        Some("disabled") => Some(t.t("Disabled")),
        _ => None,
    }
    .map(|status| {
        Node::paragraph()
            .with_class("mx_BridgeCard_status")
            .with_child(Node::text(format!("{}: ", t.t("Status"))))
            .with_child(Node::new("b").with_text(status))
    });

    let creator = content.creator.as_deref().map(|creator| {
        Node::paragraph()
            .with_class("mx_BridgeCard_creator")
            .with_child(Node::text(t.t("This bridge was provisioned by ")))
            .with_child(user_pill(creator))
    });

    let bot = Node::paragraph()
        .with_class("mx_BridgeCard_bot")
        .with_child(Node::text(t.t("The bridge is managed by ")))
        .with_child(user_pill(event.sender.as_str()));

    let bridged_into = Node::paragraph()
        .with_class("mx_BridgeCard_channel")
        .with_child(Node::text(t.t("Bridged into ")))
        .with_child(endpoint_link(channel))
        .with_optional_child(content.network.as_ref().map(|network| {
            Node::span()
                .with_child(Node::text(" "))
                .with_child(endpoint_link(network))
        }))
        .with_child(Node::text(format!(", {} {}", t.t("on"), protocol.name())));

    let card = Node::new("li").with_attr("data-state-key", event.state_key.clone().unwrap_or_default()).with_child(
        Node::div()
            .with_class("mx_BridgeCard")
            .with_child(Node::new("h3").with_text(heading))
            .with_child(Node::paragraph().with_text(t.translate(
                "Connected via %(protocolName)s",
                &[("protocolName", protocol.name())],
            )))
            .with_child(
                Node::new("details")
                    .with_optional_child(status)
                    .with_optional_child(creator)
                    .with_child(bot)
                    .with_child(bridged_into),
            ),
    );
    Some(card)
}

/// Render the whole tab for a room's current state
pub fn bridge_settings_tab(state: &[RawEvent], t: &dyn Translator) -> Node {
    let cards = bridge_state_events(state)
        .into_iter()
        .filter_map(|event| bridge_card(event, t));

    Node::div()
        .with_class("mx_SettingsTab")
        .with_child(Node::div().with_class("mx_SettingsTab_heading").with_text(t.t("Bridge Info")))
        .with_child(
            Node::div()
                .with_class("mx_SettingsTab_section")
                .with_child(Node::paragraph().with_text(t.t("Below is a list of bridges connected to this room.")))
                .with_child(
                    Node::new("ul")
                        .with_class("mx_RoomSettingsDialog_BridgeList")
                        .with_children(cards),
                ),
        )
}

fn user_pill(user_id: &str) -> Node {
    Node::new("a")
        .with_class("mx_Pill")
        .with_attr("href", format!("https://matrix.to/#/{}", user_id))
        .with_text(user_id)
}

fn endpoint_link(endpoint: &BridgeEndpoint) -> Node {
    match &endpoint.external_url {
        Some(url) => Node::new("a")
            .with_attr("href", url.as_str())
            .with_attr("target", "_blank")
            .with_text(endpoint.name()),
        None => Node::span().with_text(endpoint.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use serde_json::json;

    fn bridge(content: serde_json::Value) -> RawEvent {
        RawEvent::new("uk.half-shot.bridge", "$b", "!room:example.com", "@bot:example.com")
            .with_state_key("irc/freenode/#rust")
            .with_content(content)
    }

    #[test]
    fn test_card_requires_channel_and_protocol() {
        let t = Catalog::english();
        assert!(bridge_card(&bridge(json!({ "protocol": { "id": "irc" } })), &t).is_none());
        assert!(bridge_card(&bridge(json!({ "channel": { "id": "#rust" } })), &t).is_none());
        assert!(bridge_card(&bridge(json!({ "channel": "not an object", "protocol": {} })), &t).is_none());
    }

    #[test]
    fn test_minimal_card() {
        let t = Catalog::english();
        let event = bridge(json!({
            "protocol": { "id": "irc" },
            "channel": { "id": "#rust" },
        }));
        let card = bridge_card(&event, &t).unwrap();

        assert_eq!(card.find(&|n: &Node| n.tag == "h3").unwrap().text_content(), "#rust");
        assert!(card.find_by_text("Connected via irc").is_some());
        assert!(card.find_by_class("mx_BridgeCard_status").is_none());
        assert!(card.find_by_class("mx_BridgeCard_creator").is_none());
        assert_eq!(
            card.find_by_class("mx_BridgeCard_bot").unwrap().text_content(),
            "The bridge is managed by @bot:example.com"
        );
        assert_eq!(
            card.find_by_class("mx_BridgeCard_channel").unwrap().text_content(),
            "Bridged into #rust, on irc"
        );
    }

    #[test]
    fn test_full_card() {
        let t = Catalog::english();
        let event = bridge(json!({
            "protocol": { "id": "irc", "displayname": "IRC" },
            "network": { "id": "freenode", "displayname": "Freenode", "external_url": "https://freenode.net" },
            "channel": { "id": "#rust", "external_url": "https://example.com/rust" },
            "creator": "@admin:example.com",
            "status": "active",
        }));
        let card = bridge_card(&event, &t).unwrap();

        assert_eq!(card.attr("data-state-key"), Some("irc/freenode/#rust"));
        assert_eq!(
            card.find(&|n: &Node| n.tag == "h3").unwrap().text_content(),
            "#rust on Freenode"
        );
        assert!(card.find_by_text("Connected via IRC").is_some());
        assert_eq!(card.find_by_class("mx_BridgeCard_status").unwrap().text_content(), "Status: Active");
        assert!(card
            .find_by_class("mx_BridgeCard_creator")
            .unwrap()
            .text_content()
            .ends_with("@admin:example.com"));
        assert_eq!(
            card.find_by_class("mx_BridgeCard_channel").unwrap().text_content(),
            "Bridged into #rust Freenode, on IRC"
        );
        let links: Vec<_> = card
            .find_all(&|n: &Node| n.tag == "a" && n.attr("target") == Some("_blank"))
            .into_iter()
            .filter_map(|n| n.attr("href"))
            .collect();
        assert_eq!(links, vec!["https://example.com/rust", "https://freenode.net"]);
    }

    #[test]
    fn test_unknown_status_is_hidden() {
        let event = bridge(json!({
            "protocol": { "id": "irc" },
            "channel": { "id": "#rust" },
            "status": "exploded",
        }));
        let card = bridge_card(&event, &Catalog::english()).unwrap();
        assert!(card.find_by_class("mx_BridgeCard_status").is_none());
    }

    #[test]
    fn test_tab_lists_only_bridge_state_events() {
        let state = vec![
            bridge(json!({ "protocol": { "id": "irc" }, "channel": { "id": "#a" } })),
            bridge(json!({ "protocol": { "id": "irc" } })),
            RawEvent::new("m.room.name", "$n", "!room:example.com", "@x:example.com").with_state_key(""),
            RawEvent::new("uk.half-shot.bridge", "$t", "!room:example.com", "@x:example.com"),
        ];

        assert_eq!(bridge_state_events(&state).len(), 2);

        let tab = bridge_settings_tab(&state, &Catalog::english());
        assert_eq!(
            tab.find_by_class("mx_SettingsTab_heading").unwrap().text_content(),
            "Bridge Info"
        );
        let list = tab.find_by_class("mx_RoomSettingsDialog_BridgeList").unwrap();
        assert_eq!(list.children.len(), 1);
    }
}
