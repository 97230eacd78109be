//! Spotlight dialog view
//!
//! Renders the dialog state as sections of options. Arrow keys move the
//! active option, Enter opens it, Escape closes the dialog.

use std::sync::Arc;

use parking_lot::Mutex;
use parley_model::{HierarchyRoom, Room, RoomId};
use parley_spotlight::{DialogMode, SpotlightDialog};

use crate::i18n::Translator;
use crate::node::Node;

/// Keys the dialog reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

/// View over a shared `SpotlightDialog`
pub struct SpotlightView {
    dialog: Arc<Mutex<SpotlightDialog>>,
    active: usize,
}

impl SpotlightView {
    pub fn new(dialog: SpotlightDialog) -> Self {
        Self {
            dialog: Arc::new(Mutex::new(dialog)),
            active: 0,
        }
    }

    pub fn dialog(&self) -> &Arc<Mutex<SpotlightDialog>> {
        &self.dialog
    }

    /// Index of the highlighted option
    pub fn active(&self) -> usize {
        self.active
    }

    /// Forward typed text; focus returns to the first option on a mode switch
    pub fn set_query(&mut self, query: &str) {
        if self.dialog.lock().set_query(query) {
            self.active = 0;
        }
    }

    /// Handle a key press
    ///
    /// Returns whether the key was consumed.
    pub fn key_down(&mut self, key: Key, t: &dyn Translator) -> bool {
        match key {
            Key::Escape => {
                self.dialog.lock().finish();
                true
            }
            Key::ArrowUp | Key::ArrowDown => {
                let count = self.render(t).find_all(&is_option).len();
                if count == 0 {
                    return true;
                }
                self.active = match key {
                    Key::ArrowUp => self.active.saturating_sub(1),
                    _ => (self.active + 1).min(count - 1),
                };
                true
            }
            Key::Enter => {
                let content = self.render(t);
                match content.find_all(&is_option).get(self.active) {
                    Some(option) => option.click(),
                    None => false,
                }
            }
        }
    }

    pub fn render(&self, t: &dyn Translator) -> Node {
        let dialog = self.dialog.lock();
        let sections = match dialog.mode() {
            DialogMode::Search => self.search_sections(&dialog, t),
            DialogMode::Browse => self.browse_sections(&dialog, t),
        };
        drop(dialog);

        let mut content = Node::div()
            .with_attr("id", "mx_SpotlightDialog_content")
            .with_attr("role", "listbox")
            .with_children(sections);

        let mut options = Vec::new();
        collect_option_ids(&content, &mut options);
        if let Some(id) = options.get(self.active.min(options.len().saturating_sub(1))) {
            content = content.with_attr("aria-activedescendant", id.as_str());
        }

        Node::div()
            .with_class("mx_SpotlightDialog")
            .with_child(
                Node::new("input")
                    .with_class("mx_SpotlightDialog_searchBox")
                    .with_attr("placeholder", t.t("Search for anything"))
                    .with_attr("aria-owns", "mx_SpotlightDialog_content"),
            )
            .with_child(content)
    }

    fn search_sections(&self, dialog: &SpotlightDialog, t: &dyn Translator) -> Vec<Node> {
        let results = dialog.results().unwrap_or_default();
        let space_results = dialog.space_results();
        let mut sections = Vec::new();

        if !results.people.is_empty() {
            sections.push(section(
                "mx_SpotlightDialog_results",
                t.t("People"),
                results.people.iter().map(|room| self.room_option("result", room, true)),
            ));
        }
        if !results.rooms.is_empty() {
            sections.push(section(
                "mx_SpotlightDialog_results",
                t.t("Rooms"),
                results.rooms.iter().map(|room| self.room_option("result", room, true)),
            ));
        }
        if !space_results.is_empty() {
            let space_name = dialog.space_name().unwrap_or_default();
            let heading = t.translate("Other rooms in %(spaceName)s", &[("spaceName", space_name.as_str())]);
            let spinner = dialog
                .space_results_loading()
                .then(|| Node::div().with_class("mx_Spinner"));
            sections.push(
                section(
                    "mx_SpotlightDialog_results",
                    heading,
                    space_results.iter().map(|room| self.hierarchy_option(room)),
                )
                .with_optional_child(spinner),
            );
        }
        if results.is_empty() && space_results.is_empty() {
            sections.push(Node::div().with_class("mx_SpotlightDialog_noResults").with_text(t.t("No results")));
        }
        sections
    }

    fn browse_sections(&self, dialog: &SpotlightDialog, t: &dyn Translator) -> Vec<Node> {
        let mut sections = vec![section(
            "mx_SpotlightDialog_recentlyViewed",
            t.t("Recently viewed"),
            dialog
                .recently_viewed()
                .iter()
                .map(|room| self.room_option("recentlyViewed", room, false)),
        )];

        let recent = dialog.recent_searches();
        if !recent.is_empty() {
            sections.push(section(
                "mx_SpotlightDialog_recentSearches",
                t.t("Recent searches"),
                recent.iter().map(|room| self.room_option("recentSearch", room, true)),
            ));
        }
        sections
    }

    fn room_option(&self, kind: &str, room: &Room, persist: bool) -> Node {
        let mut option = self.option(kind, &room.room_id, persist).with_child(Node::text(room.name.as_str()));
        if kind == "result" {
            option = option.with_optional_child(room.canonical_alias.as_deref().map(result_details));
        }
        option
    }

    fn hierarchy_option(&self, room: &HierarchyRoom) -> Node {
        let name = room.name.clone().unwrap_or_else(|| room.room_id.to_string());
        self.option("result", &room.room_id, true)
            .with_child(Node::text(name))
            .with_optional_child(room.canonical_alias.as_deref().map(result_details))
    }

    fn option(&self, kind: &str, room_id: &RoomId, persist: bool) -> Node {
        let dialog = Arc::clone(&self.dialog);
        let target = room_id.clone();
        Node::new("li")
            .with_class("mx_SpotlightDialog_option")
            .with_attr("role", "option")
            .with_attr("id", format!("mx_SpotlightDialog_button_{}_{}", kind, room_id))
            .on_click(move || dialog.lock().view_room(&target, persist))
    }
}

impl std::fmt::Debug for SpotlightView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotlightView").field("active", &self.active).finish_non_exhaustive()
    }
}

fn section(class: &str, heading: String, options: impl Iterator<Item = Node>) -> Node {
    Node::div()
        .with_class("mx_SpotlightDialog_section")
        .with_class(class)
        .with_attr("role", "group")
        .with_child(Node::new("h4").with_text(heading))
        .with_child(Node::div().with_children(options))
}

fn result_details(alias: &str) -> Node {
    Node::div().with_class("mx_SpotlightDialog_result_details").with_text(alias)
}

fn is_option(node: &Node) -> bool {
    node.attr("role") == Some("option")
}

fn collect_option_ids(node: &Node, out: &mut Vec<String>) {
    for option in node.find_all(&is_option) {
        if let Some(id) = option.attr("id") {
            out.push(id.to_string());
        }
    }
}
