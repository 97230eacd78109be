//! Spotlight dialog state
//!
//! Ties local search, space search and recent searches together behind the
//! operations the dialog's view calls: typing, opening a result, closing.

use std::sync::Arc;

use parley_model::{Action, Dispatcher, HierarchyRoom, Room, RoomDirectory, RoomId};

use crate::config::SpotlightConfig;
use crate::error::Result;
use crate::recent::RecentSearches;
use crate::search::{search_rooms, RoomSearchResults};
use crate::space::SpaceResults;

/// Whether the dialog browses recents or shows search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Browse,
    Search,
}

/// State behind one open Spotlight dialog
pub struct SpotlightDialog {
    directory: Arc<dyn RoomDirectory>,
    dispatcher: Arc<dyn Dispatcher>,
    recents: RecentSearches,
    space: Option<SpaceResults>,
    /// Breadcrumbs, in the order supplied
    recently_viewed: Vec<Room>,
    section_limit: usize,
    query: String,
    finished: bool,
}

impl SpotlightDialog {
    pub fn new(
        directory: Arc<dyn RoomDirectory>,
        dispatcher: Arc<dyn Dispatcher>,
        recents: RecentSearches,
        config: &SpotlightConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            directory,
            dispatcher,
            recents,
            space: None,
            recently_viewed: Vec::new(),
            section_limit: config.section_limit,
            query: String::new(),
            finished: false,
        })
    }

    /// Search within a space as well
    pub fn with_space_results(mut self, space: SpaceResults) -> Self {
        space.set_query(&self.query);
        self.space = Some(space);
        self
    }

    /// Rooms shown under "Recently viewed" while browsing
    pub fn with_recently_viewed(mut self, rooms: Vec<Room>) -> Self {
        self.recently_viewed = rooms;
        self
    }

    /// Pre-fill the search box
    pub fn with_initial_text(mut self, text: &str) -> Self {
        self.set_query(text);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> DialogMode {
        if self.query.is_empty() {
            DialogMode::Browse
        } else {
            DialogMode::Search
        }
    }

    /// Update the query
    ///
    /// Returns `true` when the dialog switched between browsing and
    /// searching; the view then moves focus back to the first entry.
    pub fn set_query(&mut self, query: &str) -> bool {
        let before = self.mode();
        self.query = query.to_string();
        if let Some(space) = &self.space {
            space.set_query(query);
        }
        before != self.mode()
    }

    /// Local results, `None` while browsing
    pub fn results(&self) -> Option<RoomSearchResults> {
        search_rooms(self.directory.as_ref(), &self.query, self.section_limit)
    }

    /// Matches in the active space, capped at the section limit
    pub fn space_results(&self) -> Vec<HierarchyRoom> {
        let Some(space) = &self.space else {
            return Vec::new();
        };
        let mut rooms = space.results();
        rooms.truncate(self.section_limit);
        rooms
    }

    pub fn space_results_loading(&self) -> bool {
        self.space.as_ref().map(|s| s.is_loading()).unwrap_or(false)
    }

    /// Space search, if one is attached
    pub fn space(&self) -> Option<&SpaceResults> {
        self.space.as_ref()
    }

    pub fn space_name(&self) -> Option<String> {
        let space_id = self.space.as_ref()?.space()?;
        self.directory.room(&space_id).map(|room| room.name)
    }

    /// Searched rooms still known to the client, most recent first
    pub fn recent_searches(&self) -> Vec<Room> {
        self.recents.load(self.directory.as_ref())
    }

    pub fn recently_viewed(&self) -> &[Room] {
        &self.recently_viewed
    }

    /// Nothing matched locally or in the space
    pub fn has_no_results(&self) -> bool {
        match self.results() {
            Some(results) => results.is_empty() && self.space_results().is_empty(),
            None => false,
        }
    }

    /// Open `room_id` and close the dialog
    ///
    /// With `persist`, the room is remembered as a recent search. Failing to
    /// persist is logged; navigation happens regardless.
    pub fn view_room(&mut self, room_id: &RoomId, persist: bool) {
        if persist {
            if let Err(e) = self.recents.record(room_id) {
                tracing::warn!("Failed to remember recent search {}: {}", room_id, e);
            }
        }

        self.dispatcher.dispatch(Action::ViewRoom {
            room_id: room_id.clone(),
        });
        self.finish();
    }

    /// Close without navigating
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if let Some(space) = &self.space {
            space.shutdown();
        }
        tracing::debug!("Spotlight dialog finished");
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
