//! Paginated walk over a space's room hierarchy

use std::collections::HashSet;

use parley_model::{HierarchyError, HierarchyRoom, HierarchySource, RoomId};

/// Accumulates the rooms of one space page by page
///
/// Pages are requested strictly one after another. A failed page leaves the
/// continuation token in place so the next `load` retries it.
#[derive(Debug, Clone)]
pub struct RoomHierarchy {
    root: RoomId,
    page_size: usize,
    rooms: Vec<HierarchyRoom>,
    seen: HashSet<RoomId>,
    next_batch: Option<String>,
    exhausted: bool,
    pages_loaded: usize,
}

impl RoomHierarchy {
    pub fn new(root: RoomId, page_size: usize) -> Self {
        Self {
            root,
            page_size,
            rooms: Vec::new(),
            seen: HashSet::new(),
            next_batch: None,
            exhausted: false,
            pages_loaded: 0,
        }
    }

    pub fn root(&self) -> &RoomId {
        &self.root
    }

    /// Rooms loaded so far, in hierarchy order
    pub fn rooms(&self) -> &[HierarchyRoom] {
        &self.rooms
    }

    pub fn can_load_more(&self) -> bool {
        !self.exhausted
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Fetch the next page and append its new rooms
    ///
    /// Returns the number of rooms added. Rooms seen on an earlier page are
    /// skipped.
    pub async fn load(&mut self, source: &dyn HierarchySource) -> Result<usize, HierarchyError> {
        if self.exhausted {
            return Ok(0);
        }

        let page = source
            .fetch_page(&self.root, self.next_batch.as_deref(), self.page_size)
            .await?;

        let before = self.rooms.len();
        for room in page.rooms {
            if self.seen.insert(room.room_id.clone()) {
                self.rooms.push(room);
            }
        }

        self.pages_loaded += 1;
        self.exhausted = page.next_batch.is_none();
        self.next_batch = page.next_batch;

        let added = self.rooms.len() - before;
        tracing::debug!(
            "Loaded hierarchy page {} of {}: {} new rooms, more: {}",
            self.pages_loaded,
            self.root,
            added,
            !self.exhausted
        );
        Ok(added)
    }
}
