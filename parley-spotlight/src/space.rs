//! Lazy room search within the active space
//!
//! `SpaceResults` walks the active space's hierarchy in the background while
//! a query is active, publishing the accumulated rooms after every page.
//! Callers read filtered matches through `results()` and follow progress
//! through a `watch` receiver.
//!
//! ```text
//! set_space / set_query ──► pagination task ──► watch::Sender<SpaceSnapshot>
//!          │                 (one per space)              │
//!          └── cancels on space change                    └──► results() / watch()
//! ```
//!
//! A failed page halts the walk: `loading` drops to false and the error is
//! kept in the snapshot. `retry()` continues from the failed page.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use parley_model::{HierarchyError, HierarchyRoom, HierarchySource, RoomDirectory, RoomId};

use crate::config::SpotlightConfig;
use crate::error::{Result, SpotlightError};
use crate::hierarchy::RoomHierarchy;
use crate::search::Query;

/// Published state of the space walk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceSnapshot {
    /// Space the rooms belong to
    pub space: Option<RoomId>,
    /// All rooms loaded so far, unfiltered
    pub rooms: Vec<HierarchyRoom>,
    /// More pages are being fetched
    pub loading: bool,
    /// Why the walk halted, if it did
    pub error: Option<HierarchyError>,
}

struct State {
    space: Option<RoomId>,
    query: String,
    /// Token of the walk for the current space
    cancel: Option<CancellationToken>,
    /// Hierarchy left behind by a failed page
    stalled: Option<RoomHierarchy>,
}

/// Room search scoped to the active space
pub struct SpaceResults {
    source: Arc<dyn HierarchySource>,
    directory: Arc<dyn RoomDirectory>,
    page_size: usize,
    runtime: Handle,
    state: Arc<Mutex<State>>,
    snapshot: Arc<watch::Sender<SpaceSnapshot>>,
}

impl SpaceResults {
    /// Must be called from within a Tokio runtime
    pub fn new(
        source: Arc<dyn HierarchySource>,
        directory: Arc<dyn RoomDirectory>,
        config: &SpotlightConfig,
    ) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|e| SpotlightError::NoRuntime(e.to_string()))?;
        let (snapshot, _) = watch::channel(SpaceSnapshot::default());

        Ok(Self {
            source,
            directory,
            page_size: config.hierarchy_page_size,
            runtime,
            state: Arc::new(Mutex::new(State {
                space: None,
                query: String::new(),
                cancel: None,
                stalled: None,
            })),
            snapshot: Arc::new(snapshot),
        })
    }

    /// Switch to another space (or none)
    ///
    /// Cancels the walk of the previous space and forgets its rooms. Setting
    /// the same space again does nothing.
    pub fn set_space(&self, space: Option<RoomId>) {
        let mut state = self.state.lock();
        if state.space == space {
            return;
        }

        if let Some(cancel) = state.cancel.take() {
            cancel.cancel();
        }
        state.stalled = None;
        state.space = space.clone();
        self.snapshot.send_replace(SpaceSnapshot {
            space,
            ..Default::default()
        });

        self.start_if_needed(&mut state);
    }

    /// Update the query; the first non-empty query starts the walk
    pub fn set_query(&self, query: &str) {
        let mut state = self.state.lock();
        state.query = query.to_string();
        self.start_if_needed(&mut state);
    }

    pub fn space(&self) -> Option<RoomId> {
        self.state.lock().space.clone()
    }

    /// Loaded rooms matching the query
    ///
    /// Spaces and rooms the user already joined are left out.
    pub fn results(&self) -> Vec<HierarchyRoom> {
        let query = Query::new(&self.state.lock().query);
        self.snapshot
            .borrow()
            .rooms
            .iter()
            .filter(|room| !room.is_space())
            .filter(|room| {
                !self
                    .directory
                    .room(&room.room_id)
                    .map(|known| known.is_joined())
                    .unwrap_or(false)
            })
            .filter(|room| query.matches(room.name.as_deref(), room.canonical_alias.as_deref()))
            .cloned()
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.borrow().loading
    }

    /// Error that halted the walk, if any
    pub fn error(&self) -> Option<HierarchyError> {
        self.snapshot.borrow().error.clone()
    }

    pub fn snapshot(&self) -> SpaceSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Follow snapshot updates
    pub fn watch(&self) -> watch::Receiver<SpaceSnapshot> {
        self.snapshot.subscribe()
    }

    /// Resume a walk halted by a failed page
    ///
    /// Returns `false` if nothing was halted.
    pub fn retry(&self) -> bool {
        let mut state = self.state.lock();
        let Some(hierarchy) = state.stalled.take() else {
            return false;
        };
        let cancel = CancellationToken::new();
        state.cancel = Some(cancel.clone());
        tracing::debug!("Retrying hierarchy walk of {}", hierarchy.root());
        self.spawn(hierarchy, cancel);
        true
    }

    /// Cancel any running walk
    pub fn shutdown(&self) {
        if let Some(cancel) = self.state.lock().cancel.take() {
            cancel.cancel();
        }
    }

    fn start_if_needed(&self, state: &mut State) {
        if state.query.is_empty() || state.cancel.is_some() || state.stalled.is_some() {
            return;
        }
        let Some(space) = state.space.clone() else {
            return;
        };

        let cancel = CancellationToken::new();
        state.cancel = Some(cancel.clone());
        tracing::debug!("Starting hierarchy walk of {}", space);
        self.spawn(RoomHierarchy::new(space, self.page_size), cancel);
    }

    fn spawn(&self, hierarchy: RoomHierarchy, cancel: CancellationToken) {
        self.snapshot.send_modify(|s| {
            s.loading = hierarchy.can_load_more();
            s.error = None;
        });

        let walk = Walk {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            snapshot: Arc::clone(&self.snapshot),
            cancel,
        };
        self.runtime.spawn(walk.run(hierarchy));
    }
}

impl Drop for SpaceResults {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for SpaceResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot.borrow();
        f.debug_struct("SpaceResults")
            .field("space", &snapshot.space)
            .field("rooms", &snapshot.rooms.len())
            .field("loading", &snapshot.loading)
            .finish()
    }
}

/// One background walk over a space hierarchy
struct Walk {
    source: Arc<dyn HierarchySource>,
    state: Arc<Mutex<State>>,
    snapshot: Arc<watch::Sender<SpaceSnapshot>>,
    cancel: CancellationToken,
}

impl Walk {
    async fn run(self, mut hierarchy: RoomHierarchy) {
        while hierarchy.can_load_more() {
            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return,
                result = hierarchy.load(self.source.as_ref()) => result,
            };

            match result {
                Ok(_) => {
                    if !self.publish_page(&hierarchy) {
                        return;
                    }
                }
                Err(e) => {
                    self.halt(hierarchy, e);
                    return;
                }
            }
        }
    }

    /// Publish the rooms so far; `false` once cancelled
    fn publish_page(&self, hierarchy: &RoomHierarchy) -> bool {
        let _state = self.state.lock();
        if self.cancel.is_cancelled() {
            return false;
        }
        let rooms = hierarchy.rooms().to_vec();
        let loading = hierarchy.can_load_more();
        self.snapshot.send_modify(|s| {
            s.rooms = rooms;
            s.loading = loading;
        });
        true
    }

    fn halt(&self, hierarchy: RoomHierarchy, error: HierarchyError) {
        let mut state = self.state.lock();
        if self.cancel.is_cancelled() {
            return;
        }
        tracing::warn!(
            "Hierarchy walk of {} halted after {} pages: {}",
            hierarchy.root(),
            hierarchy.pages_loaded(),
            error
        );
        state.cancel = None;
        state.stalled = Some(hierarchy);
        self.snapshot.send_modify(|s| {
            s.loading = false;
            s.error = Some(error);
        });
    }
}
