//! Parley Spotlight
//!
//! State behind the Spotlight search dialog: local room search, a lazily
//! paginated search over the active space, and the persisted list of
//! recently searched rooms.
//!
//! # Architecture
//!
//! ```text
//!                    SpotlightDialog
//!          ┌──────────────┼──────────────┐
//!     search_rooms   SpaceResults   RecentSearches
//!          │              │              │
//!    RoomDirectory  RoomHierarchy   KeyValueStorage
//!                         │
//!                  HierarchySource
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use parley_spotlight::prelude::*;
//!
//! let config = SpotlightConfig::default();
//! let storage = Arc::new(JsonFileStorage::open_default()?);
//! let recents = RecentSearches::new(storage, &config);
//! let space = SpaceResults::new(hierarchy_source, directory.clone(), &config)?;
//! space.set_space(active_space);
//!
//! let mut dialog = SpotlightDialog::new(directory, dispatcher, recents, &config)?
//!     .with_space_results(space);
//! dialog.set_query("design");
//! ```

pub mod config;
pub mod dialog;
pub mod error;
pub mod hierarchy;
pub mod normalize;
pub mod recent;
pub mod search;
pub mod space;
pub mod storage;

// Re-exports - Public API
pub use config::{SpotlightConfig, RECENT_SEARCHES_KEY};
pub use dialog::{DialogMode, SpotlightDialog};
pub use error::{Result, SpotlightError, StorageError};
pub use hierarchy::RoomHierarchy;
pub use normalize::normalize;
pub use recent::RecentSearches;
pub use search::{search_rooms, Query, RoomSearchResults};
pub use space::{SpaceResults, SpaceSnapshot};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::SpotlightConfig;
    pub use crate::dialog::{DialogMode, SpotlightDialog};
    pub use crate::error::{Result, SpotlightError};
    pub use crate::recent::RecentSearches;
    pub use crate::space::{SpaceResults, SpaceSnapshot};
    pub use crate::storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
    pub use std::sync::Arc;
}
