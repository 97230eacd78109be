//! Space hierarchy pages
//!
//! The SDK exposes a space's child rooms one page at a time. `HierarchySource`
//! is the seam: production code wraps the SDK call, tests feed canned pages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HierarchyError;
use crate::ids::RoomId;
use crate::room::RoomType;

/// One room entry in a space hierarchy page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyRoom {
    pub room_id: RoomId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub canonical_alias: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub num_joined_members: u64,
}

impl HierarchyRoom {
    pub fn new(room_id: impl Into<RoomId>) -> Self {
        Self {
            room_id: room_id.into(),
            name: None,
            canonical_alias: None,
            room_type: None,
            topic: None,
            num_joined_members: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.canonical_alias = Some(alias.into());
        self
    }

    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    pub fn kind(&self) -> Option<RoomType> {
        RoomType::from_str_opt(self.room_type.as_deref())
    }

    pub fn is_space(&self) -> bool {
        self.kind() == Some(RoomType::Space)
    }
}

/// A page of hierarchy results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HierarchyPage {
    pub rooms: Vec<HierarchyRoom>,
    /// Token for the next page; `None` on the last page
    pub next_batch: Option<String>,
}

/// Fetches pages of a space's room hierarchy
#[async_trait]
pub trait HierarchySource: Send + Sync {
    /// Fetch up to `limit` rooms under `root`, continuing from `from`
    async fn fetch_page(
        &self,
        root: &RoomId,
        from: Option<&str>,
        limit: usize,
    ) -> Result<HierarchyPage, HierarchyError>;
}
