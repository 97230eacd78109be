//! Rooms and members as handed over by the messaging SDK

use serde::{Deserialize, Serialize};

use crate::ids::{RoomId, UserId};

/// The local user's membership in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Join,
    Invite,
    Knock,
    #[default]
    Leave,
    Ban,
}

/// Room type from the room's create event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// `m.space`
    Space,
    /// Any other custom type
    Other(String),
}

impl RoomType {
    pub const SPACE: &'static str = "m.space";

    pub fn from_str_opt(value: Option<&str>) -> Option<Self> {
        match value? {
            Self::SPACE => Some(RoomType::Space),
            other => Some(RoomType::Other(other.to_string())),
        }
    }
}

/// Snapshot of a room known to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub canonical_alias: Option<String>,
    pub membership: Membership,
    pub room_type: Option<RoomType>,
}

impl Room {
    /// A joined, untyped room with the given name
    pub fn new(room_id: impl Into<RoomId>, name: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            name: name.into(),
            canonical_alias: None,
            membership: Membership::Join,
            room_type: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.canonical_alias = Some(alias.into());
        self
    }

    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.membership = membership;
        self
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    pub fn is_space(&self) -> bool {
        self.room_type == Some(RoomType::Space)
    }

    pub fn is_joined(&self) -> bool {
        self.membership == Membership::Join
    }
}

/// A member of a room, as shown next to broadcasts and messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMember {
    pub user_id: UserId,
    /// Disambiguated display name
    pub name: String,
    pub avatar_url: Option<String>,
}

impl RoomMember {
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// A member known only by id; the name falls back to the id
    pub fn from_user_id(user_id: impl Into<UserId>) -> Self {
        let user_id = user_id.into();
        let name = user_id.to_string();
        Self {
            user_id,
            name,
            avatar_url: None,
        }
    }
}
