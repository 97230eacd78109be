//! Collaborator traits for the messaging SDK
//!
//! The client layer never talks to the network itself. Everything it needs
//! from the SDK goes through one of these traits:
//!
//! - `RoomDirectory`: rooms the client knows about, and DM mapping
//! - `StateEventSender`: sending state events (voice broadcast info)
//! - `Dispatcher`: cross-component commands such as "view this room"

use std::sync::mpsc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::SendError;
use crate::ids::{EventId, RoomId, UserId};
use crate::room::Room;

/// Read access to the client's room list
pub trait RoomDirectory: Send + Sync {
    /// Look up a room by id
    fn room(&self, room_id: &RoomId) -> Option<Room>;

    /// All rooms known to the client
    fn rooms(&self) -> Vec<Room>;

    /// The other user of a direct-message room, if it is one
    fn dm_user_for_room(&self, room_id: &RoomId) -> Option<UserId>;
}

/// Sends state events on behalf of the local user
pub trait StateEventSender: Send + Sync {
    fn send_state_event(
        &self,
        room_id: &RoomId,
        event_type: &str,
        state_key: &str,
        content: Value,
    ) -> Result<EventId, SendError>;
}

/// Commands dispatched between components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigate to a room
    ViewRoom { room_id: RoomId },
    /// Open the room settings on a given tab
    OpenRoomSettings { room_id: RoomId, tab: String },
}

/// Dispatches `Action`s to whoever handles navigation
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, action: Action);
}

/// Dispatcher that forwards actions into a channel
///
/// The receiving end is typically drained by the application's main loop.
pub struct ChannelDispatcher {
    tx: mpsc::Sender<Action>,
}

impl ChannelDispatcher {
    pub fn new() -> (Self, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, action: Action) {
        if self.tx.send(action).is_err() {
            tracing::debug!("Dispatch dropped: receiver closed");
        }
    }
}

/// In-memory room directory
///
/// Keeps rooms in insertion order. Useful as a cache fed from SDK sync
/// responses, and in tests.
#[derive(Default)]
pub struct MemoryDirectory {
    rooms: RwLock<Vec<Room>>,
    dms: RwLock<Vec<(RoomId, UserId)>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let directory = Self::new();
        for room in rooms {
            directory.upsert(room);
        }
        directory
    }

    /// Insert a room or replace the one with the same id
    pub fn upsert(&self, room: Room) {
        let mut rooms = self.rooms.write();
        match rooms.iter_mut().find(|r| r.room_id == room.room_id) {
            Some(existing) => *existing = room,
            None => rooms.push(room),
        }
    }

    pub fn remove(&self, room_id: &RoomId) -> Option<Room> {
        let mut rooms = self.rooms.write();
        let index = rooms.iter().position(|r| &r.room_id == room_id)?;
        Some(rooms.remove(index))
    }

    /// Mark a room as a DM with `user_id`
    pub fn set_dm(&self, room_id: impl Into<RoomId>, user_id: impl Into<UserId>) {
        let room_id = room_id.into();
        let mut dms = self.dms.write();
        dms.retain(|(id, _)| id != &room_id);
        dms.push((room_id, user_id.into()));
    }
}

impl RoomDirectory for MemoryDirectory {
    fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.rooms.read().iter().find(|r| &r.room_id == room_id).cloned()
    }

    fn rooms(&self) -> Vec<Room> {
        self.rooms.read().clone()
    }

    fn dm_user_for_room(&self, room_id: &RoomId) -> Option<UserId> {
        self.dms
            .read()
            .iter()
            .find(|(id, _)| id == room_id)
            .map(|(_, user)| user.clone())
    }
}
