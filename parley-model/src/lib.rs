//! Parley model types
//!
//! Identifiers and the thin slice of messaging-SDK data that the client layer
//! reads: rooms, members, raw events and space hierarchy pages, plus the
//! collaborator traits through which the SDK is reached.
//!
//! Nothing here talks to a network; the SDK implements the traits.

pub mod client;
pub mod error;
pub mod event;
pub mod hierarchy;
pub mod ids;
pub mod room;

pub use client::{Action, ChannelDispatcher, Dispatcher, MemoryDirectory, RoomDirectory, StateEventSender};
pub use error::{HierarchyError, SendError};
pub use event::RawEvent;
pub use hierarchy::{HierarchyPage, HierarchyRoom, HierarchySource};
pub use ids::{DeviceId, EventId, RoomId, UserId};
pub use room::{Membership, Room, RoomMember, RoomType};
