//! Change events for instance registries
//!
//! Every mutation of an `InstanceStore` that is visible to callers produces a
//! `ChangeEvent`. Events carry identifiers only; look the instance up in the
//! store after receiving one.

use std::time::Instant;

/// What happened in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind<Id> {
    /// A new instance was registered under this id
    Added(Id),
    /// The instance registered under this id was removed
    Removed(Id),
    /// The current slot now points at this id (or is empty)
    CurrentChanged(Option<Id>),
    /// All instances were dropped (sign-out teardown)
    Cleared,
}

/// A change event emitted by an `InstanceStore`
///
/// # Example
///
/// ```rust,ignore
/// for event in store.subscribe() {
///     if let ChangeKind::CurrentChanged(Some(id)) = &event.kind {
///         println!("now current: {:?}", id);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ChangeEvent<Id> {
    /// Kind of change, including the affected id
    pub kind: ChangeKind<Id>,

    /// When the change was made
    pub timestamp: Instant,
}

impl<Id> ChangeEvent<Id> {
    pub fn new(kind: ChangeKind<Id>) -> Self {
        Self {
            kind,
            timestamp: Instant::now(),
        }
    }

    /// The id this event concerns, if any
    pub fn entity_id(&self) -> Option<&Id> {
        match &self.kind {
            ChangeKind::Added(id) | ChangeKind::Removed(id) => Some(id),
            ChangeKind::CurrentChanged(id) => id.as_ref(),
            ChangeKind::Cleared => None,
        }
    }

    /// True for events that change which instance is current
    pub fn is_current_change(&self) -> bool {
        matches!(self.kind, ChangeKind::CurrentChanged(_))
    }
}

impl<Id: PartialEq> PartialEq for ChangeEvent<Id> {
    fn eq(&self, other: &Self) -> bool {
        // Timestamp not included in equality
        self.kind == other.kind
    }
}
