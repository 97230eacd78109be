//! Process-wide instance registries
//!
//! A small, dependency-free building block for stores that track live model
//! instances (voice broadcast playbacks, recordings, ...) and which of them is
//! "current".
//!
//! # Features
//!
//! - **Shared instances**: one `Arc<T>` per id, created lazily on first access
//! - **Current slot**: at most one instance is current at a time
//! - **Fan-out events**: every subscriber gets its own blocking iterator
//! - **Explicit teardown**: `clear()` drops everything, e.g. on sign-out
//!
//! Stores are plain values: create one at start-up and pass clones (which
//! share state) to the components that need it. Tests create a fresh store.
//!
//! # Architecture
//!
//! ```text
//! InstanceStore<Id, T>
//!     │
//!     ├── instances: HashMap<Id, Arc<T>>
//!     │
//!     ├── current: Option<Id>
//!     │
//!     └── subscribers: Vec<mpsc::Sender<ChangeEvent<Id>>>
//!             │
//!             └── ChangeIterator<Id>  (one per subscribe())
//! ```

// Modules
pub mod event;
pub mod iter;
pub mod store;

// Re-exports - Public API
pub use event::{ChangeEvent, ChangeKind};
pub use iter::{ChangeIterator, TimeoutIter, TryIter};
pub use store::InstanceStore;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::event::{ChangeEvent, ChangeKind};
    pub use crate::iter::ChangeIterator;
    pub use crate::store::InstanceStore;
}
