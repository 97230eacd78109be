//! Parley voice broadcasts
//!
//! Client-side state for voice broadcasts: the wire-level info events a
//! broadcaster sends, the UI-local playback state of listeners, the
//! recording state of the local broadcaster, and the stores that keep one
//! instance of each per broadcast.
//!
//! # Features
//!
//! - **Playback**: `play`/`pause`/`stop`/`toggle` with idempotent transitions
//! - **Reactive Updates**: follow state through `tokio::sync::watch`
//! - **Recording**: every lifecycle change is announced with a referencing info event
//! - **Stores**: explicit, cloneable registries with a "current" slot
//!
//! # Architecture
//!
//! ```text
//! RawEvent ──► BroadcastInfoEvent ──► BroadcastStores ──► Views
//!                                       │
//!                                       ├── VoiceBroadcastPlayback  (listeners)
//!                                       └── VoiceBroadcastRecording (broadcaster)
//!                                                 │
//!                                                 └──► StateEventSender
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use parley_broadcast::prelude::*;
//!
//! let stores = BroadcastStores::new(&BroadcastConfig::default());
//! let info = BroadcastInfoEvent::from_raw(&event)?;
//!
//! let playback = stores.playbacks.get_by_info_event(&info);
//! stores.playbacks.set_current(Arc::clone(&playback));
//! playback.toggle();
//!
//! let mut watcher = playback.watch();
//! while watcher.changed().await.is_ok() {
//!     println!("now {:?}", watcher.current());
//! }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod model;
pub mod playback;
pub mod recording;
pub mod start;
pub mod stores;

// Re-exports - Public API
pub use config::BroadcastConfig;
pub use display::{should_display_as_voice_broadcast_recording_tile, should_display_as_voice_broadcast_tile};
pub use error::{BroadcastError, Result};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use model::{
    BroadcastInfoEvent, RelatesTo, VoiceBroadcastChunk, VoiceBroadcastInfoEventContent,
    VoiceBroadcastInfoState, VoiceBroadcastPlaybackState, REFERENCE_REL_TYPE,
    VOICE_BROADCAST_CHUNK_EVENT_TYPE, VOICE_BROADCAST_INFO_EVENT_TYPE,
};
pub use playback::{PlaybackWatcher, VoiceBroadcastPlayback};
pub use recording::VoiceBroadcastRecording;
pub use start::start_new_voice_broadcast_recording;
pub use stores::{BroadcastStores, VoiceBroadcastPlaybacksStore, VoiceBroadcastRecordingsStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::BroadcastConfig;
    pub use crate::error::{BroadcastError, Result};
    pub use crate::model::{
        BroadcastInfoEvent, VoiceBroadcastChunk, VoiceBroadcastInfoState, VoiceBroadcastPlaybackState,
    };
    pub use crate::playback::{PlaybackWatcher, VoiceBroadcastPlayback};
    pub use crate::recording::VoiceBroadcastRecording;
    pub use crate::stores::BroadcastStores;
    pub use std::sync::Arc;
}
