//! Stores for live playbacks and recordings
//!
//! The stores are created explicitly (usually once per signed-in session),
//! handed to the components that need them, and cleared on sign-out. Clones
//! share state.
//!
//! ```text
//! BroadcastStores
//! ├── playbacks:  InstanceStore<EventId, VoiceBroadcastPlayback>
//! └── recordings: InstanceStore<EventId, VoiceBroadcastRecording>
//! ```

use std::sync::Arc;

use parley_model::{EventId, StateEventSender};
use parley_store::{ChangeIterator, InstanceStore};

use crate::config::BroadcastConfig;
use crate::model::BroadcastInfoEvent;
use crate::playback::VoiceBroadcastPlayback;
use crate::recording::VoiceBroadcastRecording;

/// Playbacks keyed by info event id, with the one the user interacts with as current
#[derive(Clone, Debug)]
pub struct VoiceBroadcastPlaybacksStore {
    inner: InstanceStore<EventId, VoiceBroadcastPlayback>,
    pause_others_on_play: bool,
}

impl VoiceBroadcastPlaybacksStore {
    pub fn new(config: &BroadcastConfig) -> Self {
        Self {
            inner: InstanceStore::new(),
            pause_others_on_play: config.pause_others_on_play,
        }
    }

    /// The playback for `info_event`, created on first access
    pub fn get_by_info_event(&self, info_event: &BroadcastInfoEvent) -> Arc<VoiceBroadcastPlayback> {
        self.inner.get_or_insert_with(info_event.event_id.clone(), || {
            tracing::debug!("Creating playback for voice broadcast {}", info_event.event_id);
            VoiceBroadcastPlayback::new(info_event.clone())
        })
    }

    pub fn get(&self, info_event_id: &EventId) -> Option<Arc<VoiceBroadcastPlayback>> {
        self.inner.get(info_event_id)
    }

    /// Make `playback` current
    ///
    /// A previously current playback that is still playing gets paused.
    /// Returns `false` if `playback` already was current.
    pub fn set_current(&self, playback: Arc<VoiceBroadcastPlayback>) -> bool {
        let previous = self.inner.current();
        let changed = self.inner.set_current(playback.id().clone(), Arc::clone(&playback));

        if changed && self.pause_others_on_play {
            if let Some(previous) = previous.filter(|p| !Arc::ptr_eq(p, &playback)) {
                if previous.pause() {
                    tracing::debug!("Paused playback {} in favour of {}", previous.id(), playback.id());
                }
            }
        }
        changed
    }

    pub fn current(&self) -> Option<Arc<VoiceBroadcastPlayback>> {
        self.inner.current()
    }

    pub fn clear_current(&self) -> Option<EventId> {
        self.inner.clear_current()
    }

    /// Stop and drop all playbacks
    pub fn clear(&self) {
        for playback in self.inner.instances() {
            playback.stop();
        }
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn subscribe(&self) -> ChangeIterator<EventId> {
        self.inner.subscribe()
    }
}

impl Default for VoiceBroadcastPlaybacksStore {
    fn default() -> Self {
        Self::new(&BroadcastConfig::default())
    }
}

/// Recordings keyed by info event id; at most one is current
#[derive(Clone, Debug, Default)]
pub struct VoiceBroadcastRecordingsStore {
    inner: InstanceStore<EventId, VoiceBroadcastRecording>,
}

impl VoiceBroadcastRecordingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recording for `info_event`, created on first access
    pub fn get_by_info_event(
        &self,
        info_event: &BroadcastInfoEvent,
        sender: Arc<dyn StateEventSender>,
    ) -> Arc<VoiceBroadcastRecording> {
        self.inner.get_or_insert_with(info_event.event_id.clone(), || {
            VoiceBroadcastRecording::new(info_event.clone(), sender)
        })
    }

    /// Make `recording` current; returns `false` if it already was
    pub fn set_current(&self, recording: Arc<VoiceBroadcastRecording>) -> bool {
        self.inner.set_current(recording.id().clone(), recording)
    }

    /// The current recording, if it hasn't stopped
    ///
    /// A stopped recording is released from the current slot here.
    pub fn current(&self) -> Option<Arc<VoiceBroadcastRecording>> {
        let current = self.inner.current()?;
        if current.is_stopped() {
            tracing::debug!("Releasing stopped recording {}", current.id());
            self.inner.clear_current();
            return None;
        }
        Some(current)
    }

    pub fn has_live_recording(&self) -> bool {
        self.current().is_some()
    }

    pub fn clear_current(&self) -> Option<EventId> {
        self.inner.clear_current()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn subscribe(&self) -> ChangeIterator<EventId> {
        self.inner.subscribe()
    }
}

/// All voice broadcast stores of one session
#[derive(Clone, Debug)]
pub struct BroadcastStores {
    pub playbacks: VoiceBroadcastPlaybacksStore,
    pub recordings: VoiceBroadcastRecordingsStore,
}

impl BroadcastStores {
    pub fn new(config: &BroadcastConfig) -> Self {
        Self {
            playbacks: VoiceBroadcastPlaybacksStore::new(config),
            recordings: VoiceBroadcastRecordingsStore::new(),
        }
    }

    /// Sign-out teardown
    pub fn clear(&self) {
        self.playbacks.clear();
        self.recordings.clear();
        tracing::debug!("Voice broadcast stores cleared");
    }
}

impl Default for BroadcastStores {
    fn default() -> Self {
        Self::new(&BroadcastConfig::default())
    }
}
