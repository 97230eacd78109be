//! Playback of a voice broadcast
//!
//! `VoiceBroadcastPlayback` owns the UI-local playback state of one
//! broadcast. Views read the state and call `play`/`pause`/`stop`/`toggle`;
//! they never set it directly. Observers follow changes through a
//! `PlaybackWatcher`, backed by `tokio::sync::watch`.
//!
//! Audio fetching and decoding happen elsewhere; the playback only keeps
//! chunk ordering so a player can pull them in sequence.

use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;

use parley_model::EventId;

use crate::model::{BroadcastInfoEvent, VoiceBroadcastChunk, VoiceBroadcastPlaybackState};

/// Playback model for one broadcast info event
#[derive(Debug)]
pub struct VoiceBroadcastPlayback {
    info_event: BroadcastInfoEvent,
    state: watch::Sender<VoiceBroadcastPlaybackState>,
    /// Sorted by sequence, no duplicate sequences
    chunks: RwLock<Vec<VoiceBroadcastChunk>>,
}

impl VoiceBroadcastPlayback {
    /// New playback in the `Stopped` state
    pub fn new(info_event: BroadcastInfoEvent) -> Self {
        let (state, _) = watch::channel(VoiceBroadcastPlaybackState::default());
        Self {
            info_event,
            state,
            chunks: RwLock::new(Vec::new()),
        }
    }

    pub fn info_event(&self) -> &BroadcastInfoEvent {
        &self.info_event
    }

    /// Id of the info event this playback belongs to
    pub fn id(&self) -> &EventId {
        &self.info_event.event_id
    }

    /// Current playback state
    pub fn state(&self) -> VoiceBroadcastPlaybackState {
        *self.state.borrow()
    }

    /// Start or resume playback; no-op when already playing
    ///
    /// Returns whether the state changed.
    pub fn play(&self) -> bool {
        self.set_state(VoiceBroadcastPlaybackState::Playing)
    }

    /// Pause playback; no-op when already paused
    pub fn pause(&self) -> bool {
        self.set_state(VoiceBroadcastPlaybackState::Paused)
    }

    /// Stop playback; no-op when already stopped
    pub fn stop(&self) -> bool {
        self.set_state(VoiceBroadcastPlaybackState::Stopped)
    }

    /// Pause when playing, play otherwise
    ///
    /// Returns the resulting state.
    pub fn toggle(&self) -> VoiceBroadcastPlaybackState {
        match self.state() {
            VoiceBroadcastPlaybackState::Playing => self.pause(),
            VoiceBroadcastPlaybackState::Paused | VoiceBroadcastPlaybackState::Stopped => self.play(),
        };
        self.state()
    }

    /// Follow state changes
    pub fn watch(&self) -> PlaybackWatcher {
        PlaybackWatcher {
            receiver: self.state.subscribe(),
            info_event_id: self.info_event.event_id.clone(),
        }
    }

    /// Whether the broadcast itself is still being recorded
    pub fn is_live(&self) -> bool {
        self.info_event
            .state()
            .map(|s| s.is_live())
            .unwrap_or(false)
    }

    /// Register a chunk of this broadcast
    ///
    /// Chunks are kept ordered by sequence; a second chunk with a sequence
    /// already present is ignored. Returns whether the chunk was added.
    pub fn add_chunk(&self, chunk: VoiceBroadcastChunk) -> bool {
        let mut chunks = self.chunks.write();
        match chunks.binary_search_by_key(&chunk.sequence, |c| c.sequence) {
            Ok(_) => {
                tracing::debug!(
                    "Ignoring duplicate chunk {} for broadcast {}",
                    chunk.sequence,
                    self.info_event.event_id
                );
                false
            }
            Err(index) => {
                chunks.insert(index, chunk);
                true
            }
        }
    }

    /// Known chunks in sequence order
    pub fn chunks(&self) -> Vec<VoiceBroadcastChunk> {
        self.chunks.read().clone()
    }

    /// Total duration of the known chunks
    pub fn duration(&self) -> Duration {
        self.chunks.read().iter().map(|c| c.duration).sum()
    }

    fn set_state(&self, next: VoiceBroadcastPlaybackState) -> bool {
        let mut previous = next;
        let changed = self.state.send_if_modified(|state| {
            if *state == next {
                return false;
            }
            previous = *state;
            *state = next;
            true
        });

        if changed {
            tracing::debug!(
                "Voice broadcast playback {} {:?} -> {:?}",
                self.info_event.event_id,
                previous,
                next
            );
        }
        changed
    }
}

/// Receives playback state changes
pub struct PlaybackWatcher {
    receiver: watch::Receiver<VoiceBroadcastPlaybackState>,
    info_event_id: EventId,
}

impl PlaybackWatcher {
    /// Wait for the next state change
    ///
    /// Errors once the playback has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.receiver.changed().await
    }

    /// State as of now
    pub fn current(&self) -> VoiceBroadcastPlaybackState {
        *self.receiver.borrow()
    }

    /// Whether a change happened since the last `current_and_mark_seen`
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Read the state and mark it seen
    pub fn current_and_mark_seen(&mut self) -> VoiceBroadcastPlaybackState {
        *self.receiver.borrow_and_update()
    }

    pub fn info_event_id(&self) -> &EventId {
        &self.info_event_id
    }
}
