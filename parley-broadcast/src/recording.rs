//! Recording side of a voice broadcast
//!
//! A `VoiceBroadcastRecording` tracks the wire-level state of a broadcast the
//! local user is sending. Every effective transition is announced to the room
//! with a follow-up info event referencing the original one. The state only
//! changes once that event was handed to the SDK successfully.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use parley_model::{DeviceId, EventId, StateEventSender};

use crate::error::{BroadcastError, Result};
use crate::model::{
    BroadcastInfoEvent, VoiceBroadcastInfoEventContent, VoiceBroadcastInfoState,
    VOICE_BROADCAST_INFO_EVENT_TYPE,
};

pub struct VoiceBroadcastRecording {
    info_event: BroadcastInfoEvent,
    sender: Arc<dyn StateEventSender>,
    state: watch::Sender<VoiceBroadcastInfoState>,
    /// Serializes check-send-update sequences
    transition: Mutex<()>,
}

impl VoiceBroadcastRecording {
    /// Wrap the info event of a broadcast sent by the local user
    ///
    /// The initial state is the event's state, `Started` if absent.
    pub fn new(info_event: BroadcastInfoEvent, sender: Arc<dyn StateEventSender>) -> Self {
        let initial = info_event.state().unwrap_or(VoiceBroadcastInfoState::Started);
        let (state, _) = watch::channel(initial);
        Self {
            info_event,
            sender,
            state,
            transition: Mutex::new(()),
        }
    }

    pub fn info_event(&self) -> &BroadcastInfoEvent {
        &self.info_event
    }

    pub fn id(&self) -> &EventId {
        &self.info_event.event_id
    }

    pub fn state(&self) -> VoiceBroadcastInfoState {
        *self.state.borrow()
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == VoiceBroadcastInfoState::Stopped
    }

    /// Pause a started or running recording
    ///
    /// Returns whether the state changed.
    pub fn pause(&self) -> Result<bool> {
        match self.state() {
            VoiceBroadcastInfoState::Paused => Ok(false),
            VoiceBroadcastInfoState::Stopped => Err(BroadcastError::RecordingStopped),
            VoiceBroadcastInfoState::Started | VoiceBroadcastInfoState::Running => {
                self.transition(VoiceBroadcastInfoState::Paused)
            }
        }
    }

    /// Resume a paused recording
    pub fn resume(&self) -> Result<bool> {
        match self.state() {
            VoiceBroadcastInfoState::Started | VoiceBroadcastInfoState::Running => Ok(false),
            VoiceBroadcastInfoState::Stopped => Err(BroadcastError::RecordingStopped),
            VoiceBroadcastInfoState::Paused => self.transition(VoiceBroadcastInfoState::Running),
        }
    }

    /// Stop the recording; no-op when already stopped
    pub fn stop(&self) -> Result<bool> {
        self.transition(VoiceBroadcastInfoState::Stopped)
    }

    /// Resume when paused, pause otherwise
    pub fn toggle(&self) -> Result<VoiceBroadcastInfoState> {
        if self.state() == VoiceBroadcastInfoState::Paused {
            self.resume()?;
        } else {
            self.pause()?;
        }
        Ok(self.state())
    }

    /// Follow state changes
    pub fn watch(&self) -> watch::Receiver<VoiceBroadcastInfoState> {
        self.state.subscribe()
    }

    fn transition(&self, next: VoiceBroadcastInfoState) -> Result<bool> {
        let _guard = self.transition.lock();

        let current = self.state();
        if current == next {
            return Ok(false);
        }
        if current == VoiceBroadcastInfoState::Stopped {
            return Err(BroadcastError::RecordingStopped);
        }

        let device_id = self
            .info_event
            .content
            .device_id
            .clone()
            .unwrap_or_else(|| DeviceId::new(""));
        let content = VoiceBroadcastInfoEventContent::new(device_id, next)
            .referencing(self.info_event.event_id.clone())
            .to_value()?;

        self.sender.send_state_event(
            &self.info_event.room_id,
            VOICE_BROADCAST_INFO_EVENT_TYPE,
            self.info_event.sender.as_str(),
            content,
        )?;

        self.state.send_replace(next);
        tracing::info!(
            "Voice broadcast {} in {}: {} -> {}",
            self.info_event.event_id,
            self.info_event.room_id,
            current,
            next
        );
        Ok(true)
    }
}

impl std::fmt::Debug for VoiceBroadcastRecording {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceBroadcastRecording")
            .field("info_event", &self.info_event.event_id)
            .field("room_id", &self.info_event.room_id)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_model::{RoomId, SendError};
    use serde_json::{json, Value};

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<(RoomId, String, String, Value)>>,
        fail: Mutex<bool>,
    }

    impl StateEventSender for Outbox {
        fn send_state_event(
            &self,
            room_id: &RoomId,
            event_type: &str,
            state_key: &str,
            content: Value,
        ) -> std::result::Result<EventId, SendError> {
            if *self.fail.lock() {
                return Err(SendError::Network("offline".into()));
            }
            let mut sent = self.sent.lock();
            sent.push((room_id.clone(), event_type.to_string(), state_key.to_string(), content));
            Ok(EventId::new(format!("$sent{}", sent.len())))
        }
    }

    fn recording(outbox: &Arc<Outbox>) -> VoiceBroadcastRecording {
        let info = BroadcastInfoEvent::new(
            "$start",
            "!room:x",
            "@me:x",
            VoiceBroadcastInfoEventContent::new(DeviceId::new("DEV"), VoiceBroadcastInfoState::Started),
        );
        VoiceBroadcastRecording::new(info, Arc::clone(outbox) as Arc<dyn StateEventSender>)
    }

    #[test]
    fn test_initial_state_from_event() {
        let outbox = Arc::new(Outbox::default());
        assert_eq!(recording(&outbox).state(), VoiceBroadcastInfoState::Started);

        let no_state = BroadcastInfoEvent::new("$s", "!r:x", "@me:x", VoiceBroadcastInfoEventContent::default());
        let rec = VoiceBroadcastRecording::new(no_state, outbox);
        assert_eq!(rec.state(), VoiceBroadcastInfoState::Started);
    }

    #[test]
    fn test_pause_sends_reference_event() {
        let outbox = Arc::new(Outbox::default());
        let rec = recording(&outbox);

        assert!(rec.pause().unwrap());
        assert_eq!(rec.state(), VoiceBroadcastInfoState::Paused);

        let sent = outbox.sent.lock();
        assert_eq!(sent.len(), 1);
        let (room_id, event_type, state_key, content) = &sent[0];
        assert_eq!(room_id.as_str(), "!room:x");
        assert_eq!(event_type, VOICE_BROADCAST_INFO_EVENT_TYPE);
        assert_eq!(state_key, "@me:x");
        assert_eq!(
            content,
            &json!({
                "device_id": "DEV",
                "state": "paused",
                "m.relates_to": { "rel_type": "m.reference", "event_id": "$start" }
            })
        );
    }

    #[test]
    fn test_redundant_requests_send_nothing() {
        let outbox = Arc::new(Outbox::default());
        let rec = recording(&outbox);

        assert!(!rec.resume().unwrap());
        rec.pause().unwrap();
        assert!(!rec.pause().unwrap());
        assert_eq!(outbox.sent.lock().len(), 1);
    }

    #[test]
    fn test_toggle_cycles_pause_and_resume() {
        let outbox = Arc::new(Outbox::default());
        let rec = recording(&outbox);

        assert_eq!(rec.toggle().unwrap(), VoiceBroadcastInfoState::Paused);
        assert_eq!(rec.toggle().unwrap(), VoiceBroadcastInfoState::Running);
        assert_eq!(rec.toggle().unwrap(), VoiceBroadcastInfoState::Paused);
    }

    #[test]
    fn test_stopped_is_final() {
        let outbox = Arc::new(Outbox::default());
        let rec = recording(&outbox);

        assert!(rec.stop().unwrap());
        assert!(!rec.stop().unwrap());
        assert!(matches!(rec.pause(), Err(BroadcastError::RecordingStopped)));
        assert!(matches!(rec.resume(), Err(BroadcastError::RecordingStopped)));
        assert_eq!(outbox.sent.lock().len(), 1);
    }

    #[test]
    fn test_failed_send_keeps_state() {
        let outbox = Arc::new(Outbox::default());
        let rec = recording(&outbox);
        *outbox.fail.lock() = true;

        assert!(matches!(rec.stop(), Err(BroadcastError::Send(_))));
        assert_eq!(rec.state(), VoiceBroadcastInfoState::Started);
    }
}
