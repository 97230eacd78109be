//! Error types for parley-broadcast

use parley_model::{RoomId, SendError};
use thiserror::Error;

/// Result type for parley-broadcast operations
pub type Result<T> = std::result::Result<T, BroadcastError>;

/// Errors that can occur while handling voice broadcasts
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// The event handed in is not a voice broadcast info event
    #[error("Not a voice broadcast info event: {0}")]
    NotAnInfoEvent(String),

    /// A live recording already exists
    #[error("A voice broadcast is already being recorded in {room_id}")]
    AlreadyRecording { room_id: RoomId },

    /// The recording was stopped and cannot change state any more
    #[error("Voice broadcast recording has already stopped")]
    RecordingStopped,

    /// Sending the info event failed
    #[error("Failed to send voice broadcast info: {0}")]
    Send(#[from] SendError),

    /// Event content could not be encoded
    #[error("Invalid event content: {0}")]
    Content(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}
