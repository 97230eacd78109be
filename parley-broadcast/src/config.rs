//! Configuration for voice broadcasts

use std::time::Duration;

use crate::error::{BroadcastError, Result};

/// Settings applied when starting and playing broadcasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastConfig {
    /// Target length of each recorded chunk
    /// Default: 120 seconds
    pub chunk_length: Duration,

    /// Pause the previously current playback when another one becomes current
    /// Default: true
    pub pause_others_on_play: bool,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            chunk_length: Duration::from_secs(120),
            pause_others_on_play: true,
        }
    }
}

impl BroadcastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short chunks, for flaky connections
    pub fn short_chunks() -> Self {
        Self {
            chunk_length: Duration::from_secs(30),
            ..Default::default()
        }
    }

    pub fn with_chunk_length(mut self, chunk_length: Duration) -> Self {
        self.chunk_length = chunk_length;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_length.as_secs() == 0 {
            return Err(BroadcastError::Configuration(
                "Chunk length must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
