//! Wire-level broadcast lifecycle state

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Lifecycle state carried by voice broadcast info events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceBroadcastInfoState {
    Started,
    Paused,
    Running,
    Stopped,
}

impl VoiceBroadcastInfoState {
    pub fn as_str(self) -> &'static str {
        match self {
            VoiceBroadcastInfoState::Started => "started",
            VoiceBroadcastInfoState::Paused => "paused",
            VoiceBroadcastInfoState::Running => "running",
            VoiceBroadcastInfoState::Stopped => "stopped",
        }
    }

    /// Parse a wire value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "started" => Some(VoiceBroadcastInfoState::Started),
            "paused" => Some(VoiceBroadcastInfoState::Paused),
            "running" => Some(VoiceBroadcastInfoState::Running),
            "stopped" => Some(VoiceBroadcastInfoState::Stopped),
            _ => None,
        }
    }

    /// Anything but stopped is still live
    pub fn is_live(self) -> bool {
        self != VoiceBroadcastInfoState::Stopped
    }
}

impl fmt::Display for VoiceBroadcastInfoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize an optional state, mapping unknown strings to `None`
pub(crate) fn lenient_state<'de, D>(deserializer: D) -> Result<Option<VoiceBroadcastInfoState>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(VoiceBroadcastInfoState::parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VoiceBroadcastInfoState::Started, "started")]
    #[case(VoiceBroadcastInfoState::Paused, "paused")]
    #[case(VoiceBroadcastInfoState::Running, "running")]
    #[case(VoiceBroadcastInfoState::Stopped, "stopped")]
    fn test_wire_names(#[case] state: VoiceBroadcastInfoState, #[case] wire: &str) {
        assert_eq!(state.as_str(), wire);
        assert_eq!(VoiceBroadcastInfoState::parse(wire), Some(state));
        assert_eq!(serde_json::to_string(&state).unwrap(), format!("\"{}\"", wire));
    }

    #[test]
    fn test_unknown_value() {
        assert_eq!(VoiceBroadcastInfoState::parse("STARTED"), None);
        assert_eq!(VoiceBroadcastInfoState::parse("resumed"), None);
    }

    #[test]
    fn test_is_live() {
        assert!(VoiceBroadcastInfoState::Paused.is_live());
        assert!(!VoiceBroadcastInfoState::Stopped.is_live());
    }
}
