//! Identity types for rooms, events, users and devices

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate common ID type implementations
macro_rules! impl_id_type {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Room identifier, e.g. `!abc:example.com`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl_id_type!(RoomId);

/// Event identifier, e.g. `$xyz`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl_id_type!(EventId);

/// User identifier, e.g. `@alice:example.com`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl_id_type!(UserId);

impl UserId {
    /// Localpart without the sigil and server name
    ///
    /// `@alice:example.com` → `alice`. Ids that don't follow the
    /// `@local:server` shape are returned whole.
    pub fn localpart(&self) -> &str {
        let without_sigil = self.0.strip_prefix('@').unwrap_or(&self.0);
        without_sigil.split(':').next().unwrap_or(without_sigil)
    }
}

/// Device identifier of a logged-in session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl_id_type!(DeviceId);
