//! Parley views
//!
//! Presentational widgets for the Parley client layer. Widgets are pure
//! functions of their inputs that render to an inspectable [`Node`] tree;
//! hosts map the tree onto their toolkit and tests query it by label or text.
//!
//! # Widgets
//!
//! - **Atoms**: [`PlaybackControlButton`], [`VoiceBroadcastHeader`], [`LiveBadge`]
//! - **Molecules**: [`VoiceBroadcastPlaybackBody`], [`VoiceBroadcastRecordingBody`]
//! - **Tiles**: [`VoiceBroadcastBody`] picks the right body for an info event
//! - **Settings**: the bridge settings tab in [`bridge`]
//! - **Dialogs**: [`SpotlightView`] over a `SpotlightDialog`
//!
//! All display text goes through a [`Translator`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use parley_views::prelude::*;
//!
//! let body = VoiceBroadcastPlaybackBody::new(playback, sender, "Town hall");
//! let tree = body.render(&Catalog::english());
//! tree.find_by_label("resume voice broadcast").map(|button| button.click());
//! ```

pub mod atoms;
pub mod body;
pub mod bridge;
pub mod i18n;
pub mod icon;
pub mod molecules;
pub mod node;
pub mod spotlight;

pub use atoms::{LiveBadge, PlaybackControlButton, VoiceBroadcastHeader};
pub use body::VoiceBroadcastBody;
pub use bridge::{bridge_card, bridge_settings_tab, bridge_state_events, BridgeContent, BridgeEndpoint, BRIDGE_EVENT_TYPES};
pub use i18n::{Catalog, Translator};
pub use icon::{icon, IconColour, IconType};
pub use molecules::{VoiceBroadcastPlaybackBody, VoiceBroadcastRecordingBody};
pub use node::{ClickHandler, Node};
pub use spotlight::{Key, SpotlightView};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::atoms::{PlaybackControlButton, VoiceBroadcastHeader};
    pub use crate::body::VoiceBroadcastBody;
    pub use crate::i18n::{Catalog, Translator};
    pub use crate::molecules::{VoiceBroadcastPlaybackBody, VoiceBroadcastRecordingBody};
    pub use crate::node::Node;
    pub use crate::spotlight::{Key, SpotlightView};
    pub use std::sync::Arc;
}
