//! Viewer events and session signals
//!
//! Two directions of traffic:
//! - [`ViewerEvent`]: session → presentation layer, queued on every transition
//! - [`SessionSignal`]: background tasks → session, delivered over a channel
//!   and fed back through `ViewerSession::handle_signal`

use crate::autoplay::AutoplayTick;
use crate::types::CurrentView;
use serde::{Deserialize, Serialize};

/// Events emitted by the session for UI synchronization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerEvent {
    /// The derived view changed; `None` is the loading/empty state
    ViewChanged {
        view: Option<CurrentView>,
    },

    /// A different collection is selected (or none, for an empty catalog)
    CollectionChanged {
        collection_id: Option<String>,
    },

    /// Autoplay turned on or off
    AutoplayChanged {
        enabled: bool,
    },

    /// Music playback actually started or stopped
    MusicChanged {
        playing: bool,
    },

    /// The player refused to start; the user may retry
    MusicFailed {
        message: String,
    },

    /// A freshly loaded catalog replaced the previous one
    CatalogReplaced {
        collections: usize,
    },
}

/// Completion of asynchronous work started by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    /// Autoplay timer fired
    Tick(AutoplayTick),

    /// A `play()` request resolved successfully
    PlaybackStarted {
        request: u64,
    },

    /// A `play()` request was rejected
    PlaybackFailed {
        request: u64,
        reason: String,
    },
}
