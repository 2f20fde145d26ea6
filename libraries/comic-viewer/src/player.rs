//! Music playback capability
//!
//! The session never owns an audio device. It drives whatever implements
//! [`MusicPlayer`]: a browser audio element bridge, a desktop output, or a
//! test double.

use crate::error::PlayerError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// A looping background-music player.
///
/// Methods take `&self` because a pending `play()` runs on its own task while
/// the session keeps calling `pause()`/`is_playing()`. Implementors use
/// interior mutability.
#[async_trait]
pub trait MusicPlayer: Send + Sync {
    /// Point the player at a track URL (`None` = silence).
    ///
    /// Anything playing stops before the new track becomes available.
    fn load(&self, track: Option<&str>);

    /// Start playback.
    ///
    /// Resolves once audio is actually playing, which may take a while.
    async fn play(&self) -> Result<(), PlayerError>;

    /// Stop playback immediately
    fn pause(&self);

    /// Whether audio is playing right now
    fn is_playing(&self) -> bool;
}

/// Player for sessions without audio output.
///
/// Tracks play/pause state but produces no sound.
#[derive(Debug, Default)]
pub struct SilentPlayer {
    loaded: AtomicBool,
    playing: AtomicBool,
}

impl SilentPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MusicPlayer for SilentPlayer {
    fn load(&self, track: Option<&str>) {
        self.playing.store(false, Ordering::SeqCst);
        self.loaded.store(track.is_some(), Ordering::SeqCst);
    }

    async fn play(&self) -> Result<(), PlayerError> {
        if !self.loaded.load(Ordering::SeqCst) {
            return Err(PlayerError::NoTrack);
        }
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}
