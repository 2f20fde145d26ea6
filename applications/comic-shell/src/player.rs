/// Terminal music player
use async_trait::async_trait;
use comic_viewer::{MusicPlayer, PlayerError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Reports what a real player would do instead of producing sound.
///
/// `play()` waits for `start_latency` before it resolves, like an audio
/// element buffering its source.
pub struct LoggingPlayer {
    track: Mutex<Option<String>>,
    playing: AtomicBool,
    start_latency: Duration,
}

impl LoggingPlayer {
    pub fn new(start_latency: Duration) -> Self {
        Self {
            track: Mutex::new(None),
            playing: AtomicBool::new(false),
            start_latency,
        }
    }

    fn current_track(&self) -> Option<String> {
        self.track.lock().map(|t| t.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl MusicPlayer for LoggingPlayer {
    fn load(&self, track: Option<&str>) {
        self.playing.store(false, Ordering::SeqCst);
        if let Ok(mut current) = self.track.lock() {
            *current = track.map(str::to_string);
        }
        info!(track = ?track, "Music track loaded");
    }

    async fn play(&self) -> Result<(), PlayerError> {
        let Some(track) = self.current_track() else {
            return Err(PlayerError::NoTrack);
        };

        tokio::time::sleep(self.start_latency).await;
        self.playing.store(true, Ordering::SeqCst);
        info!(track = %track, "Music playing (looped)");
        Ok(())
    }

    fn pause(&self) {
        if self.playing.swap(false, Ordering::SeqCst) {
            info!("Music paused");
        }
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}
