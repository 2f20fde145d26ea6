//! Error types for the viewer

use thiserror::Error;

/// Viewer errors
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors reported by a [`MusicPlayer`](crate::MusicPlayer)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlayerError {
    /// Runtime refused to start playback (autoplay restrictions, missing device)
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// No track is loaded
    #[error("No track loaded")]
    NoTrack,
}

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;
