//! Core types for the viewer session

use crate::error::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Accepted autoplay intervals in milliseconds
pub const AUTOPLAY_INTERVAL_RANGE_MS: RangeInclusive<u64> = 3000..=4000;

/// How manual next/previous behave at the first and last page.
///
/// The same policy applies to both directions. Autoplay ignores it and
/// always wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPolicy {
    /// Stop at the boundary pages
    #[default]
    Clamp,

    /// Continue from the other end
    Wrap,
}

/// Configuration for a viewer session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Delay between autoplay page turns, 3000 to 4000 (default: 4000)
    pub autoplay_interval_ms: u64,

    /// Policy for manual navigation (default: Clamp)
    pub navigation: NavigationPolicy,

    /// Caption shown for pages without one; `{page}` is the 1-based page
    /// number (default: "Page {page}")
    pub caption_fallback: String,

    /// Start music with autoplay and pause it when autoplay stops (default: false)
    pub music_follows_autoplay: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 4000,
            navigation: NavigationPolicy::Clamp,
            caption_fallback: "Page {page}".to_string(),
            music_follows_autoplay: false,
        }
    }
}

impl ViewerConfig {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Caption for a page that has none written
    pub fn fallback_caption(&self, index: usize) -> String {
        self.caption_fallback
            .replace("{page}", &(index + 1).to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if !AUTOPLAY_INTERVAL_RANGE_MS.contains(&self.autoplay_interval_ms) {
            return Err(ViewerError::InvalidConfig(format!(
                "autoplay_interval_ms must be between {} and {} (got {})",
                AUTOPLAY_INTERVAL_RANGE_MS.start(),
                AUTOPLAY_INTERVAL_RANGE_MS.end(),
                self.autoplay_interval_ms
            )));
        }

        if self.caption_fallback.trim().is_empty() {
            return Err(ViewerError::InvalidConfig(
                "caption_fallback cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Everything a presentation layer needs to draw the current page.
///
/// Recomputed from the session state and catalog after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentView {
    pub collection_id: String,

    /// Collection display name
    pub title: String,

    pub creator: Option<String>,

    /// Page image reference (`None` for a collection without pages)
    pub image: Option<String>,

    /// Written caption, or the configured fallback
    pub caption: String,

    /// 1-based page number (0 when the collection has no pages)
    pub page: usize,

    pub page_count: usize,

    pub autoplay: bool,

    pub music_on: bool,
}

impl CurrentView {
    /// `(page, page_count)`, e.g. `(2, 21)` for "page 2 of 21"
    pub fn page_counter(&self) -> (usize, usize) {
        (self.page, self.page_count)
    }
}
