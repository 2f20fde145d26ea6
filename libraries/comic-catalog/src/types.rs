//! Manifest and asset path types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the static host serves images and audio from.
///
/// Every page reference and music URL in a [`Catalog`](crate::Catalog) is
/// derived from these prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Prefix for page images (default: "/images")
    pub image_base: String,

    /// Prefix for music tracks (default: "/audio")
    pub audio_base: String,

    /// Image extension used when a collection does not name one (default: "jpg")
    pub image_extension: String,

    /// Extension of every music track (default: "mp3")
    pub audio_extension: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            image_base: "/images".to_string(),
            audio_base: "/audio".to_string(),
            image_extension: "jpg".to_string(),
            audio_extension: "mp3".to_string(),
        }
    }
}

impl AssetPaths {
    /// Resolve a music track identifier to the URL the static host serves it at.
    pub fn music_url(&self, track: &str) -> String {
        format!(
            "{}/{}.{}",
            self.audio_base.trim_end_matches('/'),
            track,
            trim_extension(&self.audio_extension)
        )
    }
}

/// One collection as written in the manifest.
///
/// ```json
/// { "name": "Chapter One", "pages": 21, "captions": { "0": "Cover" }, "music": "theme" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Display name (falls back to the collection id when missing or blank)
    #[serde(default)]
    pub name: Option<String>,

    /// Number of page images
    pub pages: u32,

    /// Captions keyed by the page index written as a string
    #[serde(default)]
    pub captions: BTreeMap<String, String>,

    /// Music track identifier
    #[serde(default)]
    pub music: Option<String>,

    /// Credit line shown with the collection
    #[serde(default)]
    pub creator: Option<String>,

    /// Image extension for this collection only
    #[serde(default)]
    pub extension: Option<String>,
}

pub(crate) fn trim_extension(ext: &str) -> &str {
    ext.trim_start_matches('.')
}
