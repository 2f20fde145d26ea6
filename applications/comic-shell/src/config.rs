/// Shell configuration
use comic_catalog::AssetPaths;
use comic_viewer::ViewerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default = "default_manifest")]
    pub manifest: ManifestSettings,

    #[serde(default)]
    pub assets: AssetPaths,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default = "default_music")]
    pub music: MusicSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestSettings {
    /// File path or http(s) URL of the collection manifest
    #[serde(default = "default_location")]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MusicSettings {
    /// Simulated delay before the terminal player reports playback
    #[serde(default = "default_start_latency_ms")]
    pub start_latency_ms: u64,
}

impl MusicSettings {
    pub fn start_latency(&self) -> Duration {
        Duration::from_millis(self.start_latency_ms)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            assets: AssetPaths::default(),
            viewer: ViewerConfig::default(),
            music: default_music(),
        }
    }
}

impl ShellConfig {
    /// Load configuration from `comic-shell.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("comic-shell.toml"))
    }

    /// Load configuration from `path` (if it exists), then environment
    /// variables prefixed with `COMIC_` (nested keys joined by `__`, e.g.
    /// `COMIC_VIEWER__NAVIGATION=wrap`)
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("COMIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ShellError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ShellError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.manifest.location.trim().is_empty() {
            return Err(ShellError::Config(
                "Manifest location is required (set COMIC_MANIFEST__LOCATION)".to_string(),
            ));
        }

        self.viewer
            .validate()
            .map_err(|e| ShellError::Config(e.to_string()))
    }
}

// Default values
fn default_manifest() -> ManifestSettings {
    ManifestSettings {
        location: default_location(),
    }
}

fn default_location() -> String {
    "public/data/collections.json".to_string()
}

fn default_music() -> MusicSettings {
    MusicSettings {
        start_latency_ms: default_start_latency_ms(),
    }
}

fn default_start_latency_ms() -> u64 {
    150
}
