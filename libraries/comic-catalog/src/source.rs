//! Manifest sources
//!
//! Abstracts where the manifest text comes from so the same loader works
//! against a static host, a local file, or text that is already in memory.

use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Something that can produce manifest JSON.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetch the raw manifest text
    async fn fetch(&self) -> Result<String>;

    /// Human-readable location, used in logs
    fn describe(&self) -> String;
}

/// Pick a source from a location string.
///
/// `http://` and `https://` locations are fetched over HTTP; anything else is
/// treated as a file path.
pub fn source_for(location: &str) -> Result<Box<dyn ManifestSource>> {
    let location = location.trim();
    if location.is_empty() {
        return Err(CatalogError::InvalidUrl(
            "Manifest location cannot be empty".into(),
        ));
    }

    if location.contains("://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Manifest served by a static host.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
    url: Url,
}

impl HttpSource {
    /// Create a source for `url`. Only `http` and `https` are accepted.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ComicViewer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }
}

#[async_trait]
impl ManifestSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        debug!(url = %self.url, "Fetching manifest");

        let response = self.http.get(self.url.clone()).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogError::Unreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Manifest stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ManifestSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        debug!(path = %self.path.display(), "Reading manifest");
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Manifest text that is already in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    json: String,
}

impl InlineSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl ManifestSource for InlineSource {
    async fn fetch(&self) -> Result<String> {
        Ok(self.json.clone())
    }

    fn describe(&self) -> String {
        "<inline>".to_string()
    }
}
