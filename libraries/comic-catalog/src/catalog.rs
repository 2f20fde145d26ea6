//! Normalized collection catalog
//!
//! Turns the raw manifest into descriptors with fully derived page
//! references. A catalog is immutable once built; reloading produces a new
//! catalog that replaces the old one wholesale.

use crate::{
    error::{CatalogError, Result},
    types::{trim_extension, AssetPaths, ManifestEntry},
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Build the reference of a single page image.
///
/// The index is zero-padded to at least two digits:
/// `page_ref("/images", "demo", 3, "jpg") == "/images/demo/03.jpg"`.
pub fn page_ref(image_base: &str, collection_id: &str, index: usize, extension: &str) -> String {
    format!(
        "{}/{}/{:02}.{}",
        image_base.trim_end_matches('/'),
        collection_id,
        index,
        trim_extension(extension)
    )
}

/// Parsed manifest, entries kept in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, ManifestEntry)>,
}

impl Manifest {
    /// Parse manifest JSON.
    ///
    /// The top level must be an object keyed by collection id.
    pub fn parse(json: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (id, value) in raw {
            let entry = serde_json::from_value(value)
                .map_err(|source| CatalogError::InvalidEntry { id: id.clone(), source })?;
            entries.push((id, entry));
        }

        Ok(Self { entries })
    }

    /// Entries in manifest order
    pub fn entries(&self) -> &[(String, ManifestEntry)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A loaded collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDescriptor {
    id: String,
    display_name: String,
    pages: Vec<String>,
    captions: BTreeMap<usize, String>,
    music: Option<String>,
    creator: Option<String>,
}

impl CollectionDescriptor {
    fn from_entry(id: &str, entry: &ManifestEntry, paths: &AssetPaths) -> Self {
        let page_count = entry.pages as usize;
        let extension = entry
            .extension
            .as_deref()
            .filter(|ext| !trim_extension(ext).is_empty())
            .unwrap_or(paths.image_extension.as_str());

        let pages = (0..page_count)
            .map(|index| page_ref(&paths.image_base, id, index, extension))
            .collect();

        let mut captions = BTreeMap::new();
        for (key, text) in &entry.captions {
            match key.trim().parse::<usize>() {
                Ok(index) if index < page_count => {
                    captions.insert(index, text.clone());
                }
                Ok(index) => {
                    warn!(collection = %id, index, page_count, "Caption points past the last page, dropped");
                }
                Err(_) => {
                    warn!(collection = %id, key = %key, "Caption key is not a page index, dropped");
                }
            }
        }

        let display_name = entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(id)
            .to_string();

        Self {
            id: id.to_string(),
            display_name,
            pages,
            captions,
            music: non_blank(entry.music.as_deref()),
            creator: non_blank(entry.creator.as_deref()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// All page references in reading order
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page reference at `index`, if the collection has that page
    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    /// Caption written for `index`; `None` means the caller shows a fallback
    pub fn caption(&self, index: usize) -> Option<&str> {
        self.captions.get(&index).map(String::as_str)
    }

    pub fn captions(&self) -> &BTreeMap<usize, String> {
        &self.captions
    }

    /// Music track identifier
    pub fn music(&self) -> Option<&str> {
        self.music.as_deref()
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Every collection of a manifest, indexed by id.
///
/// An empty catalog is a valid value: it stands for "still loading" or
/// "nothing to show" and never for a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    collections: HashMap<String, CollectionDescriptor>,
    order: Vec<String>,
    paths: AssetPaths,
}

impl Catalog {
    /// Empty catalog that resolves assets with `paths`
    pub fn new(paths: AssetPaths) -> Self {
        Self {
            collections: HashMap::new(),
            order: Vec::new(),
            paths,
        }
    }

    /// Normalize a parsed manifest.
    pub fn from_manifest(manifest: &Manifest, paths: AssetPaths) -> Self {
        let mut catalog = Self::new(paths);

        for (id, entry) in manifest.entries() {
            let descriptor = CollectionDescriptor::from_entry(id, entry, &catalog.paths);
            debug!(
                collection = %id,
                pages = descriptor.page_count(),
                captions = descriptor.captions.len(),
                music = ?descriptor.music,
                "Normalized collection"
            );

            if catalog.collections.insert(id.clone(), descriptor).is_none() {
                catalog.order.push(id.clone());
            }
        }

        catalog
    }

    /// Parse and normalize manifest JSON in one step.
    pub fn from_json(json: &str, paths: AssetPaths) -> Result<Self> {
        let manifest = Manifest::parse(json)?;
        Ok(Self::from_manifest(&manifest, paths))
    }

    pub fn get(&self, id: &str) -> Option<&CollectionDescriptor> {
        self.collections.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.collections.contains_key(id)
    }

    /// Collection ids in manifest order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// The collection a fresh session starts on
    pub fn first_id(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// Descriptors in manifest order
    pub fn iter(&self) -> impl Iterator<Item = &CollectionDescriptor> {
        self.order.iter().filter_map(|id| self.collections.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// URL of a collection's music track
    pub fn music_url(&self, id: &str) -> Option<String> {
        self.get(id)?.music().map(|track| self.paths.music_url(track))
    }
}
