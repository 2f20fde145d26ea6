//! Comic Viewer - Collection Catalog
//!
//! Loads the collection manifest and normalizes it into an immutable,
//! in-memory catalog.
//!
//! This crate provides:
//! - Manifest parsing with manifest order preserved
//! - Deterministic page references (`/images/<id>/<NN>.jpg`)
//! - Sparse per-page captions and optional music tracks
//! - Manifest sources for HTTP hosts, local files and inline text
//! - Non-fatal loading: a missing manifest yields an empty catalog
//!
//! # Example
//!
//! ```rust
//! use comic_catalog::{AssetPaths, Catalog};
//!
//! let json = r#"{ "demo": { "name": "Demo", "pages": 3, "captions": { "1": "middle" } } }"#;
//! let catalog = Catalog::from_json(json, AssetPaths::default()).unwrap();
//!
//! let demo = catalog.get("demo").unwrap();
//! assert_eq!(demo.page(2), Some("/images/demo/02.jpg"));
//! assert_eq!(demo.caption(1), Some("middle"));
//! ```
//!
//! # Example: Loading from a host
//!
//! ```rust,no_run
//! use comic_catalog::{load, source_for, AssetPaths};
//!
//! # async fn run() -> comic_catalog::Result<()> {
//! let source = source_for("https://comics.example.com/data/collections.json")?;
//! let catalog = load(source.as_ref(), AssetPaths::default()).await;
//! if catalog.is_empty() {
//!     println!("Loading...");
//! }
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod loader;
mod source;
pub mod types;

// Public exports
pub use catalog::{page_ref, Catalog, CollectionDescriptor, Manifest};
pub use error::{CatalogError, Result};
pub use loader::{load, try_load};
pub use source::{source_for, FileSource, HttpSource, InlineSource, ManifestSource};
pub use types::{AssetPaths, ManifestEntry};
