//! Manifest loading
//!
//! A failed load never takes the viewer down: [`load`] logs the cause and
//! hands back an empty catalog, which readers show as the loading state.

use crate::{catalog::Catalog, error::Result, source::ManifestSource, types::AssetPaths};
use tracing::{info, warn};

/// Fetch and normalize a manifest, reporting why it failed.
pub async fn try_load(source: &dyn ManifestSource, paths: AssetPaths) -> Result<Catalog> {
    let json = source.fetch().await?;
    let catalog = Catalog::from_json(&json, paths)?;

    info!(
        source = %source.describe(),
        collections = catalog.len(),
        "Loaded manifest"
    );

    Ok(catalog)
}

/// Fetch and normalize a manifest, degrading to an empty catalog on failure.
pub async fn load(source: &dyn ManifestSource, paths: AssetPaths) -> Catalog {
    match try_load(source, paths.clone()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(
                source = %source.describe(),
                error = %e,
                "Manifest unavailable, continuing with an empty catalog"
            );
            Catalog::new(paths)
        }
    }
}
