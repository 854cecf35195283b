//! Item catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::records::ItemCatalog;

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog.
    ///
    /// RON format: `(items: [ (id: "...", kind: "Healing", power: 30.0), ... ])`.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))
    }
}
