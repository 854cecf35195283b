//! Character catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::records::CharacterCatalog;

/// Loader for character catalogs from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character catalog.
    ///
    /// RON format: `(characters: [ (id: "...", basic_attack_id: "...", skill_ids: [...]), ... ])`.
    /// Ability ids are resolved later by the registry.
    pub fn load(path: &Path) -> LoadResult<CharacterCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))
    }
}
