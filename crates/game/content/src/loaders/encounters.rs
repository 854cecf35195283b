//! Encounter list loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::records::EncounterCatalog;

pub struct EncounterLoader;

impl EncounterLoader {
    /// Load encounters from RON: `(encounters: [ (id: "...", party: [...], enemies: [...]) ])`.
    pub fn load(path: &Path) -> LoadResult<EncounterCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))
    }
}
