//! Content factory for building a registry from a data directory.

use std::path::{Path, PathBuf};

use battle_core::BattleConfig;
use tracing::info;

use crate::loaders::{
    AbilityLoader, CharacterLoader, ConfigLoader, EncounterLoader, ItemLoader, LoadResult,
};
use crate::records::{EncounterCatalog, ItemCatalog};
use crate::registry::ContentRegistry;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── abilities.ron
/// ├── characters.ron
/// ├── items.ron        (optional)
/// └── encounters.ron   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load battle configuration from `config.toml`, or defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every catalog and build the registry.
    pub fn load_registry(&self) -> LoadResult<ContentRegistry> {
        let abilities = AbilityLoader::load(&self.data_dir.join("abilities.ron"))?;
        let characters = CharacterLoader::load(&self.data_dir.join("characters.ron"))?;

        let items_path = self.data_dir.join("items.ron");
        let items = if items_path.exists() {
            ItemLoader::load(&items_path)?
        } else {
            ItemCatalog::default()
        };

        let encounters_path = self.data_dir.join("encounters.ron");
        let encounters = if encounters_path.exists() {
            EncounterLoader::load(&encounters_path)?
        } else {
            EncounterCatalog::default()
        };

        let registry = ContentRegistry::from_catalogs(abilities, characters, items, encounters);
        info!(
            dir = %self.data_dir.display(),
            abilities = registry.ability_count(),
            characters = registry.character_count(),
            items = registry.item_count(),
            "content loaded"
        );
        Ok(registry)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
