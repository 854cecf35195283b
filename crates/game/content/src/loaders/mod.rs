//! Content loaders for reading battle data from files.
//!
//! Catalogs are RON, configuration is TOML. Every loader reads one file and
//! returns raw records or a ready value; [`ContentFactory`] ties them to a
//! data directory layout.

pub mod abilities;
pub mod characters;
pub mod config;
pub mod encounters;
pub mod factory;
pub mod item;

pub use abilities::AbilityLoader;
pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use encounters::EncounterLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
