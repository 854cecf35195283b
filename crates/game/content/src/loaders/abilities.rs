//! Ability catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::records::AbilityCatalog;

/// Loader for ability catalogs from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability catalog.
    ///
    /// RON format: `(abilities: [ (id: "...", ...), ... ])`. Omitted fields
    /// take their zero value.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_records_parse() {
        let catalog = AbilityLoader::parse(
            r#"(abilities: [
                (id: "jab", name: "Jab", category: "BasicAttack", base_power: 8.0),
                (id: "flurry", category: "DamageSkill", is_multi_hit: true, hit_count: 3),
            ])"#,
        )
        .unwrap();
        assert_eq!(catalog.abilities.len(), 2);
        assert_eq!(catalog.abilities[1].hit_count, 3);
        assert_eq!(catalog.abilities[1].base_power, 0.0);
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let err = AbilityLoader::parse("(abilities: [ (id: 3) ])").unwrap_err();
        assert!(err.to_string().contains("ability catalog"));
    }
}
