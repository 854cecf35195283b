//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys left out keep their [`BattleConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Element;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            defend_multiplier = 0.25
            trap_element = "Water"
            "#,
        )
        .unwrap();
        assert_eq!(config.defend_multiplier, 0.25);
        assert_eq!(config.trap_element, Element::Water);
        assert_eq!(config.tick_threshold, BattleConfig::default().tick_threshold);
    }

    #[test]
    fn unknown_value_types_fail() {
        assert!(ConfigLoader::parse("tick_threshold = \"fast\"").is_err());
    }
}
