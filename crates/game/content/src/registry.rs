//! Id-keyed lookup of loaded content.

use std::collections::BTreeMap;
use std::sync::Arc;

use battle_core::{AbilityDefinition, CombatantProfile, Element, ItemDefinition, Role};
use tracing::{debug, warn};

use crate::records::{
    AbilityCatalog, CharacterCatalog, EncounterCatalog, EncounterRecord, ItemCatalog,
};

/// A character as configured, with ability references still unresolved.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterTemplate {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub element: Element,
    pub max_health: f32,
    pub max_mana: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: i32,
    pub basic_attack_id: Option<String>,
    pub skill_ids: Vec<String>,
}

/// Every ability, character, item and encounter known to a session.
///
/// Definitions are stored behind [`Arc`] and handed out shared, so spawning
/// many combatants from one template never copies ability data.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    abilities: BTreeMap<String, Arc<AbilityDefinition>>,
    characters: BTreeMap<String, CharacterTemplate>,
    items: BTreeMap<String, Arc<ItemDefinition>>,
    encounters: BTreeMap<String, EncounterRecord>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts raw catalogs into a registry.
    pub fn from_catalogs(
        abilities: AbilityCatalog,
        characters: CharacterCatalog,
        items: ItemCatalog,
        encounters: EncounterCatalog,
    ) -> Self {
        let mut registry = Self::new();
        for record in abilities.abilities {
            registry.insert_ability(record.into_definition());
        }
        for record in characters.characters {
            registry.insert_character(record.into_template());
        }
        for record in items.items {
            registry.insert_item(record.into_definition());
        }
        for record in encounters.encounters {
            registry.insert_encounter(record);
        }
        debug!(
            abilities = registry.abilities.len(),
            characters = registry.characters.len(),
            items = registry.items.len(),
            encounters = registry.encounters.len(),
            "content registry built"
        );
        registry
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn insert_ability(&mut self, ability: AbilityDefinition) {
        if ability.id.is_empty() {
            warn!(name = %ability.name, "ability without id skipped");
            return;
        }
        if self.abilities.contains_key(&ability.id) {
            warn!(id = %ability.id, "duplicate ability id, later record wins");
        }
        self.abilities.insert(ability.id.clone(), Arc::new(ability));
    }

    pub fn insert_character(&mut self, character: CharacterTemplate) {
        if character.id.is_empty() {
            warn!(name = %character.name, "character without id skipped");
            return;
        }
        if self.characters.contains_key(&character.id) {
            warn!(id = %character.id, "duplicate character id, later record wins");
        }
        self.characters.insert(character.id.clone(), character);
    }

    pub fn insert_item(&mut self, item: ItemDefinition) {
        if item.id.is_empty() {
            warn!(name = %item.name, "item without id skipped");
            return;
        }
        if self.items.contains_key(&item.id) {
            warn!(id = %item.id, "duplicate item id, later record wins");
        }
        self.items.insert(item.id.clone(), Arc::new(item));
    }

    pub fn insert_encounter(&mut self, encounter: EncounterRecord) {
        if encounter.id.is_empty() {
            warn!(name = %encounter.name, "encounter without id skipped");
            return;
        }
        self.encounters.insert(encounter.id.clone(), encounter);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn ability(&self, id: &str) -> Option<&Arc<AbilityDefinition>> {
        self.abilities.get(id)
    }

    pub fn character(&self, id: &str) -> Option<&CharacterTemplate> {
        self.characters.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Arc<ItemDefinition>> {
        self.items.get(id)
    }

    pub fn encounter(&self, id: &str) -> Option<&EncounterRecord> {
        self.encounters.get(id)
    }

    pub fn character_ids(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }

    pub fn encounter_ids(&self) -> impl Iterator<Item = &str> {
        self.encounters.keys().map(String::as_str)
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Skills of a character in configured order. Unknown ids are skipped.
    /// An unknown character has no skills.
    pub fn abilities_for(&self, character_id: &str) -> Vec<Arc<AbilityDefinition>> {
        let Some(character) = self.character(character_id) else {
            return Vec::new();
        };
        character
            .skill_ids
            .iter()
            .filter_map(|skill_id| {
                let ability = self.ability(skill_id);
                if ability.is_none() {
                    warn!(character = character_id, skill = %skill_id, "unknown skill id skipped");
                }
                ability.cloned()
            })
            .collect()
    }

    /// Spawn profile of a character with its abilities resolved.
    pub fn profile(&self, character_id: &str) -> Option<CombatantProfile> {
        let character = self.character(character_id)?;

        let mut profile = CombatantProfile::new(
            character.name.clone(),
            character.max_health,
            character.max_mana,
            character.attack,
            character.defense,
            character.speed,
        )
        .with_role(character.role)
        .with_element(character.element);

        if let Some(basic_id) = &character.basic_attack_id {
            match self.ability(basic_id) {
                Some(ability) => profile = profile.with_basic_attack(Arc::clone(ability)),
                None => {
                    warn!(character = character_id, ability = %basic_id, "unknown basic attack id")
                }
            }
        }
        profile.skills = self.abilities_for(character_id);
        Some(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AbilityRecord, CharacterRecord};

    fn registry() -> ContentRegistry {
        let abilities = AbilityCatalog {
            abilities: vec![
                AbilityRecord {
                    id: "slash".into(),
                    name: "Slash".into(),
                    category: "BasicAttack".into(),
                    base_power: 10.0,
                    mp_restore_percent: 20.0,
                    ..AbilityRecord::default()
                },
                AbilityRecord {
                    id: "mend".into(),
                    name: "Mend".into(),
                    category: "HealSkill".into(),
                    target: "SingleAlly".into(),
                    base_power: 25.0,
                    mp_cost_percent: 30.0,
                    ..AbilityRecord::default()
                },
            ],
        };
        let characters = CharacterCatalog {
            characters: vec![CharacterRecord {
                id: "miri".into(),
                name: "Miri".into(),
                role: "Support".into(),
                element: "Wind".into(),
                max_health: 80.0,
                max_mp: 30.0,
                attack: 22.0,
                defense: 8.0,
                speed: 15,
                basic_attack_id: "slash".into(),
                skill_ids: vec!["mend".into(), "missing".into()],
            }],
        };
        ContentRegistry::from_catalogs(
            abilities,
            characters,
            ItemCatalog::default(),
            EncounterCatalog::default(),
        )
    }

    #[test]
    fn lookups_by_id() {
        let registry = registry();
        assert_eq!(registry.ability("mend").unwrap().name, "Mend");
        assert!(registry.ability("missing").is_none());
        assert_eq!(registry.character("miri").unwrap().role, Role::Support);
        assert!(registry.character("alder").is_none());
    }

    #[test]
    fn unknown_skill_ids_are_skipped() {
        let registry = registry();
        let skills = registry.abilities_for("miri");
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].id, "mend");
        assert!(registry.abilities_for("nobody").is_empty());
    }

    #[test]
    fn profile_shares_ability_definitions() {
        let registry = registry();
        let profile = registry.profile("miri").unwrap();
        assert_eq!(profile.name, "Miri");
        assert_eq!(profile.element, Element::Wind);
        assert_eq!(profile.speed, 15);

        let basic = profile.basic_attack.unwrap();
        assert!(Arc::ptr_eq(&basic, registry.ability("slash").unwrap()));
    }
}
