//! Scenario system for battle setup.
//!
//! A scenario names the characters on each side and the items the party
//! carries. Building it resolves every id against the content registry and
//! spawns combatants in order: party first, then enemies.

use std::sync::Arc;

use battle_content::{ContentRegistry, EncounterRecord};
use battle_core::{BattleConfig, PartyInventory, Roster, Side};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

/// Battle setup by content id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub party: Vec<String>,
    pub enemies: Vec<String>,
    /// `(item id, quantity)` stocked in the party inventory.
    pub items: Vec<(String, u32)>,
}

impl Scenario {
    /// Creates a new scenario without items.
    pub fn new(party: Vec<String>, enemies: Vec<String>) -> Self {
        Self {
            name: String::new(),
            party,
            enemies,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_item(mut self, item_id: impl Into<String>, quantity: u32) -> Self {
        self.items.push((item_id.into(), quantity));
        self
    }

    /// Scenario of a registered encounter.
    pub fn from_encounter(registry: &ContentRegistry, encounter_id: &str) -> Result<Self> {
        let encounter = registry
            .encounter(encounter_id)
            .ok_or_else(|| RuntimeError::UnknownEncounter(encounter_id.to_owned()))?;
        Ok(Self::from(encounter))
    }

    /// Spawns both sides and stocks the inventory.
    pub fn build(
        &self,
        registry: &ContentRegistry,
        config: &BattleConfig,
    ) -> Result<(Roster, PartyInventory)> {
        tracing::info!(
            "Building scenario '{}' with {} party members and {} enemies",
            self.name,
            self.party.len(),
            self.enemies.len()
        );

        let mut roster = Roster::new();
        let sides = [(Side::Party, &self.party), (Side::Enemy, &self.enemies)];
        for (side, ids) in sides {
            for id in ids {
                let profile = registry
                    .profile(id)
                    .ok_or_else(|| RuntimeError::UnknownCharacter(id.clone()))?;
                let spawned = roster.spawn(side, profile, config)?;
                tracing::debug!("Spawned '{}' as {} on {:?}", id, spawned, side);
            }
        }

        let mut inventory = PartyInventory::default();
        for (item_id, quantity) in &self.items {
            let item = registry
                .item(item_id)
                .ok_or_else(|| RuntimeError::UnknownItem(item_id.clone()))?;
            inventory.add_item(Arc::clone(item), *quantity)?;
        }

        Ok((roster, inventory))
    }
}

impl From<&EncounterRecord> for Scenario {
    fn from(encounter: &EncounterRecord) -> Self {
        Self {
            name: encounter.name.clone(),
            party: encounter.party.clone(),
            enemies: encounter.enemies.clone(),
            items: encounter.items.clone(),
        }
    }
}
