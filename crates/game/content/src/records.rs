//! Raw content records as they appear in data files.
//!
//! Records keep every tag as text and every number as written. Conversion
//! into core definitions applies the load-time fixups (tag fallback, hit
//! count and crit multiplier floors, MP cost/restore exclusivity) in one
//! place.

use battle_core::{
    AbilityCategory, AbilityDefinition, BattleConfig, CritSpec, ItemDefinition, ItemKind,
    ManaEffect, SelfStatus, StatusRider, TargetPattern,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::registry::CharacterTemplate;
use crate::tags::{parse_status, parse_tag};

// ============================================================================
// Abilities
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub target: String,
    pub mp_cost_percent: f32,
    pub mp_restore_percent: f32,
    pub hp_cost_percent: f32,
    pub base_power: f32,
    pub element: String,
    pub status: String,
    pub status_chance: f32,
    pub duration: i32,
    pub status2: String,
    pub status_chance2: f32,
    pub duration2: i32,
    pub self_status: String,
    pub self_duration: i32,
    pub self_magnitude: f32,
    pub is_multi_hit: bool,
    pub hit_count: i32,
    pub can_crit: bool,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub is_cleanse: bool,
}

impl AbilityRecord {
    pub fn into_definition(self) -> AbilityDefinition {
        let mana = match (self.mp_cost_percent > 0.0, self.mp_restore_percent > 0.0) {
            (true, true) => {
                warn!(ability = %self.id, "both MP cost and MP restore set, keeping the cost");
                ManaEffect::Cost(self.mp_cost_percent)
            }
            (true, false) => ManaEffect::Cost(self.mp_cost_percent),
            (false, true) => ManaEffect::Restore(self.mp_restore_percent),
            (false, false) => ManaEffect::None,
        };

        let hit_count = if self.is_multi_hit {
            u32::try_from(self.hit_count).unwrap_or(0).max(1)
        } else {
            1
        };

        let crit = self.can_crit.then(|| CritSpec {
            chance: self.crit_chance,
            multiplier: if self.crit_multiplier > 0.0 {
                self.crit_multiplier
            } else {
                BattleConfig::DEFAULT_CRIT_MULTIPLIER
            },
        });

        let rider = |name: &str, chance: f32, duration: i32| {
            parse_status(name).map(|kind| StatusRider::new(kind, chance, duration))
        };

        AbilityDefinition {
            category: parse_tag::<AbilityCategory>(&self.category, "category"),
            target: parse_tag::<TargetPattern>(&self.target, "target"),
            element: parse_tag(&self.element, "element"),
            mana,
            hp_cost_percent: self.hp_cost_percent.max(0.0),
            base_power: self.base_power,
            primary_status: rider(&self.status, self.status_chance, self.duration),
            secondary_status: rider(&self.status2, self.status_chance2, self.duration2),
            self_status: parse_status(&self.self_status).map(|kind| SelfStatus {
                kind,
                duration: self.self_duration,
                magnitude: self.self_magnitude,
            }),
            hit_count,
            crit,
            cleanse: self.is_cleanse,
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityRecord>,
}

// ============================================================================
// Characters
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub element: String,
    pub max_health: f32,
    pub max_mp: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: i32,
    pub basic_attack_id: String,
    pub skill_ids: Vec<String>,
}

impl CharacterRecord {
    pub fn into_template(self) -> CharacterTemplate {
        let name = if self.name.is_empty() {
            self.id.clone()
        } else {
            self.name
        };
        CharacterTemplate {
            role: parse_tag(&self.role, "role"),
            element: parse_tag(&self.element, "element"),
            max_health: self.max_health,
            max_mana: self.max_mp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            basic_attack_id: Some(self.basic_attack_id).filter(|id| !id.is_empty()),
            skill_ids: self.skill_ids,
            id: self.id,
            name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterRecord>,
}

// ============================================================================
// Items
// ============================================================================

fn consumable_default() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: String,
    /// Empty targets the user's allies.
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub power: f32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub duration: i32,
    #[serde(default = "consumable_default")]
    pub consumable: bool,
}

impl ItemRecord {
    pub fn into_definition(self) -> ItemDefinition {
        let kind = parse_tag::<ItemKind>(&self.kind, "item kind");
        let mut item = ItemDefinition::new(self.id, self.name, kind).with_power(self.power);
        item.description = self.description;
        if !self.target.trim().is_empty() {
            item = item.with_target(parse_tag(&self.target, "target"));
        }
        if let Some(status) = parse_status(&self.status) {
            item = item.with_status(status, self.duration);
        }
        if !self.consumable {
            item = item.reusable();
        }
        item
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemRecord>,
}

// ============================================================================
// Encounters
// ============================================================================

/// A ready-made battle: character ids for each side plus starting items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterRecord {
    pub id: String,
    pub name: String,
    pub party: Vec<String>,
    pub enemies: Vec<String>,
    /// `(item id, quantity)` pairs placed in the party inventory.
    pub items: Vec<(String, u32)>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterCatalog {
    pub encounters: Vec<EncounterRecord>,
}
