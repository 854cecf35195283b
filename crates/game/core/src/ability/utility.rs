//! Extension point for utility abilities.
//!
//! `UtilitySkill` has no built-in resolution. Ability-specific logic is
//! registered by ability id and looked up at resolution time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::combat::CombatContext;
use crate::state::CombatantId;

use super::{AbilityDefinition, AbilityEffects};

/// Custom resolution for one utility ability.
pub trait UtilityEffect: Send + Sync {
    fn apply(
        &self,
        ability: &AbilityDefinition,
        actor: CombatantId,
        targets: &[CombatantId],
        ctx: &mut CombatContext<'_>,
    ) -> AbilityEffects;
}

/// Utility effects keyed by ability id.
#[derive(Clone, Default)]
pub struct UtilityRegistry {
    effects: HashMap<String, Arc<dyn UtilityEffect>>,
}

impl UtilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `effect` for `ability_id`, replacing any previous one.
    pub fn register(&mut self, ability_id: impl Into<String>, effect: impl UtilityEffect + 'static) {
        self.effects.insert(ability_id.into(), Arc::new(effect));
    }

    pub fn get(&self, ability_id: &str) -> Option<&Arc<dyn UtilityEffect>> {
        self.effects.get(ability_id)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl fmt::Debug for UtilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtilityRegistry")
            .field("abilities", &self.effects.keys().collect::<Vec<_>>())
            .finish()
    }
}
