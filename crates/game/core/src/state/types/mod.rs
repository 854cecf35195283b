pub mod combatant;
pub mod common;
pub mod roster;
pub mod status;

// Re-export combatant types
pub use combatant::{Combatant, CombatantProfile, StatusTick};

// Re-export common types
pub use common::{CombatantId, Element, Role, Side};

// Re-export roster
pub use roster::Roster;

// Re-export status effects
pub use status::{
    ActionPrevention, StatusEffect, StatusEffectKind, StatusEffects, StatusKey, TickDamage,
};
