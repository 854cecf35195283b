//! Combatant state representation.
//!
//! This module owns the data structures that describe combatants, their
//! status effects and the roster holding both sides. Resources and status
//! lists are private to [`Combatant`] and change only through its operations,
//! which enforce every clamp at the mutation site.
pub mod error;
pub mod types;

pub use error::RosterError;
pub use types::{
    ActionPrevention, Combatant, CombatantId, CombatantProfile, Element, Role, Roster, Side,
    StatusEffect, StatusEffectKind, StatusEffects, StatusKey, StatusTick, TickDamage,
};
