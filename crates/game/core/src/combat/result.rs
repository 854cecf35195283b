//! Damage reports produced by the defensive pipeline.

use crate::state::{CombatantId, StatusEffect};

/// Why a hit was reduced to nothing before reaching health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Negation {
    /// A full-block barrier consumed one charge.
    Barrier,
    /// The evasion roll succeeded.
    Evaded,
}

/// A trap that sprang on the victim of a hit.
///
/// Carries the removed effect so the same trap can spread to the victim's
/// allies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrapSpring {
    pub effect: StatusEffect,
}

/// Everything that happened while one hit resolved on one combatant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DamageReport {
    /// Health actually lost.
    pub dealt: f32,
    /// Damage soaked by flat shields.
    pub absorbed: f32,
    pub negated: Option<Negation>,
    /// The hit took the combatant from alive to dead.
    pub defeated: bool,
    /// Damage owed back to the attacker by reflection.
    pub reflect: Option<(CombatantId, f32)>,
    pub trap: Option<TrapSpring>,
}

impl DamageReport {
    /// Report for a hit that never reached the pipeline (dead target).
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn negated(reason: Negation) -> Self {
        Self {
            negated: Some(reason),
            ..Self::default()
        }
    }

    #[inline]
    pub fn landed(&self) -> bool {
        self.negated.is_none() && self.dealt > 0.0
    }
}
