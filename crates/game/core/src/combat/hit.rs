//! Incoming hit description.

use crate::state::{CombatantId, Element};

/// How a hit interacts with the defensive pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitKind {
    /// Runs the full pipeline: barrier, defend, mark, shield, evasion,
    /// fortify, defense subtraction with a floor of 1.
    Standard,
    /// Applied as-is, floored at 0. Used for self-inflicted costs,
    /// damage-over-time ticks and cascade damage.
    Direct,
}

/// A single instance of incoming damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    /// Raw amount before any defensive step.
    pub amount: f32,
    pub element: Element,
    pub kind: HitKind,
    /// Source of the hit; reflection needs somewhere to send damage back.
    pub attacker: Option<CombatantId>,
}

impl Hit {
    pub fn standard(amount: f32, element: Element, attacker: CombatantId) -> Self {
        Self {
            amount,
            element,
            kind: HitKind::Standard,
            attacker: Some(attacker),
        }
    }

    pub fn direct(amount: f32, element: Element) -> Self {
        Self {
            amount,
            element,
            kind: HitKind::Direct,
            attacker: None,
        }
    }

    /// A standard hit with no attributable attacker.
    pub fn unattributed(amount: f32, element: Element) -> Self {
        Self {
            amount,
            element,
            kind: HitKind::Standard,
            attacker: None,
        }
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        self.kind == HitKind::Direct
    }
}
