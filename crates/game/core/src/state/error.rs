//! Roster errors.
//!
//! Errors related to battle setup and combatant lookup.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::{CombatantId, Side};

/// Errors that occur while building or querying a roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RosterError {
    /// Roster is full (max capacity reached).
    #[error("Roster is full (max: {max})")]
    RosterFull {
        /// Maximum capacity.
        max: usize,
    },

    /// No combatant with this id.
    #[error("Unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    /// A battle needs at least one living combatant per side.
    #[error("Side {0} has no living combatants")]
    EmptySide(Side),
}

impl BattleError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        use RosterError::*;
        match self {
            RosterFull { .. } | EmptySide(_) => ErrorSeverity::Validation,
            UnknownCombatant(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use RosterError::*;
        match self {
            RosterFull { .. } => "ROSTER_FULL",
            UnknownCombatant(_) => "ROSTER_UNKNOWN_COMBATANT",
            EmptySide(_) => "ROSTER_EMPTY_SIDE",
        }
    }
}
