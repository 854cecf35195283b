//! Turn scheduling errors.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::CombatantId;

/// Errors surfaced by the turn scheduler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    /// `next_turn` before `start`.
    #[error("combat has not started")]
    NotStarted,

    /// `next_turn` while an actor still holds the turn.
    #[error("turn of {0} has not ended")]
    TurnInProgress(CombatantId),

    /// `end_turn` with nobody acting.
    #[error("no turn in progress")]
    NoTurnInProgress,

    /// Scheduling found nobody alive on either side.
    #[error("no living combatants to schedule")]
    NoLivingCombatants,
}

impl BattleError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotStarted | Self::TurnInProgress(_) | Self::NoTurnInProgress => {
                ErrorSeverity::Validation
            }
            Self::NoLivingCombatants => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "TURN_NOT_STARTED",
            Self::TurnInProgress(_) => "TURN_IN_PROGRESS",
            Self::NoTurnInProgress => "TURN_NONE_IN_PROGRESS",
            Self::NoLivingCombatants => "TURN_NO_LIVING_COMBATANTS",
        }
    }
}
