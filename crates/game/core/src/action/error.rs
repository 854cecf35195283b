//! Action execution errors.
//!
//! Every variant is a precondition failure: the executor returns it before
//! mutating anything. Probabilistic failures (misses, failed flee rolls,
//! resisted statuses) are [`ActionOutcome`](super::ActionOutcome) values.

use crate::error::{BattleError, ErrorSeverity};
use crate::item::ItemError;
use crate::state::{CombatantId, RosterError};

/// Errors that can occur while validating or executing an action.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Actor or target lookup failed.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Actor is dead (HP = 0).
    #[error("Actor {0} is defeated")]
    ActorDefeated(CombatantId),

    /// The single target of a basic attack is already dead.
    #[error("Target {0} is already defeated")]
    TargetDefeated(CombatantId),

    /// Not actor's turn.
    #[error("Not {0}'s turn")]
    NotActorsTurn(CombatantId),

    /// Combat already ended.
    #[error("Combat is over")]
    CombatOver,

    /// Skill action without an ability.
    #[error("No ability specified")]
    MissingAbility,

    /// Item action without an item id.
    #[error("No item specified")]
    MissingItem,

    /// Item action while no inventory is attached.
    #[error("No inventory available")]
    NoInventory,

    /// Talk action without a dialogue id.
    #[error("No dialogue id specified")]
    EmptyDialogue,

    /// Target list is empty.
    #[error("No targets")]
    NoTargets,

    #[error("Insufficient MP: need {required}, have {available}")]
    InsufficientMana { required: f32, available: f32 },

    #[error("Insufficient HP: need more than {required}, have {available}")]
    InsufficientHealth { required: f32, available: f32 },

    /// Item lookup or use failed.
    #[error(transparent)]
    Item(#[from] ItemError),
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            Roster(err) => err.severity(),
            Item(err) => err.severity(),
            ActorDefeated(_) | TargetDefeated(_) | NotActorsTurn(_) => ErrorSeverity::Recoverable,
            InsufficientMana { .. } | InsufficientHealth { .. } => ErrorSeverity::Recoverable,
            MissingAbility | MissingItem | EmptyDialogue | NoTargets => ErrorSeverity::Validation,
            NoInventory => ErrorSeverity::Validation,
            CombatOver => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            Roster(err) => err.error_code(),
            Item(err) => err.error_code(),
            ActorDefeated(_) => "ACTION_ACTOR_DEFEATED",
            TargetDefeated(_) => "ACTION_TARGET_DEFEATED",
            NotActorsTurn(_) => "ACTION_NOT_ACTORS_TURN",
            CombatOver => "ACTION_COMBAT_OVER",
            MissingAbility => "ACTION_MISSING_ABILITY",
            MissingItem => "ACTION_MISSING_ITEM",
            NoInventory => "ACTION_NO_INVENTORY",
            EmptyDialogue => "ACTION_EMPTY_DIALOGUE",
            NoTargets => "ACTION_NO_TARGETS",
            InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            InsufficientHealth { .. } => "ACTION_INSUFFICIENT_HEALTH",
        }
    }
}
