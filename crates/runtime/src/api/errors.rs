//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from scenario building, the battle engine and action
//! providers so clients can bubble them up with consistent context.
use std::fmt;

use battle_core::{
    ActionError, BattleError, CombatantId, ErrorSeverity, ItemError, RosterError, Side, TurnError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("unknown encounter '{0}'")]
    UnknownEncounter(String),

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("scripted provider has no action left for {0}")]
    ScriptExhausted(CombatantId),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Roster(err) => err.severity(),
            Self::Turn(err) => err.severity(),
            Self::Action(err) => err.severity(),
            Self::Item(err) => err.severity(),
            Self::UnknownCharacter(_) | Self::UnknownEncounter(_) | Self::UnknownItem(_) => {
                ErrorSeverity::Validation
            }
            Self::ProviderNotSet { .. } | Self::ScriptExhausted(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Roster(err) => err.error_code(),
            Self::Turn(err) => err.error_code(),
            Self::Action(err) => err.error_code(),
            Self::Item(err) => err.error_code(),
            Self::UnknownCharacter(_) => "RUNTIME_UNKNOWN_CHARACTER",
            Self::UnknownEncounter(_) => "RUNTIME_UNKNOWN_ENCOUNTER",
            Self::UnknownItem(_) => "RUNTIME_UNKNOWN_ITEM",
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::ScriptExhausted(_) => "RUNTIME_SCRIPT_EXHAUSTED",
        }
    }
}

/// Which controller slot a provider fills.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Party,
    Enemy,
}

impl From<Side> for ProviderKind {
    fn from(side: Side) -> Self {
        match side {
            Side::Party => Self::Party,
            Side::Enemy => Self::Enemy,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Party => "party",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
