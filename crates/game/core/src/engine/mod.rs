//! Turn scheduling and the battle facade.
//!
//! [`TurnScheduler`] decides who acts and when combat ends. [`BattleEngine`]
//! owns the roster, the scheduler, the RNG and the event log, and is the
//! single entry point controllers drive: `next_turn` → `execute` →
//! `end_turn`.

mod battle;
mod errors;
mod turns;

pub use battle::BattleEngine;
pub use errors::TurnError;
pub use turns::{FleeAttempt, TurnScheduler, TurnStep};

use strum::{AsRefStr, Display, EnumString};

/// How a combat session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    /// Every enemy is dead.
    Victory,
    /// Every party member is dead.
    Defeat,
    /// The party fled.
    Escaped,
}

impl CombatOutcome {
    pub fn is_victory(self) -> bool {
        self == Self::Victory
    }
}
