//! Abstraction for sourcing combatant intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or AI policies.
use battle_core::{Action, BattleConfig, CombatantId, Inventory, Roster};

use super::errors::Result;

/// Read-only view of a battle handed to providers when a combatant acts.
#[derive(Clone, Copy)]
pub struct BattleView<'a> {
    pub roster: &'a Roster,
    pub config: &'a BattleConfig,
    /// Party inventory, if the battle has one.
    pub inventory: Option<&'a dyn Inventory>,
    pub round: u32,
}

/// Trait for choosing the action of the combatant holding the turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
pub trait ActionProvider {
    /// Provide an action for `actor` given the current battle.
    ///
    /// The returned action is validated by the engine; a rejected action is
    /// replaced with Defend by the session.
    fn provide_action(&mut self, actor: CombatantId, view: &BattleView<'_>) -> Result<Action>;
}

/// A provider that always defends.
/// Useful for testing or as a fallback.
pub struct DefendActionProvider;

impl ActionProvider for DefendActionProvider {
    fn provide_action(&mut self, actor: CombatantId, _view: &BattleView<'_>) -> Result<Action> {
        Ok(Action::defend(actor))
    }
}
