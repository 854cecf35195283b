//! Replays a fixed list of actions.

use std::collections::VecDeque;

use battle_core::{Action, CombatantId};

use crate::api::{ActionProvider, BattleView, Result, RuntimeError};

/// Hands out queued actions in order, whoever is acting.
///
/// Used by tests and replays. Running out of actions is an error so a
/// script that is too short fails loudly instead of idling.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    queue: VecDeque<Action>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide_action(&mut self, actor: CombatantId, _view: &BattleView<'_>) -> Result<Action> {
        let action = self
            .queue
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted(actor))?;
        if action.actor != actor {
            tracing::warn!(
                expected = %actor,
                scripted = %action.actor,
                "scripted action belongs to another combatant"
            );
        }
        Ok(action)
    }
}
