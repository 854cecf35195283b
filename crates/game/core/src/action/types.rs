//! Action shape and outcomes.

use std::sync::Arc;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::ability::{AbilityDefinition, AbilityOutcome};
use crate::item::ItemReport;
use crate::state::CombatantId;

/// What a combatant does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Attack,
    Skill,
    Item,
    Defend,
    Flee,
    Talk,
}

/// One decision of a controller, consumed by the executor.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub actor: CombatantId,
    pub targets: Vec<CombatantId>,
    pub ability: Option<Arc<AbilityDefinition>>,
    pub item: Option<String>,
    pub dialogue_id: Option<String>,
}

impl Action {
    fn bare(kind: ActionKind, actor: CombatantId) -> Self {
        Self {
            kind,
            actor,
            targets: Vec::new(),
            ability: None,
            item: None,
            dialogue_id: None,
        }
    }

    /// Fallback basic attack on a single target.
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self {
            targets: vec![target],
            ..Self::bare(ActionKind::Attack, actor)
        }
    }

    /// Basic attack resolved through an explicit ability.
    pub fn attack_with(
        actor: CombatantId,
        ability: Arc<AbilityDefinition>,
        targets: Vec<CombatantId>,
    ) -> Self {
        Self {
            targets,
            ability: Some(ability),
            ..Self::bare(ActionKind::Attack, actor)
        }
    }

    pub fn skill(
        actor: CombatantId,
        ability: Arc<AbilityDefinition>,
        targets: Vec<CombatantId>,
    ) -> Self {
        Self {
            targets,
            ability: Some(ability),
            ..Self::bare(ActionKind::Skill, actor)
        }
    }

    pub fn item(actor: CombatantId, item: impl Into<String>, targets: Vec<CombatantId>) -> Self {
        Self {
            targets,
            item: Some(item.into()),
            ..Self::bare(ActionKind::Item, actor)
        }
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::bare(ActionKind::Defend, actor)
    }

    pub fn flee(actor: CombatantId) -> Self {
        Self::bare(ActionKind::Flee, actor)
    }

    pub fn talk(actor: CombatantId, dialogue_id: impl Into<String>) -> Self {
        Self {
            dialogue_id: Some(dialogue_id.into()),
            ..Self::bare(ActionKind::Talk, actor)
        }
    }

    /// Attacks and skills count as offensive for confusion, whatever the
    /// skill's category.
    pub fn is_offensive(&self) -> bool {
        matches!(self.kind, ActionKind::Attack | ActionKind::Skill)
    }
}

/// Result of an action that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// An ability or the fallback attack resolved (possibly as a miss).
    Resolved(AbilityOutcome),
    Defended,
    FleeSucceeded { chance: f32 },
    /// The flee roll failed; the turn is still spent.
    FleeFailed { chance: f32 },
    Dialogue(String),
    ItemUsed(ItemReport),
}

impl ActionOutcome {
    /// Combat ended as an escape because of this action.
    pub fn escaped(&self) -> bool {
        match self {
            Self::FleeSucceeded { .. } => true,
            Self::ItemUsed(report) => report.escape,
            _ => false,
        }
    }
}
