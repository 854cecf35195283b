//! Simulation event stream.
//!
//! The scheduler and the executor describe everything observable as
//! [`BattleEvent`] values pushed into an [`EventSink`]. Presentation layers
//! subscribe to the stream instead of wiring callbacks into combatants.

use crate::action::ActionKind;
use crate::combat::Negation;
use crate::engine::CombatOutcome;
use crate::state::{CombatantId, Element, StatusEffectKind};
use crate::stats::ResourceKind;

/// Everything observable that happens during a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    // ========================================================================
    // Flow
    // ========================================================================
    CombatStarted {
        party: Vec<CombatantId>,
        enemies: Vec<CombatantId>,
    },
    CombatEnded {
        outcome: CombatOutcome,
    },
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        actor: CombatantId,
    },
    /// The actor's turn was cancelled by a status effect and auto-ends after
    /// `delay` simulated seconds.
    TurnPrevented {
        actor: CombatantId,
        cause: StatusEffectKind,
        delay: f32,
    },
    TurnEnded {
        actor: CombatantId,
    },

    // ========================================================================
    // Actions
    // ========================================================================
    ActionExecuted {
        actor: CombatantId,
        kind: ActionKind,
        targets: Vec<CombatantId>,
    },
    /// A confused actor's offensive action was redirected.
    ActionRedirected {
        actor: CombatantId,
        target: CombatantId,
    },
    AbilityMissed {
        actor: CombatantId,
        ability: String,
    },
    FleeAttempted {
        chance: f32,
        escaped: bool,
    },
    DialogueRequested {
        actor: CombatantId,
        dialogue_id: String,
    },
    ItemUsed {
        actor: CombatantId,
        item: String,
    },

    // ========================================================================
    // Combatant changes
    // ========================================================================
    DamageDealt {
        target: CombatantId,
        amount: f32,
        element: Element,
        direct: bool,
        critical: bool,
    },
    HitNegated {
        target: CombatantId,
        reason: Negation,
    },
    Healed {
        target: CombatantId,
        amount: f32,
    },
    /// Current and maximum of a resource after a change.
    ResourceChanged {
        target: CombatantId,
        resource: ResourceKind,
        current: f32,
        max: f32,
    },
    StatusApplied {
        target: CombatantId,
        kind: StatusEffectKind,
        duration: i32,
        magnitude: f32,
    },
    StatusRemoved {
        target: CombatantId,
        kind: StatusEffectKind,
    },
    StatusesCleared {
        target: CombatantId,
        count: usize,
    },
    /// A status roll failed or the target's list was full.
    StatusResisted {
        target: CombatantId,
        kind: StatusEffectKind,
    },
    CombatantDefeated {
        target: CombatantId,
    },
    CombatantRevived {
        target: CombatantId,
        health: f32,
    },
}

impl BattleEvent {
    /// Short, stable name of the variant.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CombatStarted { .. } => "combat_started",
            Self::CombatEnded { .. } => "combat_ended",
            Self::RoundStarted { .. } => "round_started",
            Self::TurnStarted { .. } => "turn_started",
            Self::TurnPrevented { .. } => "turn_prevented",
            Self::TurnEnded { .. } => "turn_ended",
            Self::ActionExecuted { .. } => "action_executed",
            Self::ActionRedirected { .. } => "action_redirected",
            Self::AbilityMissed { .. } => "ability_missed",
            Self::FleeAttempted { .. } => "flee_attempted",
            Self::DialogueRequested { .. } => "dialogue_requested",
            Self::ItemUsed { .. } => "item_used",
            Self::DamageDealt { .. } => "damage_dealt",
            Self::HitNegated { .. } => "hit_negated",
            Self::Healed { .. } => "healed",
            Self::ResourceChanged { .. } => "resource_changed",
            Self::StatusApplied { .. } => "status_applied",
            Self::StatusRemoved { .. } => "status_removed",
            Self::StatusesCleared { .. } => "statuses_cleared",
            Self::StatusResisted { .. } => "status_resisted",
            Self::CombatantDefeated { .. } => "combatant_defeated",
            Self::CombatantRevived { .. } => "combatant_revived",
        }
    }
}

/// Receiver of simulation events.
pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

impl EventSink for Vec<BattleEvent> {
    fn emit(&mut self, event: BattleEvent) {
        self.push(event);
    }
}

/// Buffered event stream owned by the engine and drained by the driver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every buffered event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: BattleEvent) {
        tracing::trace!(event = event.name(), "battle event");
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_log() {
        let mut log = EventLog::new();
        log.emit(BattleEvent::RoundStarted { round: 1 });
        log.emit(BattleEvent::TurnStarted {
            actor: CombatantId(0),
        });
        assert_eq!(log.len(), 2);

        let drained = log.drain();
        assert_eq!(drained[0].name(), "round_started");
        assert!(log.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn events_serialize_with_variant_names() {
        let event = BattleEvent::CombatEnded {
            outcome: CombatOutcome::Escaped,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"CombatEnded":{"outcome":"Escaped"}}"#);

        let back: BattleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
