//! Deterministic turn-based party combat.
//!
//! `battle-core` defines the canonical rules (combatants, status effects,
//! ability resolution, action dispatch, turn scheduling) and exposes pure,
//! synchronous APIs. All state mutation during a battle flows through
//! [`engine::BattleEngine`]; every observable change is reported as a
//! [`events::BattleEvent`]. Randomness is injected through
//! [`env::RngOracle`] so every outcome is reproducible from a seed.
pub mod ability;
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod item;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityCategory, AbilityDefinition, AbilityEffects, AbilityOutcome, CritSpec, ManaEffect,
    SelfStatus, StatusRider, TargetPattern, UtilityEffect, UtilityRegistry,
};
pub use action::{Action, ActionError, ActionExecutor, ActionKind, ActionOutcome, valid_targets};
pub use combat::{CombatContext, DamageReport, Hit, HitKind, Negation};
pub use config::BattleConfig;
pub use engine::{BattleEngine, CombatOutcome, FleeAttempt, TurnError, TurnScheduler, TurnStep};
pub use env::{PcgRng, RngOracle, ScriptedRng};
pub use error::{BattleError, ErrorSeverity};
pub use events::{BattleEvent, EventLog, EventSink};
pub use item::{Inventory, ItemDefinition, ItemError, ItemKind, ItemReport, PartyInventory};
pub use state::{
    Combatant, CombatantId, CombatantProfile, Element, Role, Roster, RosterError, Side,
    StatusEffect, StatusEffectKind, StatusEffects,
};
pub use stats::{ResourceKind, ResourceMeter, StatKind};
