//! Runtime orchestration for turn-based battles.
//!
//! This crate wires content, controllers and the battle engine into a
//! playable session. Consumers build a [`BattleSession`] from a [`Scenario`],
//! plug in [`ActionProvider`]s for each side, subscribe to events, and run.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for flexible event routing
//! - [`providers`] holds the built-in controllers
//! - [`scenario`] turns content ids into a roster and inventory
//! - [`session`] hosts the turn loop and its builder
pub mod api;
pub mod events;
pub mod providers;
pub mod scenario;
pub mod session;

pub use api::{
    ActionProvider, BattleView, DefendActionProvider, ProviderKind, Result, RuntimeError,
};
pub use events::{Event, EventBus, EventReceiver, Topic};
pub use providers::{BasicAiProvider, ScriptedProvider};
pub use scenario::Scenario;
pub use session::{
    BattleSession, SessionBuilder, SessionConfig, SessionOutcome, SessionReport, random_seed,
};
