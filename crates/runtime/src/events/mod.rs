//! Topic-based event bus for battle events.
//!
//! The engine buffers [`battle_core::BattleEvent`]s; the session drains them
//! after every step and republishes each one on its topic, so consumers
//! subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, EventReceiver, Topic};
