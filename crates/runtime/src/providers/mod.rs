//! Action provider implementations for different controllers.

pub mod basic_ai;
pub mod scripted;

pub use basic_ai::BasicAiProvider;
pub use scripted::ScriptedProvider;
