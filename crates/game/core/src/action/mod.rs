//! Action domain: what a combatant does with its turn.
//!
//! # Module Structure
//!
//! - `types`: `Action`, `ActionKind`, `ActionOutcome`
//! - `error`: `ActionError`
//! - `targeting`: valid target sets, taunt and confusion overrides
//! - `executor`: `ActionExecutor`, dispatch by action kind

pub mod error;
pub mod executor;
pub mod targeting;
pub mod types;

pub use error::ActionError;
pub use executor::ActionExecutor;
pub use targeting::{confusion_redirect, valid_targets};
pub use types::{Action, ActionKind, ActionOutcome};
