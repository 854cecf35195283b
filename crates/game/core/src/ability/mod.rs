//! Abilities: immutable definitions and their resolution against a roster.

pub mod definition;
pub mod resolve;
pub mod utility;

pub use definition::{
    AbilityCategory, AbilityDefinition, CritSpec, ManaEffect, SelfStatus, StatusRider,
    TargetPattern,
};
pub use resolve::{AbilityEffects, AbilityOutcome, resolve};
pub use utility::{UtilityEffect, UtilityRegistry};
