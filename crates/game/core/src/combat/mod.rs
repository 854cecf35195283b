//! Combat resolution system.
//!
//! Pure damage formulas live in [`damage`]; the per-combatant defensive
//! pipeline lives on [`Combatant`](crate::state::Combatant); cascades that
//! reach other combatants (reflection, trap spread) are applied by
//! [`CombatContext`].
//!
//! # Core Functions
//!
//! - `raw_damage`: base power plus the attacker's modified attack
//! - `calculate_damage`: defense subtraction with a floor of 1
//! - `CombatContext::deal`: full hit application with cascades and events

pub mod context;
pub mod damage;
pub mod hit;
pub mod result;

pub use context::CombatContext;
pub use damage::{calculate_damage, direct_damage, raw_damage};
pub use hit::{Hit, HitKind};
pub use result::{DamageReport, Negation, TrapSpring};
