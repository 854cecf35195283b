//! Stat reads and resource pools.
//!
//! Base stats are stored on the combatant and never mutated by status
//! effects. Modified values are recomputed on every read by folding the
//! multiplicative factor of each active effect:
//!
//! ```text
//! modified = base × Π effect.stat_modifier(stat)
//! ```
//!
//! Effects that do not touch a stat contribute a neutral factor of `1.0`.

pub mod resources;

pub use resources::{ResourceKind, ResourceMeter};

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Stats that status effects can scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
}

/// Folds a sequence of multiplicative modifiers into a single factor.
pub fn fold_modifiers(factors: impl IntoIterator<Item = f32>) -> f32 {
    factors.into_iter().product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fold_is_neutral() {
        assert_eq!(fold_modifiers(std::iter::empty()), 1.0);
    }

    #[test]
    fn fold_multiplies() {
        assert!((fold_modifiers([1.5, 0.5, 2.0]) - 1.5).abs() < f32::EPSILON);
    }
}
