//! String → tag adapter.
//!
//! Content files name roles, elements, categories, target patterns and
//! status kinds as free text. This is the only place that text is turned into
//! core enums; everything downstream works with typed values.
//!
//! Unknown or empty names never fail a load. They fall back to the tag's
//! default and log a warning so bad records surface without blocking play.

use std::str::FromStr;

use battle_core::StatusEffectKind;
use tracing::warn;

/// Parses `value` as `T`, case-insensitively, falling back to `T::default()`.
///
/// `what` names the field for the warning.
pub fn parse_tag<T>(value: &str, what: &'static str) -> T
where
    T: FromStr + Default,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return T::default();
    }
    match trimmed.parse() {
        Ok(tag) => tag,
        Err(_) => {
            warn!(value = trimmed, field = what, "unrecognized tag, using default");
            T::default()
        }
    }
}

/// Parses an optional status name. Empty means "no status"; unknown names
/// are dropped with a warning.
pub fn parse_status(value: &str) -> Option<StatusEffectKind> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match StatusEffectKind::from_str(trimmed) {
        Ok(kind) => Some(kind),
        Err(_) => {
            warn!(value = trimmed, "unrecognized status effect, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AbilityCategory, Element, Role, TargetPattern};

    #[test]
    fn known_tags_parse_in_any_case() {
        assert_eq!(parse_tag::<Element>("FIRE", "element"), Element::Fire);
        assert_eq!(parse_tag::<Role>("tank", "role"), Role::Tank);
        assert_eq!(
            parse_tag::<AbilityCategory>("damageskill", "category"),
            AbilityCategory::DamageSkill
        );
        assert_eq!(parse_tag::<TargetPattern>("Self", "target"), TargetPattern::SelfOnly);
    }

    #[test]
    fn unknown_tags_fall_back() {
        assert_eq!(parse_tag::<Element>("Plasma", "element"), Element::Neutral);
        assert_eq!(parse_tag::<Role>("", "role"), Role::Hybrid);
        assert_eq!(
            parse_tag::<AbilityCategory>("Dance", "category"),
            AbilityCategory::BasicAttack
        );
        assert_eq!(parse_tag::<TargetPattern>("everyone", "target"), TargetPattern::SingleEnemy);
    }

    #[test]
    fn status_names() {
        assert_eq!(parse_status("poisoned"), Some(StatusEffectKind::Poisoned));
        assert_eq!(parse_status("AccuracyDown"), Some(StatusEffectKind::Blinded));
        assert_eq!(parse_status("  "), None);
        assert_eq!(parse_status("Hexed"), None);
    }
}
