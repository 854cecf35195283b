//! Immutable ability definitions.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::action::ActionError;
use crate::state::{Combatant, Element, StatusEffectKind};

// ============================================================================
// Tags
// ============================================================================

/// Behavioral class of an ability, selecting its resolution algorithm.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCategory {
    #[default]
    BasicAttack,
    DamageSkill,
    HealSkill,
    BuffSkill,
    DebuffSkill,
    UtilitySkill,
    ReviveSkill,
}

impl AbilityCategory {
    /// Offensive categories pass the accuracy gate and can be redirected by
    /// confusion.
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::BasicAttack | Self::DamageSkill | Self::DebuffSkill)
    }
}

/// Which combatants an ability or item may address.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetPattern {
    #[default]
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
    #[strum(to_string = "Self", serialize = "SelfOnly")]
    SelfOnly,
    Random,
}

impl TargetPattern {
    /// Ally-side patterns select from the actor's own side.
    pub const fn targets_allies(self) -> bool {
        matches!(self, Self::SingleAlly | Self::AllAllies | Self::SelfOnly)
    }

    pub const fn is_single(self) -> bool {
        matches!(self, Self::SingleEnemy | Self::SingleAlly | Self::SelfOnly | Self::Random)
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// MP handling of an ability. Charging and restoring are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ManaEffect {
    #[default]
    None,
    /// Costs this percentage of the actor's max MP.
    Cost(f32),
    /// Restores this percentage of the actor's max MP.
    Restore(f32),
}

/// A status effect an ability may inflict on its targets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRider {
    pub kind: StatusEffectKind,
    /// Probability in `[0, 1]`. Zero or less never applies.
    pub chance: f32,
    pub duration: i32,
}

impl StatusRider {
    pub fn new(kind: StatusEffectKind, chance: f32, duration: i32) -> Self {
        Self {
            kind,
            chance,
            duration,
        }
    }
}

/// Status the actor grants itself after using the ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelfStatus {
    pub kind: StatusEffectKind,
    pub duration: i32,
    pub magnitude: f32,
}

/// Critical hit parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CritSpec {
    pub chance: f32,
    pub multiplier: f32,
}

// ============================================================================
// Ability Definition
// ============================================================================

/// A skill or attack. Immutable once loaded and shared between combatants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AbilityCategory,
    pub target: TargetPattern,

    pub mana: ManaEffect,
    /// HP paid as a direct hit, as a percentage of max HP.
    pub hp_cost_percent: f32,

    pub base_power: f32,
    pub element: Element,

    pub primary_status: Option<StatusRider>,
    pub secondary_status: Option<StatusRider>,
    pub self_status: Option<SelfStatus>,

    /// Hits per target; 1 unless multi-hit.
    pub hit_count: u32,
    pub crit: Option<CritSpec>,
    /// Heal skills also remove every status effect from healed targets.
    pub cleanse: bool,
}

impl AbilityDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: AbilityCategory,
        target: TargetPattern,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            target,
            mana: ManaEffect::None,
            hp_cost_percent: 0.0,
            base_power: 0.0,
            element: Element::Neutral,
            primary_status: None,
            secondary_status: None,
            self_status: None,
            hit_count: 1,
            crit: None,
            cleanse: false,
        }
    }

    #[must_use]
    pub fn with_power(mut self, base_power: f32) -> Self {
        self.base_power = base_power;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_mana(mut self, mana: ManaEffect) -> Self {
        self.mana = mana;
        self
    }

    #[must_use]
    pub fn with_hp_cost(mut self, percent: f32) -> Self {
        self.hp_cost_percent = percent;
        self
    }

    /// Fills the first free status slot.
    #[must_use]
    pub fn with_status(mut self, rider: StatusRider) -> Self {
        if self.primary_status.is_none() {
            self.primary_status = Some(rider);
        } else {
            self.secondary_status = Some(rider);
        }
        self
    }

    #[must_use]
    pub fn with_self_status(mut self, status: SelfStatus) -> Self {
        self.self_status = Some(status);
        self
    }

    #[must_use]
    pub fn with_hits(mut self, hit_count: u32) -> Self {
        self.hit_count = hit_count.max(1);
        self
    }

    #[must_use]
    pub fn with_crit(mut self, chance: f32, multiplier: f32) -> Self {
        self.crit = Some(CritSpec { chance, multiplier });
        self
    }

    #[must_use]
    pub fn with_cleanse(mut self) -> Self {
        self.cleanse = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Defined status slots, primary first.
    pub fn status_riders(&self) -> impl Iterator<Item = &StatusRider> {
        self.primary_status.iter().chain(self.secondary_status.iter())
    }

    pub fn is_multi_hit(&self) -> bool {
        self.hit_count > 1
    }

    /// MP this ability charges `actor`, or zero.
    pub fn mana_cost(&self, actor: &Combatant) -> f32 {
        match self.mana {
            ManaEffect::Cost(percent) => actor.mana_percent(percent),
            _ => 0.0,
        }
    }

    /// HP this ability charges `actor`, or zero.
    pub fn health_cost(&self, actor: &Combatant) -> f32 {
        actor.health_percent(self.hp_cost_percent.max(0.0))
    }

    /// Checks every precondition of using this ability.
    pub fn check_usable(&self, actor: &Combatant) -> Result<(), ActionError> {
        if !actor.is_alive() {
            return Err(ActionError::ActorDefeated(actor.id()));
        }

        let mana = self.mana_cost(actor);
        if actor.mana() < mana {
            return Err(ActionError::InsufficientMana {
                required: mana,
                available: actor.mana(),
            });
        }

        let health = self.health_cost(actor);
        if health > 0.0 && actor.health() <= health {
            return Err(ActionError::InsufficientHealth {
                required: health,
                available: actor.health(),
            });
        }

        Ok(())
    }

    /// Boolean form of [`check_usable`](Self::check_usable).
    pub fn can_use(&self, actor: &Combatant) -> bool {
        self.check_usable(actor).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::state::{CombatantId, CombatantProfile, Side};
    use std::str::FromStr;

    fn actor(mana_percent: f32) -> Combatant {
        let config = BattleConfig::default().with_starting_mp_percent(mana_percent);
        let profile = CombatantProfile::new("caster", 100.0, 20.0, 10.0, 5.0, 10);
        Combatant::new(CombatantId(0), Side::Party, profile, &config)
    }

    fn fireball() -> AbilityDefinition {
        AbilityDefinition::new("fireball", "Fireball", AbilityCategory::DamageSkill, TargetPattern::SingleEnemy)
            .with_power(20.0)
            .with_mana(ManaEffect::Cost(50.0))
    }

    #[test]
    fn mana_cost_is_a_percentage_of_max() {
        assert_eq!(fireball().mana_cost(&actor(100.0)), 10.0);
    }

    #[test]
    fn cannot_use_without_mana() {
        let ability = fireball();
        assert!(ability.can_use(&actor(100.0)));
        assert!(matches!(
            ability.check_usable(&actor(25.0)),
            Err(ActionError::InsufficientMana { .. })
        ));
    }

    #[test]
    fn hp_cost_must_leave_the_actor_alive() {
        let ability = fireball().with_mana(ManaEffect::None).with_hp_cost(100.0);
        assert!(matches!(
            ability.check_usable(&actor(100.0)),
            Err(ActionError::InsufficientHealth { .. })
        ));
        assert!(fireball().with_hp_cost(50.0).can_use(&actor(100.0)));
    }

    #[test]
    fn restore_abilities_cost_nothing() {
        let ability = fireball().with_mana(ManaEffect::Restore(20.0));
        assert_eq!(ability.mana_cost(&actor(0.0)), 0.0);
        assert!(ability.can_use(&actor(0.0)));
    }

    #[test]
    fn status_slots_fill_in_order() {
        let ability = fireball()
            .with_status(StatusRider::new(StatusEffectKind::Burning, 0.5, 2))
            .with_status(StatusRider::new(StatusEffectKind::Weakened, 0.2, 1));
        let kinds: Vec<_> = ability.status_riders().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![StatusEffectKind::Burning, StatusEffectKind::Weakened]);
    }

    #[test]
    fn target_pattern_accepts_self_keyword() {
        assert_eq!(TargetPattern::from_str("self").unwrap(), TargetPattern::SelfOnly);
        assert!(TargetPattern::SelfOnly.targets_allies());
        assert!(AbilityCategory::DebuffSkill.is_offensive());
        assert!(!AbilityCategory::HealSkill.is_offensive());
    }
}
