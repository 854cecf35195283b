//! Status effect system for combatants.
//!
//! Status effects are timed modifiers that scale stats, cancel turns, deal
//! damage over time or alter how incoming hits resolve.
//!
//! # Ownership
//!
//! Each effect is a plain value owned by exactly one combatant's
//! [`StatusEffects`] container. Entries are keyed by a [`StatusKey`] assigned
//! in application order, so removal addresses one specific application even
//! when several effects of the same kind coexist.
//!
//! # Duration
//!
//! `remaining_turns` is decremented exactly once per owner turn-start
//! processing. An effect with `remaining_turns <= 0` is expired and removed
//! in the same pass. Hit-counting shields deplete their magnitude instead.

use arrayvec::ArrayVec;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::state::Element;
use crate::stats::StatKind;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Crowd Control (may cancel the owner's turn)
    // ========================================================================
    /// 50% chance to lose the turn.
    Paralyzed,

    /// Always loses the turn.
    Sleeping,

    /// Always loses the turn.
    Frozen,

    /// 30% chance to lose the turn.
    Disoriented,

    /// Offensive actions may be redirected to a random combatant.
    Confused,

    /// Speed reads as zero.
    Rooted,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Damage over time proportional to max HP.
    Poisoned,

    /// Flat fire damage over time.
    Burning,

    /// Attack halved.
    Weakened,

    /// Offensive actions miss 30% of the time.
    #[strum(to_string = "Blinded", serialize = "AccuracyDown")]
    Blinded,

    /// Incoming hits are multiplied by the magnitude.
    Marked,

    /// The next hit taken springs a bonus hit and spreads to allies.
    Trapped,

    AttackDebuff,
    DefenseDebuff,
    SpeedDebuff,

    // ========================================================================
    // Buffs
    // ========================================================================
    AttackBuff,
    DefenseBuff,
    SpeedBuff,

    /// Absorbs up to `magnitude` damage, depleting as it absorbs.
    Shielded,

    /// Fully blocks the next `magnitude` hits.
    Barrier,

    /// Negates a hit with probability `magnitude`.
    Evading,

    /// Incoming hits are halved.
    Fortified,

    /// Sends a fraction of taken damage back to the attacker.
    Reflecting,

    /// Forces single-target enemy selection onto the bearer.
    Taunting,
}

/// How a status effect gates its owner's turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionPrevention {
    Never,
    Always,
    Chance(f32),
}

impl StatusEffectKind {
    pub const fn prevention(self) -> ActionPrevention {
        match self {
            Self::Sleeping | Self::Frozen => ActionPrevention::Always,
            Self::Paralyzed => ActionPrevention::Chance(BattleConfig::PARALYSIS_CHANCE),
            Self::Disoriented => ActionPrevention::Chance(BattleConfig::DISORIENT_CHANCE),
            _ => ActionPrevention::Never,
        }
    }
}

/// A single applied status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Turns left before expiry.
    pub remaining_turns: i32,
    /// Strength; meaning depends on `kind`.
    pub magnitude: f32,
}

/// Direct damage produced by a damage-over-time tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickDamage {
    pub amount: f32,
    pub element: Element,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, duration: i32, magnitude: f32) -> Self {
        Self {
            kind,
            remaining_turns: duration,
            magnitude,
        }
    }

    /// An effect with the neutral magnitude of `1.0`.
    pub fn with_duration(kind: StatusEffectKind, duration: i32) -> Self {
        Self::new(kind, duration, 1.0)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining_turns <= 0
    }

    /// Damage dealt by this effect at the owner's turn start, if any.
    pub fn tick_damage(&self, owner_max_health: f32) -> Option<TickDamage> {
        match self.kind {
            StatusEffectKind::Poisoned => Some(TickDamage {
                amount: owner_max_health * BattleConfig::POISON_FRACTION * self.magnitude,
                element: Element::Neutral,
            }),
            StatusEffectKind::Burning => Some(TickDamage {
                amount: BattleConfig::BURN_BASE_DAMAGE * self.magnitude,
                element: Element::Fire,
            }),
            _ => None,
        }
    }

    /// Rolls whether this effect cancels the owner's action.
    ///
    /// Probabilistic kinds consume exactly one draw per call; call once per
    /// decision.
    pub fn prevents_action(&self, rng: &mut dyn RngOracle) -> bool {
        match self.kind.prevention() {
            ActionPrevention::Never => false,
            ActionPrevention::Always => true,
            ActionPrevention::Chance(p) => rng.chance(p),
        }
    }

    /// Multiplicative factor this effect contributes to `stat`.
    pub fn stat_modifier(&self, stat: StatKind) -> f32 {
        use StatusEffectKind as K;
        match (self.kind, stat) {
            (K::AttackBuff | K::AttackDebuff, StatKind::Attack)
            | (K::DefenseBuff | K::DefenseDebuff, StatKind::Defense)
            | (K::SpeedBuff | K::SpeedDebuff, StatKind::Speed) => self.magnitude,
            (K::Weakened, StatKind::Attack) => BattleConfig::WEAKENED_ATTACK_FACTOR,
            (K::Rooted, StatKind::Speed) => 0.0,
            _ => 1.0,
        }
    }

    /// Used by hit-counting shields. Returns true once depleted.
    pub fn decrement_magnitude(&mut self) -> bool {
        self.magnitude -= 1.0;
        self.magnitude <= 0.0
    }

    pub fn decrement_duration(&mut self) {
        self.remaining_turns -= 1;
    }
}

/// Identity of one application inside a [`StatusEffects`] container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusKey(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    key: StatusKey,
    effect: StatusEffect,
}

/// Active status effects on a combatant, in application order.
///
/// Duplicates of the same kind coexist independently. Capacity is bounded by
/// [`BattleConfig::MAX_STATUS_EFFECTS`]; applications beyond it are rejected.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    slots: ArrayVec<Slot, { BattleConfig::MAX_STATUS_EFFECTS }>,
    next_key: u64,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends an effect. Returns `None` when the container is full.
    pub fn push(&mut self, effect: StatusEffect) -> Option<StatusKey> {
        if self.slots.is_full() {
            return None;
        }
        let key = StatusKey(self.next_key);
        self.next_key += 1;
        self.slots.push(Slot { key, effect });
        Some(key)
    }

    /// Removes one application by key.
    pub fn remove(&mut self, key: StatusKey) -> Option<StatusEffect> {
        let index = self.slots.iter().position(|slot| slot.key == key)?;
        Some(self.slots.remove(index).effect)
    }

    /// Removes every effect, returning how many were present.
    pub fn clear(&mut self) -> usize {
        let count = self.slots.len();
        self.slots.clear();
        count
    }

    /// Checks if any effect of `kind` is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.slots.iter().any(|slot| slot.effect.kind == kind)
    }

    /// First application of `kind` in list order.
    pub fn first(&self, kind: StatusEffectKind) -> Option<(StatusKey, &StatusEffect)> {
        self.iter().find(|(_, effect)| effect.kind == kind)
    }

    /// Mutable access to the first application of `kind` in list order.
    pub fn first_mut(&mut self, kind: StatusEffectKind) -> Option<(StatusKey, &mut StatusEffect)> {
        self.slots
            .iter_mut()
            .find(|slot| slot.effect.kind == kind)
            .map(|slot| (slot.key, &mut slot.effect))
    }

    pub fn get_mut(&mut self, key: StatusKey) -> Option<&mut StatusEffect> {
        self.slots
            .iter_mut()
            .find(|slot| slot.key == key)
            .map(|slot| &mut slot.effect)
    }

    /// Keys of all current applications in list order.
    pub fn keys(&self) -> Vec<StatusKey> {
        self.slots.iter().map(|slot| slot.key).collect()
    }

    /// Iterates `(key, effect)` pairs in application order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusKey, &StatusEffect)> {
        self.slots.iter().map(|slot| (slot.key, &slot.effect))
    }

    /// Iterates every effect of `kind` in application order.
    pub fn of_kind(&self, kind: StatusEffectKind) -> impl Iterator<Item = &StatusEffect> {
        self.slots
            .iter()
            .map(|slot| &slot.effect)
            .filter(move |effect| effect.kind == kind)
    }

    /// Product of every effect's modifier for `stat`.
    pub fn stat_modifier(&self, stat: StatKind) -> f32 {
        crate::stats::fold_modifiers(self.slots.iter().map(|slot| slot.effect.stat_modifier(stat)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
