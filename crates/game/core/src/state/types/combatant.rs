use std::sync::Arc;

use crate::ability::AbilityDefinition;
use crate::combat::{DamageReport, Hit, HitKind, Negation, TrapSpring, calculate_damage, direct_damage};
use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::stats::{ResourceMeter, StatKind};

use super::{
    CombatantId, Element, Role, Side, StatusEffect, StatusEffectKind, StatusEffects, StatusKey,
    TickDamage,
};

/// Setup record a combatant is spawned from.
///
/// Ability definitions are shared read-only between every combatant that
/// references them.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatantProfile {
    pub name: String,
    pub role: Role,
    pub element: Element,
    pub max_health: f32,
    pub max_mana: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: i32,
    pub basic_attack: Option<Arc<AbilityDefinition>>,
    pub skills: Vec<Arc<AbilityDefinition>>,
}

impl CombatantProfile {
    /// A profile with the given stats and no abilities.
    pub fn new(
        name: impl Into<String>,
        max_health: f32,
        max_mana: f32,
        attack: f32,
        defense: f32,
        speed: i32,
    ) -> Self {
        Self {
            name: name.into(),
            role: Role::default(),
            element: Element::default(),
            max_health,
            max_mana,
            attack,
            defense,
            speed,
            basic_attack: None,
            skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    #[must_use]
    pub fn with_basic_attack(mut self, ability: Arc<AbilityDefinition>) -> Self {
        self.basic_attack = Some(ability);
        self
    }

    #[must_use]
    pub fn with_skill(mut self, ability: Arc<AbilityDefinition>) -> Self {
        self.skills.push(ability);
        self
    }
}

/// Per-turn status processing summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusTick {
    /// Damage-over-time hits taken, in list order, with the health lost.
    pub damage: Vec<(StatusEffectKind, TickDamage)>,
    /// Effects removed because they expired.
    pub expired: Vec<StatusEffectKind>,
    /// A tick took the combatant from alive to dead.
    pub defeated: bool,
}

/// A participant in battle.
///
/// # Invariants
///
/// - `0 <= health <= max_health` and `0 <= mana <= max_mana` after every call.
/// - `alive == (health > 0)`; once dead, only [`revive`](Self::revive) brings
///   a combatant back and every damage/heal call is a no-op until then.
/// - Base stats are never mutated; status effects scale them at read time.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    id: CombatantId,
    side: Side,
    name: String,
    role: Role,
    element: Element,

    health: ResourceMeter,
    mana: ResourceMeter,

    attack: f32,
    defense: f32,
    speed: i32,

    alive: bool,
    defending: bool,

    statuses: StatusEffects,

    basic_attack: Option<Arc<AbilityDefinition>>,
    skills: Vec<Arc<AbilityDefinition>>,
}

impl Combatant {
    /// Spawns a combatant at full health with mana at the configured
    /// starting percentage.
    pub fn new(id: CombatantId, side: Side, profile: CombatantProfile, config: &BattleConfig) -> Self {
        let health = ResourceMeter::full(profile.max_health);
        Self {
            id,
            side,
            name: profile.name,
            role: profile.role,
            element: profile.element,
            alive: !health.is_empty(),
            health,
            mana: ResourceMeter::at_percent(profile.max_mana, config.starting_mp_percent),
            attack: profile.attack,
            defense: profile.defense,
            speed: profile.speed,
            defending: false,
            statuses: StatusEffects::empty(),
            basic_attack: profile.basic_attack,
            skills: profile.skills,
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn basic_attack(&self) -> Option<&Arc<AbilityDefinition>> {
        self.basic_attack.as_ref()
    }

    pub fn skills(&self) -> &[Arc<AbilityDefinition>] {
        &self.skills
    }

    // ========================================================================
    // Resources & flags
    // ========================================================================

    pub fn health(&self) -> f32 {
        self.health.current()
    }

    pub fn max_health(&self) -> f32 {
        self.health.maximum()
    }

    pub fn mana(&self) -> f32 {
        self.mana.current()
    }

    pub fn max_mana(&self) -> f32 {
        self.mana.maximum()
    }

    /// Health as a fraction of its maximum.
    pub fn health_ratio(&self) -> f32 {
        if self.health.maximum() <= 0.0 {
            return 0.0;
        }
        self.health.current() / self.health.maximum()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn defend(&mut self) {
        if self.alive {
            self.defending = true;
        }
    }

    pub fn clear_defend(&mut self) {
        self.defending = false;
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub fn base_attack(&self) -> f32 {
        self.attack
    }

    pub fn base_defense(&self) -> f32 {
        self.defense
    }

    pub fn base_speed(&self) -> i32 {
        self.speed
    }

    pub fn modified_attack(&self) -> f32 {
        self.attack * self.statuses.stat_modifier(StatKind::Attack)
    }

    pub fn modified_defense(&self) -> f32 {
        self.defense * self.statuses.stat_modifier(StatKind::Defense)
    }

    pub fn modified_speed(&self) -> i32 {
        (self.speed as f32 * self.statuses.stat_modifier(StatKind::Speed)).round() as i32
    }

    // ========================================================================
    // Damage pipeline
    // ========================================================================

    /// Applies one hit and reports what happened.
    ///
    /// Standard hits run, in order: barrier, defend, mark, shield absorb,
    /// evasion, fortify, defense subtraction (floor 1). Direct hits skip all
    /// of it and floor at 0. Reflection and trap cascades are reported, not
    /// applied; the caller owns the other combatants.
    pub fn take_damage(
        &mut self,
        hit: &Hit,
        rng: &mut dyn RngOracle,
        config: &BattleConfig,
    ) -> DamageReport {
        if !self.alive {
            return DamageReport::ignored();
        }

        let mut report = DamageReport::default();
        let amount = match hit.kind {
            HitKind::Direct => direct_damage(hit.amount),
            HitKind::Standard => match self.mitigate(hit.amount, rng, config, &mut report) {
                Some(amount) => amount,
                None => return report,
            },
        };

        report.dealt = self.health.drain(amount);
        if self.health.is_empty() {
            self.alive = false;
            self.defending = false;
            report.defeated = true;
            return report;
        }

        if hit.kind == HitKind::Standard && report.dealt > 0.0 {
            if let Some(attacker) = hit.attacker.filter(|attacker| *attacker != self.id) {
                if self.statuses.has(StatusEffectKind::Reflecting) {
                    report.reflect = Some((attacker, report.dealt * config.reflect_fraction));
                }
            }
            if let Some((key, _)) = self.statuses.first(StatusEffectKind::Trapped) {
                report.trap = self.statuses.remove(key).map(|effect| TrapSpring { effect });
            }
        }

        report
    }

    /// Defensive steps of a standard hit. `None` means the hit was negated.
    fn mitigate(
        &mut self,
        amount: f32,
        rng: &mut dyn RngOracle,
        config: &BattleConfig,
        report: &mut DamageReport,
    ) -> Option<f32> {
        if let Some((key, barrier)) = self.statuses.first_mut(StatusEffectKind::Barrier) {
            if barrier.decrement_magnitude() {
                self.statuses.remove(key);
            }
            report.negated = Some(Negation::Barrier);
            return None;
        }

        let mut damage = amount.max(0.0);

        if self.defending {
            damage *= config.defend_multiplier;
        }

        for mark in self.statuses.of_kind(StatusEffectKind::Marked) {
            damage *= mark.magnitude.max(1.0);
        }

        for key in self.statuses.keys() {
            if damage <= 0.0 {
                break;
            }
            let Some(shield) = self.statuses.get_mut(key) else {
                continue;
            };
            if shield.kind != StatusEffectKind::Shielded {
                continue;
            }
            let soaked = damage.min(shield.magnitude.max(0.0));
            shield.magnitude -= soaked;
            damage -= soaked;
            report.absorbed += soaked;
            if shield.magnitude <= 0.0 {
                self.statuses.remove(key);
            }
        }
        if let Some((_, evasion)) = self.statuses.first(StatusEffectKind::Evading) {
            let chance = evasion.magnitude;
            if rng.chance(chance) {
                report.negated = Some(Negation::Evaded);
                return None;
            }
        }

        if self.statuses.has(StatusEffectKind::Fortified) {
            damage *= BattleConfig::FORTIFY_FACTOR;
        }

        Some(calculate_damage(damage, self.modified_defense()))
    }

    // ========================================================================
    // Healing & revival
    // ========================================================================

    /// Heals up to `amount`. Returns the health actually restored; zero when
    /// dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive {
            return 0.0;
        }
        self.health.fill(amount)
    }

    /// Brings a dead combatant back with `fraction` of max health (at least
    /// one point). Returns false if already alive.
    pub fn revive(&mut self, fraction: f32) -> bool {
        if self.alive {
            return false;
        }
        let restored = (self.health.maximum() * fraction.clamp(0.0, 1.0)).max(1.0);
        self.health.set(restored);
        self.alive = !self.health.is_empty();
        self.alive
    }

    // ========================================================================
    // Mana
    // ========================================================================

    /// Spends exactly `amount` mana, or nothing if insufficient.
    pub fn consume_mana(&mut self, amount: f32) -> bool {
        self.mana.try_spend(amount)
    }

    /// Restores up to `amount` mana. Returns what was actually restored.
    pub fn restore_mana(&mut self, amount: f32) -> f32 {
        self.mana.fill(amount)
    }

    /// `percent` of max mana.
    pub fn mana_percent(&self, percent: f32) -> f32 {
        self.mana.percent_of_max(percent)
    }

    /// `percent` of max health.
    pub fn health_percent(&self, percent: f32) -> f32 {
        self.health.percent_of_max(percent)
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    pub fn statuses(&self) -> &StatusEffects {
        &self.statuses
    }

    pub fn has_status(&self, kind: StatusEffectKind) -> bool {
        self.statuses.has(kind)
    }

    /// Appends an effect. Returns `None` when the list is at capacity.
    pub fn apply_status(&mut self, effect: StatusEffect) -> Option<StatusKey> {
        self.statuses.push(effect)
    }

    pub fn remove_status(&mut self, key: StatusKey) -> Option<StatusEffect> {
        self.statuses.remove(key)
    }

    pub fn clear_statuses(&mut self) -> usize {
        self.statuses.clear()
    }

    /// Runs one turn-start pass over the effect list in order: each
    /// damage-over-time effect deals a direct hit, every effect loses one
    /// turn, expired ones are removed.
    pub fn process_status_effects(
        &mut self,
        rng: &mut dyn RngOracle,
        config: &BattleConfig,
    ) -> StatusTick {
        let mut tick = StatusTick::default();

        for key in self.statuses.keys() {
            let Some(effect) = self.statuses.get_mut(key).map(|effect| *effect) else {
                continue;
            };

            if let Some(dot) = effect.tick_damage(self.health.maximum()) {
                let report = self.take_damage(&Hit::direct(dot.amount, dot.element), rng, config);
                if report.dealt > 0.0 {
                    let dealt = TickDamage {
                        amount: report.dealt,
                        element: dot.element,
                    };
                    tick.damage.push((effect.kind, dealt));
                }
                tick.defeated |= report.defeated;
            }

            if let Some(effect) = self.statuses.get_mut(key) {
                effect.decrement_duration();
                if effect.is_expired() {
                    let kind = effect.kind;
                    self.statuses.remove(key);
                    tick.expired.push(kind);
                }
            }
        }

        tick
    }

    /// First effect in list order whose prevention roll succeeds.
    ///
    /// Evaluation stops at the first hit, so later effects consume no draws.
    pub fn preventing_effect(&self, rng: &mut dyn RngOracle) -> Option<StatusEffectKind> {
        self.statuses
            .iter()
            .find(|(_, effect)| effect.prevents_action(rng))
            .map(|(_, effect)| effect.kind)
    }
}
