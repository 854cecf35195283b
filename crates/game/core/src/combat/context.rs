//! Roster-level mutation with cascades and event emission.
//!
//! [`Combatant`](crate::state::Combatant) operations only touch one
//! combatant and report what happened. `CombatContext` is the layer that owns
//! the whole roster for the duration of a call: it applies reflection and
//! trap cascades to other combatants and turns every state change into a
//! [`BattleEvent`].

use tracing::debug;

use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::events::{BattleEvent, EventSink};
use crate::state::{CombatantId, Element, Roster, StatusEffect, StatusEffectKind, StatusTick};
use crate::stats::ResourceKind;

use super::{DamageReport, Hit, TrapSpring};

/// Mutable view over everything a resolution step may touch.
pub struct CombatContext<'a> {
    pub roster: &'a mut Roster,
    pub rng: &'a mut dyn RngOracle,
    pub config: &'a BattleConfig,
    pub events: &'a mut dyn EventSink,
}

impl<'a> CombatContext<'a> {
    pub fn new(
        roster: &'a mut Roster,
        rng: &'a mut dyn RngOracle,
        config: &'a BattleConfig,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            roster,
            rng,
            config,
            events,
        }
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Applies a hit to `target`, then any reflection and trap it triggers.
    ///
    /// Dead or unknown targets are ignored.
    pub fn deal(&mut self, target: CombatantId, hit: Hit, critical: bool) -> DamageReport {
        let Some(victim) = self.roster.get_mut(target) else {
            return DamageReport::ignored();
        };
        if !victim.is_alive() {
            return DamageReport::ignored();
        }

        let report = victim.take_damage(&hit, &mut *self.rng, self.config);
        self.record_damage(target, &hit, &report, critical);

        if let Some((attacker, amount)) = report.reflect {
            debug!(%target, %attacker, amount, "reflecting damage");
            self.deal(attacker, Hit::direct(amount, Element::Neutral), false);
        }
        if let Some(trap) = report.trap {
            self.spring_trap(target, trap);
        }

        report
    }

    fn record_damage(
        &mut self,
        target: CombatantId,
        hit: &Hit,
        report: &DamageReport,
        critical: bool,
    ) {
        if let Some(reason) = report.negated {
            debug!(%target, ?reason, "hit negated");
            self.events.emit(BattleEvent::HitNegated { target, reason });
            return;
        }

        self.events.emit(BattleEvent::DamageDealt {
            target,
            amount: report.dealt,
            element: hit.element,
            direct: hit.is_direct(),
            critical,
        });
        self.emit_health(target);

        if report.defeated {
            debug!(%target, "combatant defeated");
            self.events.emit(BattleEvent::CombatantDefeated { target });
        }
    }

    /// Bonus hit on the victim, then the same trap spreads to each living
    /// ally of the victim that is not already trapped.
    fn spring_trap(&mut self, victim: CombatantId, trap: TrapSpring) {
        self.events.emit(BattleEvent::StatusRemoved {
            target: victim,
            kind: StatusEffectKind::Trapped,
        });

        let bonus = Hit::direct(trap.effect.magnitude, self.config.trap_element);
        self.deal(victim, bonus, false);

        let Some(side) = self.roster.side_of(victim) else {
            return;
        };
        let spread_to: Vec<CombatantId> = self
            .roster
            .living_on(side)
            .filter(|ally| ally.id() != victim && !ally.has_status(StatusEffectKind::Trapped))
            .map(|ally| ally.id())
            .collect();

        for ally in spread_to {
            debug!(%victim, %ally, "trap spreads");
            self.apply_status(ally, trap.effect);
        }
    }

    // ========================================================================
    // Healing, revival, mana
    // ========================================================================

    /// Heals a living target. Returns the health actually restored.
    pub fn heal(&mut self, target: CombatantId, amount: f32) -> f32 {
        let Some(combatant) = self.roster.get_mut(target) else {
            return 0.0;
        };
        let healed = combatant.heal(amount);
        if combatant.is_alive() {
            self.events.emit(BattleEvent::Healed {
                target,
                amount: healed,
            });
            self.emit_health(target);
        }
        healed
    }

    /// Revives a dead target with `fraction` of max health.
    pub fn revive(&mut self, target: CombatantId, fraction: f32) -> bool {
        let Some(combatant) = self.roster.get_mut(target) else {
            return false;
        };
        if !combatant.revive(fraction) {
            return false;
        }
        let health = combatant.health();
        debug!(%target, health, "combatant revived");
        self.events
            .emit(BattleEvent::CombatantRevived { target, health });
        self.emit_health(target);
        true
    }

    /// Restores mana. Returns the amount actually restored.
    pub fn restore_mana(&mut self, target: CombatantId, amount: f32) -> f32 {
        let Some(combatant) = self.roster.get_mut(target) else {
            return 0.0;
        };
        let restored = combatant.restore_mana(amount);
        self.emit_mana(target);
        restored
    }

    /// Spends exactly `amount` mana, or nothing if insufficient.
    pub fn consume_mana(&mut self, target: CombatantId, amount: f32) -> bool {
        let Some(combatant) = self.roster.get_mut(target) else {
            return false;
        };
        if !combatant.consume_mana(amount) {
            return false;
        }
        self.emit_mana(target);
        true
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    /// Applies a status effect to a living target. Returns false when the
    /// target is dead, unknown, or already at capacity.
    pub fn apply_status(&mut self, target: CombatantId, effect: StatusEffect) -> bool {
        let Some(combatant) = self.roster.get_mut(target) else {
            return false;
        };
        if !combatant.is_alive() {
            return false;
        }
        if combatant.apply_status(effect).is_none() {
            debug!(%target, kind = %effect.kind, "status list full");
            self.events.emit(BattleEvent::StatusResisted {
                target,
                kind: effect.kind,
            });
            return false;
        }
        self.events.emit(BattleEvent::StatusApplied {
            target,
            kind: effect.kind,
            duration: effect.remaining_turns,
            magnitude: effect.magnitude,
        });
        true
    }

    /// Removes every status effect. Returns how many were removed.
    pub fn clear_statuses(&mut self, target: CombatantId) -> usize {
        let Some(combatant) = self.roster.get_mut(target) else {
            return 0;
        };
        let count = combatant.clear_statuses();
        if count > 0 {
            self.events
                .emit(BattleEvent::StatusesCleared { target, count });
        }
        count
    }

    /// Turn-start status pass for `target`.
    pub fn process_statuses(&mut self, target: CombatantId) -> StatusTick {
        let Some(combatant) = self.roster.get_mut(target) else {
            return StatusTick::default();
        };
        let tick = combatant.process_status_effects(&mut *self.rng, self.config);

        for (kind, dot) in &tick.damage {
            debug!(%target, %kind, amount = dot.amount, "status tick");
            self.events.emit(BattleEvent::DamageDealt {
                target,
                amount: dot.amount,
                element: dot.element,
                direct: true,
                critical: false,
            });
        }
        if !tick.damage.is_empty() {
            self.emit_health(target);
        }
        for kind in &tick.expired {
            self.events.emit(BattleEvent::StatusRemoved {
                target,
                kind: *kind,
            });
        }
        if tick.defeated {
            self.events.emit(BattleEvent::CombatantDefeated { target });
        }
        tick
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    fn emit_health(&mut self, target: CombatantId) {
        if let Some(c) = self.roster.get(target) {
            self.events.emit(BattleEvent::ResourceChanged {
                target,
                resource: ResourceKind::Hp,
                current: c.health(),
                max: c.max_health(),
            });
        }
    }

    fn emit_mana(&mut self, target: CombatantId) {
        if let Some(c) = self.roster.get(target) {
            self.events.emit(BattleEvent::ResourceChanged {
                target,
                resource: ResourceKind::Mp,
                current: c.mana(),
                max: c.max_mana(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{CombatantProfile, Side};

    fn roster() -> (Roster, [CombatantId; 3]) {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let hero = roster
            .spawn(Side::Party, CombatantProfile::new("hero", 100.0, 10.0, 20.0, 0.0, 10), &config)
            .unwrap();
        let a = roster
            .spawn(Side::Enemy, CombatantProfile::new("a", 100.0, 10.0, 5.0, 0.0, 10), &config)
            .unwrap();
        let b = roster
            .spawn(Side::Enemy, CombatantProfile::new("b", 100.0, 10.0, 5.0, 0.0, 10), &config)
            .unwrap();
        (roster, [hero, a, b])
    }

    #[test]
    fn reflection_hits_the_attacker_directly() {
        let (mut roster, [hero, a, _]) = roster();
        roster
            .get_mut(a)
            .unwrap()
            .apply_status(StatusEffect::with_duration(StatusEffectKind::Reflecting, 3));
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::always(0.5);
        let mut events = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);

        ctx.deal(a, Hit::standard(50.0, Element::Neutral, hero), false);

        assert_eq!(roster.get(a).unwrap().health(), 50.0);
        assert!((roster.get(hero).unwrap().health() - 85.0).abs() < 1e-3);
    }

    #[test]
    fn trap_springs_then_spreads_to_untrapped_allies() {
        let (mut roster, [hero, a, b]) = roster();
        roster
            .get_mut(a)
            .unwrap()
            .apply_status(StatusEffect::new(StatusEffectKind::Trapped, 2, 10.0));
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::always(0.5);
        let mut events = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);

        ctx.deal(a, Hit::standard(20.0, Element::Neutral, hero), false);

        let a_state = roster.get(a).unwrap();
        assert_eq!(a_state.health(), 70.0);
        assert!(!a_state.has_status(StatusEffectKind::Trapped));
        assert!(roster.get(b).unwrap().has_status(StatusEffectKind::Trapped));
        assert!(!roster.get(hero).unwrap().has_status(StatusEffectKind::Trapped));
        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::DamageDealt { target, direct: true, element: Element::Earth, .. } if *target == a
        )));
    }

    #[test]
    fn defeat_is_announced_once() {
        let (mut roster, [hero, a, _]) = roster();
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::always(0.5);
        let mut events = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);

        ctx.deal(a, Hit::standard(500.0, Element::Fire, hero), false);
        ctx.deal(a, Hit::standard(500.0, Element::Fire, hero), false);

        let defeats = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::CombatantDefeated { .. }))
            .count();
        assert_eq!(defeats, 1);
    }

    #[test]
    fn statuses_are_not_applied_to_the_dead() {
        let (mut roster, [hero, a, _]) = roster();
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::always(0.5);
        let mut events = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);

        ctx.deal(a, Hit::standard(500.0, Element::Fire, hero), false);
        assert!(!ctx.apply_status(a, StatusEffect::with_duration(StatusEffectKind::Poisoned, 2)));
    }
}
