//! Ability resolution.
//!
//! # Pipeline
//!
//! ```text
//! check_usable → pay costs → accuracy gate (offensive only)
//!     → resolve by category → self-status
//! ```
//!
//! Costs are paid before the accuracy gate, so a miss keeps them spent.
//! Every random roll goes through the context's oracle, one draw per
//! decision.

use tracing::debug;

use crate::action::ActionError;
use crate::combat::{CombatContext, Hit, raw_damage};
use crate::config::BattleConfig;
use crate::events::BattleEvent;
use crate::state::{CombatantId, StatusEffect, StatusEffectKind};

use super::{AbilityCategory, AbilityDefinition, ManaEffect, StatusRider, UtilityRegistry};

/// Tally of what an ability did to its targets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbilityEffects {
    /// Health removed from targets, summed over every hit.
    pub damage_dealt: f32,
    pub critical_hits: u32,
    pub healed: f32,
    pub statuses_applied: u32,
    pub statuses_resisted: u32,
    pub cleansed: u32,
    pub revived: Vec<CombatantId>,
}

/// Result of a resolution that passed every precondition.
#[derive(Clone, Debug, PartialEq)]
pub enum AbilityOutcome {
    /// The ability resolved.
    Resolved(AbilityEffects),
    /// A debuff whose every status roll failed.
    Resisted(AbilityEffects),
    /// The accuracy gate cancelled the action after costs were paid.
    Missed,
}

impl AbilityOutcome {
    pub fn effects(&self) -> Option<&AbilityEffects> {
        match self {
            Self::Resolved(effects) | Self::Resisted(effects) => Some(effects),
            Self::Missed => None,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Missed | Self::Resisted(_))
    }
}

/// Uses `ability` from `actor` on `targets`.
///
/// Precondition failures return `Err` with nothing mutated. Misses and
/// resisted statuses are `Ok` outcomes.
pub fn resolve(
    ability: &AbilityDefinition,
    actor: CombatantId,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    utilities: &UtilityRegistry,
) -> Result<AbilityOutcome, ActionError> {
    let user = ctx.roster.require(actor)?;
    ability.check_usable(user)?;
    let mana_cost = ability.mana_cost(user);
    let mana_restore = match ability.mana {
        ManaEffect::Restore(percent) => user.mana_percent(percent),
        _ => 0.0,
    };
    let health_cost = ability.health_cost(user);
    let blinded = user.has_status(StatusEffectKind::Blinded);

    debug!(%actor, ability = %ability.id, targets = targets.len(), "resolving ability");

    // ===== costs =====
    if mana_cost > 0.0 && !ctx.consume_mana(actor, mana_cost) {
        return Err(ActionError::InsufficientMana {
            required: mana_cost,
            available: ctx.roster.get(actor).map_or(0.0, |c| c.mana()),
        });
    }
    if mana_restore > 0.0 {
        ctx.restore_mana(actor, mana_restore);
    }
    if health_cost > 0.0 {
        ctx.deal(actor, Hit::direct(health_cost, ability.element), false);
    }

    // ===== accuracy gate =====
    if ability.category.is_offensive()
        && blinded
        && ctx.rng.chance(BattleConfig::ACCURACY_DOWN_MISS_CHANCE)
    {
        debug!(%actor, ability = %ability.id, "ability missed");
        ctx.events.emit(BattleEvent::AbilityMissed {
            actor,
            ability: ability.id.clone(),
        });
        return Ok(AbilityOutcome::Missed);
    }

    // ===== category =====
    let mut effects = AbilityEffects::default();
    match ability.category {
        AbilityCategory::BasicAttack => basic_attack(ability, actor, targets, ctx, &mut effects),
        AbilityCategory::DamageSkill => damage_skill(ability, actor, targets, ctx, &mut effects),
        AbilityCategory::HealSkill => heal_skill(ability, targets, ctx, &mut effects),
        AbilityCategory::BuffSkill => buff_skill(ability, targets, ctx, &mut effects),
        AbilityCategory::DebuffSkill => debuff_skill(ability, targets, ctx, &mut effects),
        AbilityCategory::ReviveSkill => revive_skill(ability, targets, ctx, &mut effects),
        AbilityCategory::UtilitySkill => match utilities.get(&ability.id) {
            Some(effect) => effects = effect.apply(ability, actor, targets, ctx),
            None => debug!(ability = %ability.id, "utility ability has no registered effect"),
        },
    }

    // ===== self status =====
    if let Some(status) = ability.self_status.filter(|s| s.duration > 0) {
        ctx.apply_status(
            actor,
            StatusEffect::new(status.kind, status.duration, status.magnitude),
        );
    }

    let resisted = ability.category == AbilityCategory::DebuffSkill
        && effects.statuses_applied == 0
        && effects.statuses_resisted > 0;
    if resisted {
        Ok(AbilityOutcome::Resisted(effects))
    } else {
        Ok(AbilityOutcome::Resolved(effects))
    }
}

fn living(ctx: &CombatContext<'_>, target: CombatantId) -> bool {
    ctx.roster.is_alive(target)
}

fn attack_of(ctx: &CombatContext<'_>, actor: CombatantId) -> f32 {
    ctx.roster.get(actor).map_or(0.0, |c| c.modified_attack())
}

fn basic_attack(
    ability: &AbilityDefinition,
    actor: CombatantId,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    for &target in targets {
        if !living(ctx, target) {
            continue;
        }
        let raw = raw_damage(ability.base_power, attack_of(ctx, actor));
        let report = ctx.deal(target, Hit::standard(raw, ability.element, actor), false);
        effects.damage_dealt += report.dealt;
    }
}

fn damage_skill(
    ability: &AbilityDefinition,
    actor: CombatantId,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    for _ in 0..ability.hit_count.max(1) {
        for &target in targets {
            if !living(ctx, target) {
                continue;
            }

            let mut raw = raw_damage(ability.base_power, attack_of(ctx, actor));
            let critical = match ability.crit {
                Some(crit) => ctx.rng.chance(crit.chance),
                None => false,
            };
            if let (true, Some(crit)) = (critical, ability.crit) {
                raw *= crit.multiplier;
                effects.critical_hits += 1;
            }

            let report = ctx.deal(target, Hit::standard(raw, ability.element, actor), critical);
            effects.damage_dealt += report.dealt;

            for rider in ability.status_riders() {
                if rider.chance <= 0.0 || !living(ctx, target) {
                    continue;
                }
                roll_rider(rider, 1.0, target, ctx, effects);
            }
        }
    }
}

fn heal_skill(
    ability: &AbilityDefinition,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    for &target in targets {
        if !living(ctx, target) {
            continue;
        }
        effects.healed += ctx.heal(target, ability.base_power);
        if ability.cleanse && ctx.clear_statuses(target) > 0 {
            effects.cleansed += 1;
        }
    }
}

fn buff_skill(
    ability: &AbilityDefinition,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    for &target in targets {
        if !living(ctx, target) {
            continue;
        }
        for rider in ability.status_riders() {
            let effect = StatusEffect::new(rider.kind, rider.duration, ability.base_power);
            if ctx.apply_status(target, effect) {
                effects.statuses_applied += 1;
            }
        }
    }
}

fn debuff_skill(
    ability: &AbilityDefinition,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    for &target in targets {
        if !living(ctx, target) {
            continue;
        }
        for rider in ability.status_riders() {
            roll_rider(rider, ability.base_power, target, ctx, effects);
        }
    }
}

fn revive_skill(
    ability: &AbilityDefinition,
    targets: &[CombatantId],
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    for &target in targets {
        if living(ctx, target) {
            continue;
        }
        if ctx.revive(target, ability.base_power / 100.0) {
            effects.revived.push(target);
        }
    }
}

/// One independent chance roll for one status slot on one target.
fn roll_rider(
    rider: &StatusRider,
    magnitude: f32,
    target: CombatantId,
    ctx: &mut CombatContext<'_>,
    effects: &mut AbilityEffects,
) {
    if ctx.rng.chance(rider.chance) {
        let effect = StatusEffect::new(rider.kind, rider.duration, magnitude);
        if ctx.apply_status(target, effect) {
            effects.statuses_applied += 1;
            return;
        }
    } else {
        ctx.events.emit(BattleEvent::StatusResisted {
            target,
            kind: rider.kind,
        });
    }
    effects.statuses_resisted += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{SelfStatus, TargetPattern, UtilityEffect};
    use crate::env::ScriptedRng;
    use crate::state::{CombatantProfile, Element, Roster, Side};

    struct Setup {
        roster: Roster,
        hero: CombatantId,
        foe: CombatantId,
        ally: CombatantId,
        config: BattleConfig,
        events: Vec<BattleEvent>,
    }

    impl Setup {
        fn new() -> Self {
            let config = BattleConfig::default();
            let mut roster = Roster::new();
            let hero = roster
                .spawn(Side::Party, CombatantProfile::new("hero", 100.0, 20.0, 25.0, 5.0, 10), &config)
                .unwrap();
            let ally = roster
                .spawn(Side::Party, CombatantProfile::new("ally", 80.0, 20.0, 10.0, 5.0, 8), &config)
                .unwrap();
            let foe = roster
                .spawn(Side::Enemy, CombatantProfile::new("foe", 100.0, 20.0, 10.0, 10.0, 9), &config)
                .unwrap();
            Self {
                roster,
                hero,
                foe,
                ally,
                config,
                events: Vec::new(),
            }
        }

        fn run(
            &mut self,
            ability: &AbilityDefinition,
            targets: &[CombatantId],
            rng: &mut ScriptedRng,
        ) -> Result<AbilityOutcome, ActionError> {
            let mut ctx = CombatContext::new(&mut self.roster, rng, &self.config, &mut self.events);
            resolve(ability, self.hero, targets, &mut ctx, &UtilityRegistry::new())
        }
    }

    fn strike() -> AbilityDefinition {
        AbilityDefinition::new("strike", "Strike", AbilityCategory::BasicAttack, TargetPattern::SingleEnemy)
            .with_power(10.0)
            .with_mana(ManaEffect::Restore(20.0))
    }

    #[test]
    fn basic_attack_scenario() {
        let mut setup = Setup::new();
        let mut rng = ScriptedRng::always(0.5);
        let foe = setup.foe;
        let outcome = setup.run(&strike(), &[foe], &mut rng).unwrap();

        assert_eq!(outcome.effects().unwrap().damage_dealt, 25.0);
        assert_eq!(setup.roster.get(foe).unwrap().health(), 75.0);
    }

    #[test]
    fn basic_attack_restores_mana() {
        let mut setup = Setup::new();
        let hero = setup.hero;
        setup.roster.get_mut(hero).unwrap().consume_mana(20.0);
        let mut rng = ScriptedRng::always(0.5);
        let foe = setup.foe;
        setup.run(&strike(), &[foe], &mut rng).unwrap();
        assert_eq!(setup.roster.get(hero).unwrap().mana(), 4.0);
    }

    #[test]
    fn certain_debuff_always_lands() {
        let mut setup = Setup::new();
        let foe = setup.foe;
        let hex = AbilityDefinition::new("hex", "Hex", AbilityCategory::DebuffSkill, TargetPattern::SingleEnemy)
            .with_power(0.8)
            .with_status(StatusRider::new(StatusEffectKind::DefenseDebuff, 1.0, 3));

        for deviate in [0.0, 0.5, 0.999] {
            let mut rng = ScriptedRng::always(deviate);
            setup.run(&hex, &[foe], &mut rng).unwrap();
        }
        let statuses = setup.roster.get(foe).unwrap().statuses();
        assert_eq!(statuses.of_kind(StatusEffectKind::DefenseDebuff).count(), 3);
    }

    #[test]
    fn failed_debuff_rolls_report_resisted() {
        let mut setup = Setup::new();
        let foe = setup.foe;
        let hex = AbilityDefinition::new("hex", "Hex", AbilityCategory::DebuffSkill, TargetPattern::SingleEnemy)
            .with_status(StatusRider::new(StatusEffectKind::Weakened, 0.3, 3))
            .with_status(StatusRider::new(StatusEffectKind::Marked, 0.3, 3));
        let mut rng = ScriptedRng::always(0.9);

        let outcome = setup.run(&hex, &[foe], &mut rng).unwrap();
        assert!(matches!(outcome, AbilityOutcome::Resisted(ref e) if e.statuses_resisted == 2));
        assert!(setup.roster.get(foe).unwrap().statuses().is_empty());
    }

    #[test]
    fn multi_hit_rolls_crit_per_hit() {
        let mut setup = Setup::new();
        let foe = setup.foe;
        let flurry = AbilityDefinition::new("flurry", "Flurry", AbilityCategory::DamageSkill, TargetPattern::SingleEnemy)
            .with_hits(3)
            .with_crit(0.5, 2.0);
        // Crit rolls: hit, miss, hit.
        let mut rng = ScriptedRng::new(vec![0.1, 0.9, 0.1]);

        let outcome = setup.run(&flurry, &[foe], &mut rng).unwrap();
        let effects = outcome.effects().unwrap();
        assert_eq!(effects.critical_hits, 2);
        // raw 25, crit 50, defense 10: 40 + 15 + 40
        assert_eq!(effects.damage_dealt, 95.0);
    }

    #[test]
    fn accuracy_down_misses_without_refund() {
        let mut setup = Setup::new();
        let (hero, foe) = (setup.hero, setup.foe);
        setup
            .roster
            .get_mut(hero)
            .unwrap()
            .apply_status(StatusEffect::with_duration(StatusEffectKind::Blinded, 2));
        let bolt = AbilityDefinition::new("bolt", "Bolt", AbilityCategory::DamageSkill, TargetPattern::SingleEnemy)
            .with_power(10.0)
            .with_mana(ManaEffect::Cost(50.0))
            .with_self_status(SelfStatus {
                kind: StatusEffectKind::AttackBuff,
                duration: 2,
                magnitude: 1.2,
            });
        let mut rng = ScriptedRng::always(0.1);

        let outcome = setup.run(&bolt, &[foe], &mut rng).unwrap();
        assert_eq!(outcome, AbilityOutcome::Missed);
        assert_eq!(setup.roster.get(hero).unwrap().mana(), 10.0);
        assert_eq!(setup.roster.get(foe).unwrap().health(), 100.0);
        assert!(!setup.roster.get(hero).unwrap().has_status(StatusEffectKind::AttackBuff));
    }

    #[test]
    fn precondition_failure_mutates_nothing() {
        let mut setup = Setup::new();
        let (hero, foe) = (setup.hero, setup.foe);
        setup.roster.get_mut(hero).unwrap().consume_mana(15.0);
        let nova = AbilityDefinition::new("nova", "Nova", AbilityCategory::DamageSkill, TargetPattern::AllEnemies)
            .with_power(50.0)
            .with_mana(ManaEffect::Cost(50.0));
        let mut rng = ScriptedRng::always(0.5);

        let err = setup.run(&nova, &[foe], &mut rng).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientMana { .. }));
        assert_eq!(setup.roster.get(hero).unwrap().mana(), 5.0);
        assert_eq!(setup.roster.get(foe).unwrap().health(), 100.0);
        assert!(setup.events.is_empty());
    }

    #[test]
    fn hp_cost_is_a_direct_hit() {
        let mut setup = Setup::new();
        let (hero, foe) = (setup.hero, setup.foe);
        let reckless = AbilityDefinition::new("reckless", "Reckless", AbilityCategory::DamageSkill, TargetPattern::SingleEnemy)
            .with_power(10.0)
            .with_hp_cost(10.0);
        let mut rng = ScriptedRng::always(0.5);
        setup.run(&reckless, &[foe], &mut rng).unwrap();
        // Defense 5 does not reduce the self-inflicted cost.
        assert_eq!(setup.roster.get(hero).unwrap().health(), 90.0);
    }

    #[test]
    fn heal_with_cleanse_clears_statuses() {
        let mut setup = Setup::new();
        let ally = setup.ally;
        {
            let c = setup.roster.get_mut(ally).unwrap();
            c.take_damage(&Hit::direct(50.0, Element::Neutral), &mut ScriptedRng::always(0.5), &BattleConfig::default());
            c.apply_status(StatusEffect::with_duration(StatusEffectKind::Poisoned, 3));
        }
        let mend = AbilityDefinition::new("mend", "Mend", AbilityCategory::HealSkill, TargetPattern::SingleAlly)
            .with_power(40.0)
            .with_cleanse();
        let mut rng = ScriptedRng::always(0.5);

        let outcome = setup.run(&mend, &[ally], &mut rng).unwrap();
        let effects = outcome.effects().unwrap();
        assert_eq!(effects.healed, 40.0);
        assert_eq!(effects.cleansed, 1);
        assert!(setup.roster.get(ally).unwrap().statuses().is_empty());
    }

    #[test]
    fn buff_magnitude_is_base_power() {
        let mut setup = Setup::new();
        let ally = setup.ally;
        let rally = AbilityDefinition::new("rally", "Rally", AbilityCategory::BuffSkill, TargetPattern::AllAllies)
            .with_power(1.5)
            .with_status(StatusRider::new(StatusEffectKind::AttackBuff, 0.0, 2));
        let mut rng = ScriptedRng::always(0.5);
        setup.run(&rally, &[ally], &mut rng).unwrap();
        assert_eq!(setup.roster.get(ally).unwrap().modified_attack(), 15.0);
    }

    #[test]
    fn revive_restores_percent_of_max() {
        let mut setup = Setup::new();
        let ally = setup.ally;
        setup.roster.get_mut(ally).unwrap().take_damage(
            &Hit::direct(500.0, Element::Neutral),
            &mut ScriptedRng::always(0.5),
            &BattleConfig::default(),
        );
        let raise = AbilityDefinition::new("raise", "Raise", AbilityCategory::ReviveSkill, TargetPattern::SingleAlly)
            .with_power(50.0);
        let mut rng = ScriptedRng::always(0.5);

        let outcome = setup.run(&raise, &[ally], &mut rng).unwrap();
        assert_eq!(outcome.effects().unwrap().revived, vec![ally]);
        assert_eq!(setup.roster.get(ally).unwrap().health(), 40.0);
    }

    struct Drain;

    impl UtilityEffect for Drain {
        fn apply(
            &self,
            ability: &AbilityDefinition,
            actor: CombatantId,
            targets: &[CombatantId],
            ctx: &mut CombatContext<'_>,
        ) -> AbilityEffects {
            let mut effects = AbilityEffects::default();
            for &target in targets {
                let report = ctx.deal(target, Hit::direct(ability.base_power, ability.element), false);
                effects.damage_dealt += report.dealt;
                effects.healed += ctx.heal(actor, report.dealt);
            }
            effects
        }
    }

    #[test]
    fn utility_skills_dispatch_to_registered_effect() {
        let mut setup = Setup::new();
        let (hero, foe) = (setup.hero, setup.foe);
        setup
            .roster
            .get_mut(hero)
            .unwrap()
            .take_damage(&Hit::direct(30.0, Element::Neutral), &mut ScriptedRng::always(0.5), &BattleConfig::default());
        let drain = AbilityDefinition::new("drain", "Drain", AbilityCategory::UtilitySkill, TargetPattern::SingleEnemy)
            .with_power(12.0);
        let mut utilities = UtilityRegistry::new();
        utilities.register("drain", Drain);

        let mut rng = ScriptedRng::always(0.5);
        let mut ctx = CombatContext::new(&mut setup.roster, &mut rng, &setup.config, &mut setup.events);
        let outcome = resolve(&drain, hero, &[foe], &mut ctx, &utilities).unwrap();

        assert_eq!(outcome.effects().unwrap().damage_dealt, 12.0);
        assert_eq!(setup.roster.get(hero).unwrap().health(), 82.0);
    }

    #[test]
    fn unregistered_utility_is_a_no_op() {
        let mut setup = Setup::new();
        let foe = setup.foe;
        let odd = AbilityDefinition::new("odd", "Odd", AbilityCategory::UtilitySkill, TargetPattern::SingleEnemy);
        let mut rng = ScriptedRng::always(0.5);
        let outcome = setup.run(&odd, &[foe], &mut rng).unwrap();
        assert_eq!(outcome, AbilityOutcome::Resolved(AbilityEffects::default()));
    }
}
