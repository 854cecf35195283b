//! Priority-list AI for party and enemy combatants.

use std::sync::Arc;

use battle_core::{
    AbilityCategory, AbilityDefinition, Action, Combatant, CombatantId, PcgRng, Roster,
    StatusEffectKind, TargetPattern, valid_targets,
};

use crate::api::{ActionProvider, BattleView, Result};

/// Health ratio below which an ally counts as badly hurt.
const DEFAULT_HEAL_THRESHOLD: f32 = 0.4;

/// Simple rule-based controller.
///
/// Each turn the first applicable rule wins:
///
/// 1. Revive a fallen ally with a usable revive skill.
/// 2. Heal the most hurt ally below the heal threshold, with a heal skill or
///    a configured healing item.
/// 3. Cast a usable buff whose status the actor does not already carry.
/// 4. Use the strongest affordable damage skill.
/// 5. Cast a usable debuff the chosen target does not already carry.
/// 6. Basic attack (the character's own if it has one).
///
/// Single-target picks focus the living enemy with the least health.
/// Random targeting draws from the provider's own seeded generator, so a
/// given seed always plays the same way.
#[derive(Debug, Clone)]
pub struct BasicAiProvider {
    rng: PcgRng,
    heal_threshold: f32,
    healing_items: Vec<String>,
}

impl BasicAiProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: PcgRng::seeded(seed),
            heal_threshold: DEFAULT_HEAL_THRESHOLD,
            healing_items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_heal_threshold(mut self, threshold: f32) -> Self {
        self.heal_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Item ids the provider may use on hurt allies, in preference order.
    #[must_use]
    pub fn with_healing_item(mut self, item_id: impl Into<String>) -> Self {
        self.healing_items.push(item_id.into());
        self
    }

    fn decide(&mut self, me: &Combatant, view: &BattleView<'_>) -> Option<Action> {
        let actor = me.id();
        let usable: Vec<&Arc<AbilityDefinition>> =
            me.skills().iter().filter(|ability| ability.can_use(me)).collect();
        let find = |category: AbilityCategory| {
            usable
                .iter()
                .find(|ability| ability.category == category)
                .map(|ability| Arc::clone(ability))
        };

        if let Some(revive) = find(AbilityCategory::ReviveSkill)
            && let Some(fallen) = view
                .roster
                .on_side(me.side())
                .find(|ally| !ally.is_alive())
                .map(Combatant::id)
        {
            tracing::debug!(%actor, target = %fallen, "AI reviving ally");
            return Some(Action::skill(actor, revive, vec![fallen]));
        }

        if let Some(hurt) = most_hurt(view.roster, me, self.heal_threshold) {
            if let Some(heal) = find(AbilityCategory::HealSkill) {
                let targets = if heal.target.is_single() {
                    vec![hurt]
                } else {
                    self.targets(view.roster, actor, heal.target)
                };
                tracing::debug!(%actor, target = %hurt, "AI healing");
                return Some(Action::skill(actor, heal, targets));
            }
            if let Some(inventory) = view.inventory
                && let Some(item) = self.healing_items.iter().find(|id| inventory.has_item(id))
            {
                tracing::debug!(%actor, target = %hurt, item = %item, "AI using healing item");
                return Some(Action::item(actor, item.clone(), vec![hurt]));
            }
        }

        for buff in usable
            .iter()
            .filter(|ability| ability.category == AbilityCategory::BuffSkill)
        {
            let missing = buff
                .primary_status
                .is_some_and(|rider| !me.has_status(rider.kind));
            if missing {
                let targets = self.targets(view.roster, actor, buff.target);
                if !targets.is_empty() {
                    return Some(Action::skill(actor, Arc::clone(buff), targets));
                }
            }
        }

        let strongest = usable
            .iter()
            .filter(|ability| ability.category == AbilityCategory::DamageSkill)
            .max_by(|a, b| damage_weight(a).total_cmp(&damage_weight(b)));
        if let Some(skill) = strongest {
            let targets = self.targets(view.roster, actor, skill.target);
            if !targets.is_empty() {
                return Some(Action::skill(actor, Arc::clone(skill), targets));
            }
        }

        for debuff in usable
            .iter()
            .filter(|ability| ability.category == AbilityCategory::DebuffSkill)
        {
            let targets = self.targets(view.roster, actor, debuff.target);
            let fresh = debuff.primary_status.is_some_and(|rider| {
                targets
                    .iter()
                    .any(|&target| !carries(view.roster, target, rider.kind))
            });
            if fresh {
                return Some(Action::skill(actor, Arc::clone(debuff), targets));
            }
        }

        match me.basic_attack().filter(|ability| ability.can_use(me)) {
            Some(basic) => {
                let targets = self.targets(view.roster, actor, basic.target);
                (!targets.is_empty()).then(|| Action::attack_with(actor, Arc::clone(basic), targets))
            }
            None => self
                .targets(view.roster, actor, TargetPattern::SingleEnemy)
                .first()
                .map(|&target| Action::attack(actor, target)),
        }
    }

    /// Concrete targets for `pattern`: weakest for single enemies, most hurt
    /// for single allies, everyone for group patterns.
    fn targets(&mut self, roster: &Roster, actor: CombatantId, pattern: TargetPattern) -> Vec<CombatantId> {
        let pool = valid_targets(roster, actor, pattern, &mut self.rng);
        let health = |id: &CombatantId| roster.get(*id).map_or(f32::MAX, |c| c.health_ratio());
        match pattern {
            TargetPattern::SingleEnemy | TargetPattern::SingleAlly => pool
                .into_iter()
                .min_by(|a, b| health(a).total_cmp(&health(b)))
                .into_iter()
                .collect(),
            _ => pool,
        }
    }
}

impl ActionProvider for BasicAiProvider {
    fn provide_action(&mut self, actor: CombatantId, view: &BattleView<'_>) -> Result<Action> {
        let me = view.roster.require(actor)?;
        let action = self.decide(me, view).unwrap_or_else(|| {
            tracing::warn!(%actor, "AI found no usable action, defending");
            Action::defend(actor)
        });
        tracing::debug!(%actor, kind = %action.kind, "AI chose action");
        Ok(action)
    }
}

fn damage_weight(ability: &AbilityDefinition) -> f32 {
    ability.base_power * ability.hit_count as f32
}

fn carries(roster: &Roster, target: CombatantId, kind: StatusEffectKind) -> bool {
    roster.get(target).is_some_and(|c| c.has_status(kind))
}

/// Living ally of `me` (including `me`) with the lowest health ratio below
/// `threshold`.
fn most_hurt(roster: &Roster, me: &Combatant, threshold: f32) -> Option<CombatantId> {
    roster
        .living_on(me.side())
        .filter(|ally| ally.health_ratio() < threshold)
        .min_by(|a, b| a.health_ratio().total_cmp(&b.health_ratio()))
        .map(Combatant::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActionKind, BattleConfig, CombatantProfile, Hit, ManaEffect, ScriptedRng, Side};

    struct Table {
        roster: Roster,
        config: BattleConfig,
        healer: CombatantId,
        fighter: CombatantId,
        weak_foe: CombatantId,
        strong_foe: CombatantId,
    }

    fn table() -> Table {
        let config = BattleConfig::default();
        let mend = Arc::new(
            AbilityDefinition::new("mend", "Mend", AbilityCategory::HealSkill, TargetPattern::SingleAlly)
                .with_power(30.0)
                .with_mana(ManaEffect::Cost(30.0)),
        );
        let bolt = Arc::new(
            AbilityDefinition::new("bolt", "Bolt", AbilityCategory::DamageSkill, TargetPattern::SingleEnemy)
                .with_power(20.0)
                .with_mana(ManaEffect::Cost(25.0)),
        );
        let jab = Arc::new(
            AbilityDefinition::new("jab", "Jab", AbilityCategory::BasicAttack, TargetPattern::SingleEnemy)
                .with_power(10.0)
                .with_mana(ManaEffect::Restore(20.0)),
        );

        let mut roster = Roster::new();
        let healer = roster
            .spawn(
                Side::Party,
                CombatantProfile::new("healer", 80.0, 30.0, 10.0, 5.0, 12)
                    .with_basic_attack(Arc::clone(&jab))
                    .with_skill(mend),
                &config,
            )
            .unwrap();
        let fighter = roster
            .spawn(
                Side::Party,
                CombatantProfile::new("fighter", 100.0, 20.0, 25.0, 10.0, 10)
                    .with_basic_attack(jab)
                    .with_skill(bolt),
                &config,
            )
            .unwrap();
        let weak_foe = roster
            .spawn(Side::Enemy, CombatantProfile::new("weak", 100.0, 0.0, 10.0, 5.0, 8), &config)
            .unwrap();
        let strong_foe = roster
            .spawn(Side::Enemy, CombatantProfile::new("strong", 100.0, 0.0, 10.0, 5.0, 8), &config)
            .unwrap();

        Table {
            roster,
            config,
            healer,
            fighter,
            weak_foe,
            strong_foe,
        }
    }

    fn wound(table: &mut Table, id: CombatantId, amount: f32) {
        let config = table.config.clone();
        table.roster.get_mut(id).unwrap().take_damage(
            &Hit::direct(amount, battle_core::Element::Neutral),
            &mut ScriptedRng::always(0.9),
            &config,
        );
    }

    fn choose(table: &Table, ai: &mut BasicAiProvider, actor: CombatantId) -> Action {
        let view = BattleView {
            roster: &table.roster,
            config: &table.config,
            inventory: None,
            round: 1,
        };
        ai.provide_action(actor, &view).unwrap()
    }

    #[test]
    fn heals_a_badly_hurt_ally() {
        let mut table = table();
        let fighter = table.fighter;
        wound(&mut table, fighter, 70.0);

        let action = choose(&table, &mut BasicAiProvider::new(1), table.healer);
        assert_eq!(action.kind, ActionKind::Skill);
        assert_eq!(action.ability.unwrap().id, "mend");
        assert_eq!(action.targets, vec![table.fighter]);
    }

    #[test]
    fn focuses_the_weakest_enemy_with_its_best_skill() {
        let mut table = table();
        let weak_foe = table.weak_foe;
        wound(&mut table, weak_foe, 40.0);

        let action = choose(&table, &mut BasicAiProvider::new(1), table.fighter);
        assert_eq!(action.ability.unwrap().id, "bolt");
        assert_eq!(action.targets, vec![table.weak_foe]);
    }

    #[test]
    fn falls_back_to_basic_attack_without_mana() {
        let mut table = table();
        table.roster.get_mut(table.fighter).unwrap().consume_mana(20.0);

        let action = choose(&table, &mut BasicAiProvider::new(1), table.fighter);
        assert_eq!(action.kind, ActionKind::Attack);
        assert_eq!(action.ability.unwrap().id, "jab");
        assert_eq!(action.targets.len(), 1);
        assert!([table.weak_foe, table.strong_foe].contains(&action.targets[0]));
    }

    #[test]
    fn abilityless_enemy_uses_the_fallback_attack() {
        let table = table();
        let action = choose(&table, &mut BasicAiProvider::new(1), table.weak_foe);
        assert_eq!(action.kind, ActionKind::Attack);
        assert!(action.ability.is_none());
        assert_eq!(action.targets, vec![table.healer]);
    }
}
