//! Target selection.
//!
//! Controllers ask [`valid_targets`] which combatants an ability pattern may
//! address. The executor applies the confusion override separately, since it
//! replaces whatever the controller chose.

use crate::ability::TargetPattern;
use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::state::{CombatantId, Roster, StatusEffectKind};

/// Combatants `actor` may target with `pattern`.
///
/// - Ally patterns select the actor's living side, enemy patterns the
///   opposing living side.
/// - A taunting enemy forces single-enemy selection onto itself.
/// - `SelfOnly` is always exactly the actor.
/// - `Random` draws one uniformly from the living enemies.
///
/// An unknown or dead actor has no targets.
pub fn valid_targets(
    roster: &Roster,
    actor: CombatantId,
    pattern: TargetPattern,
    rng: &mut dyn RngOracle,
) -> Vec<CombatantId> {
    let Some(side) = roster.get(actor).filter(|c| c.is_alive()).map(|c| c.side()) else {
        return Vec::new();
    };

    if pattern == TargetPattern::SelfOnly {
        return vec![actor];
    }

    let pool_side = if pattern.targets_allies() {
        side
    } else {
        side.opposite()
    };
    let pool = roster.living_ids_on(pool_side);

    match pattern {
        TargetPattern::SingleEnemy => match taunting(roster, &pool) {
            Some(taunter) => vec![taunter],
            None => pool,
        },
        TargetPattern::Random => {
            if pool.is_empty() {
                return pool;
            }
            vec![pool[rng.index(pool.len())]]
        }
        _ => pool,
    }
}

fn taunting(roster: &Roster, pool: &[CombatantId]) -> Option<CombatantId> {
    pool.iter().copied().find(|&id| {
        roster
            .get(id)
            .is_some_and(|c| c.has_status(StatusEffectKind::Taunting))
    })
}

/// Confusion roll for an offensive action. Returns the replacement target,
/// drawn from every living combatant except the actor.
pub fn confusion_redirect(
    roster: &Roster,
    actor: CombatantId,
    rng: &mut dyn RngOracle,
) -> Option<CombatantId> {
    let confused = roster
        .get(actor)
        .is_some_and(|c| c.has_status(StatusEffectKind::Confused));
    if !confused || !rng.chance(BattleConfig::CONFUSION_REDIRECT_CHANCE) {
        return None;
    }

    let candidates: Vec<CombatantId> = roster
        .living()
        .map(|c| c.id())
        .filter(|&id| id != actor)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.index(candidates.len())])
}
