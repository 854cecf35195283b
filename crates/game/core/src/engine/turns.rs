//! Continuous-time turn scheduling.
//!
//! Every combatant owns a time-to-act counter equal to its turn interval
//! (`tick_threshold / (speed_base + max(1, speed))`). The smallest counter
//! acts next; that minimum is subtracted from every living counter so
//! simulated time advances uniformly. The actor's counter is reset from its
//! modified speed when its turn ends, so mid-turn speed changes apply to the
//! next cycle.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::combat::CombatContext;
use crate::config::BattleConfig;
use crate::events::BattleEvent;
use crate::state::{CombatantId, Roster, Side};

use super::{CombatOutcome, TurnError};

/// What the caller should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStep {
    /// `actor` holds the turn and waits for an action, then `end_turn`.
    Act(CombatantId),
    /// Combat is over; nothing more will be scheduled.
    Finished(CombatOutcome),
}

/// Result of a flee roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FleeAttempt {
    pub chance: f32,
    pub escaped: bool,
}

/// Scheduler state for one combat.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    /// Time-to-act, indexed by combatant id.
    counters: Vec<f32>,
    /// Combatants that acted since the last round boundary.
    acted: BTreeSet<CombatantId>,
    round: u32,
    current: Option<CombatantId>,
    outcome: Option<CombatOutcome>,
    started: bool,
}

impl TurnScheduler {
    /// Seeds every counter from the combatant's current modified speed.
    pub fn new(roster: &Roster, config: &BattleConfig) -> Self {
        let counters = roster
            .iter()
            .map(|c| config.turn_interval(c.modified_speed()))
            .collect();
        Self {
            counters,
            acted: BTreeSet::new(),
            round: 0,
            current: None,
            outcome: None,
            started: false,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current(&self) -> Option<CombatantId> {
        self.current
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Time left before `id` acts.
    pub fn counter(&self, id: CombatantId) -> Option<f32> {
        self.counters.get(id.index()).copied()
    }

    /// Announces the combat and opens round 1.
    pub fn start(&mut self, ctx: &mut CombatContext<'_>) {
        if self.started {
            return;
        }
        self.started = true;
        self.round = 1;

        let party = ctx.roster.living_ids_on(Side::Party);
        let enemies = ctx.roster.living_ids_on(Side::Enemy);
        info!(party = party.len(), enemies = enemies.len(), "combat started");
        ctx.events
            .emit(BattleEvent::CombatStarted { party, enemies });
        ctx.events.emit(BattleEvent::RoundStarted { round: 1 });

        self.check_end(ctx);
    }

    // ========================================================================
    // Turn lifecycle
    // ========================================================================

    /// Advances to the next actor able to act.
    ///
    /// Status effects are processed at the start of each selected turn.
    /// Combatants killed by their own ticks lose the turn; prevented turns
    /// are announced and ended without an action. Both loop back to
    /// selection until someone can act or combat ends.
    pub fn next_turn(&mut self, ctx: &mut CombatContext<'_>) -> Result<TurnStep, TurnError> {
        if !self.started {
            return Err(TurnError::NotStarted);
        }
        if let Some(actor) = self.current {
            return Err(TurnError::TurnInProgress(actor));
        }

        loop {
            if let Some(outcome) = self.outcome {
                return Ok(TurnStep::Finished(outcome));
            }

            let actor = self.select(ctx)?;
            if let Some(combatant) = ctx.roster.get_mut(actor) {
                combatant.clear_defend();
            }

            let tick = ctx.process_statuses(actor);
            if tick.defeated || !ctx.roster.is_alive(actor) {
                debug!(%actor, "actor fell to status damage");
                self.reset_counter(ctx, actor);
                self.check_round(ctx);
                self.check_end(ctx);
                continue;
            }

            let prevented = ctx
                .roster
                .get(actor)
                .and_then(|c| c.preventing_effect(&mut *ctx.rng));
            ctx.events.emit(BattleEvent::TurnStarted { actor });

            if let Some(cause) = prevented {
                debug!(%actor, %cause, "turn prevented");
                ctx.events.emit(BattleEvent::TurnPrevented {
                    actor,
                    cause,
                    delay: ctx.config.prevented_turn_delay,
                });
                self.finish_turn(ctx, actor);
                continue;
            }

            debug!(%actor, round = self.round, "turn started");
            self.current = Some(actor);
            return Ok(TurnStep::Act(actor));
        }
    }

    /// Ends the current actor's turn. Returns the outcome if combat ended.
    ///
    /// After combat has ended this is a no-op that reports the outcome, so a
    /// successful flee can still be followed by the usual `end_turn` call.
    pub fn end_turn(
        &mut self,
        ctx: &mut CombatContext<'_>,
    ) -> Result<Option<CombatOutcome>, TurnError> {
        if self.outcome.is_some() {
            self.current = None;
            return Ok(self.outcome);
        }
        let actor = self.current.take().ok_or(TurnError::NoTurnInProgress)?;
        self.finish_turn(ctx, actor);
        Ok(self.outcome)
    }

    fn finish_turn(&mut self, ctx: &mut CombatContext<'_>, actor: CombatantId) {
        ctx.events.emit(BattleEvent::TurnEnded { actor });
        self.acted.insert(actor);
        self.reset_counter(ctx, actor);
        self.reset_fallen(ctx);
        self.check_round(ctx);
        self.check_end(ctx);
    }

    /// Picks the living combatant with the smallest counter and advances
    /// time by that amount. Ties are settled by a coin flip per comparison.
    fn select(&mut self, ctx: &mut CombatContext<'_>) -> Result<CombatantId, TurnError> {
        let mut best: Option<(CombatantId, f32)> = None;
        for combatant in ctx.roster.living() {
            let id = combatant.id();
            let counter = self.counters.get(id.index()).copied().unwrap_or(f32::MAX);
            best = match best {
                None => Some((id, counter)),
                Some((_, lowest)) if counter < lowest => Some((id, counter)),
                Some((_, lowest)) if counter == lowest && ctx.rng.coin_flip() => {
                    Some((id, counter))
                }
                keep => keep,
            };
        }
        let (actor, elapsed) = best.ok_or(TurnError::NoLivingCombatants)?;

        for combatant in ctx.roster.living() {
            if let Some(counter) = self.counters.get_mut(combatant.id().index()) {
                *counter -= elapsed;
            }
        }
        Ok(actor)
    }

    fn reset_counter(&mut self, ctx: &CombatContext<'_>, actor: CombatantId) {
        let Some(combatant) = ctx.roster.get(actor) else {
            return;
        };
        let interval = ctx.config.turn_interval(combatant.modified_speed());
        if let Some(counter) = self.counters.get_mut(actor.index()) {
            *counter = interval;
        }
    }

    /// Dead combatants hold a fresh interval, so a revived one waits a full
    /// cycle instead of resuming the time left when it fell.
    fn reset_fallen(&mut self, ctx: &CombatContext<'_>) {
        for combatant in ctx.roster.iter().filter(|c| !c.is_alive()) {
            if let Some(counter) = self.counters.get_mut(combatant.id().index()) {
                *counter = ctx.config.turn_interval(combatant.modified_speed());
            }
        }
    }

    /// Opens a new round once every living combatant has acted.
    fn check_round(&mut self, ctx: &mut CombatContext<'_>) {
        let mut living = ctx.roster.living().map(|c| c.id()).peekable();
        if living.peek().is_none() {
            return;
        }
        if !living.all(|id| self.acted.contains(&id)) {
            return;
        }
        self.acted.clear();
        self.round += 1;
        info!(round = self.round, "round started");
        ctx.events
            .emit(BattleEvent::RoundStarted { round: self.round });
    }

    /// Victory is checked before defeat, so a mutual wipe counts as a win.
    fn check_end(&mut self, ctx: &mut CombatContext<'_>) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = if ctx.roster.is_wiped(Side::Enemy) {
            CombatOutcome::Victory
        } else if ctx.roster.is_wiped(Side::Party) {
            CombatOutcome::Defeat
        } else {
            return;
        };
        self.finish(ctx, outcome);
    }

    fn finish(&mut self, ctx: &mut CombatContext<'_>, outcome: CombatOutcome) {
        info!(%outcome, round = self.round, "combat ended");
        self.outcome = Some(outcome);
        self.current = None;
        ctx.events.emit(BattleEvent::CombatEnded { outcome });
    }

    // ========================================================================
    // Flee
    // ========================================================================

    /// Escape probability for `side`: base chance moved by the average speed
    /// difference against the other side, clamped to the configured bounds.
    pub fn flee_chance(roster: &Roster, config: &BattleConfig, side: Side) -> f32 {
        let difference = roster.average_speed(side) - roster.average_speed(side.opposite());
        (config.flee_base_chance + difference * config.flee_speed_slope)
            .clamp(config.flee_min_chance, config.flee_max_chance)
    }

    /// Rolls a flee for `actor`'s side. Success ends combat as escaped; a
    /// failure still spends the turn.
    pub fn attempt_flee(&mut self, ctx: &mut CombatContext<'_>, actor: CombatantId) -> FleeAttempt {
        let side = ctx.roster.side_of(actor).unwrap_or_default();
        let chance = Self::flee_chance(ctx.roster, ctx.config, side);
        let escaped = ctx.rng.chance(chance);
        debug!(%actor, chance, escaped, "flee attempt");
        ctx.events
            .emit(BattleEvent::FleeAttempted { chance, escaped });
        if escaped {
            self.finish(ctx, CombatOutcome::Escaped);
        }
        FleeAttempt { chance, escaped }
    }

    /// Ends combat as escaped without a roll.
    pub fn guaranteed_flee(&mut self, ctx: &mut CombatContext<'_>) {
        if self.outcome.is_some() {
            return;
        }
        ctx.events.emit(BattleEvent::FleeAttempted {
            chance: 1.0,
            escaped: true,
        });
        self.finish(ctx, CombatOutcome::Escaped);
    }

    // ========================================================================
    // Preview
    // ========================================================================

    /// Forecast of the next `count` actors, current actor first.
    ///
    /// Runs the selection algorithm on a scratch copy of the counters.
    /// Ties go to the lower id so the preview consumes no randomness.
    pub fn upcoming_turns(
        &self,
        roster: &Roster,
        config: &BattleConfig,
        count: usize,
    ) -> Vec<CombatantId> {
        let mut scratch: Vec<(CombatantId, f32, f32)> = roster
            .living()
            .map(|c| {
                let id = c.id();
                let interval = config.turn_interval(c.modified_speed());
                let counter = self.counter(id).unwrap_or(interval);
                (id, counter, interval)
            })
            .collect();

        let mut order = Vec::with_capacity(count);
        if let Some(current) = self.current.filter(|id| roster.is_alive(*id)) {
            if count > 0 {
                order.push(current);
            }
            if let Some(entry) = scratch.iter_mut().find(|(id, _, _)| *id == current) {
                entry.1 = entry.2;
            }
        }

        while order.len() < count && !scratch.is_empty() {
            let mut next = 0;
            for (index, entry) in scratch.iter().enumerate() {
                if entry.1 < scratch[next].1 {
                    next = index;
                }
            }
            let elapsed = scratch[next].1;
            for entry in &mut scratch {
                entry.1 -= elapsed;
            }
            order.push(scratch[next].0);
            scratch[next].1 = scratch[next].2;
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};
    use crate::events::BattleEvent;
    use crate::state::{CombatantProfile, StatusEffect, StatusEffectKind};

    fn spawn(roster: &mut Roster, side: Side, speed: i32) -> CombatantId {
        roster
            .spawn(
                side,
                CombatantProfile::new("c", 100.0, 10.0, 5.0, 5.0, speed),
                &BattleConfig::default(),
            )
            .unwrap()
    }

    #[test]
    fn turn_frequency_follows_speed() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let fast = spawn(&mut roster, Side::Party, 100);
        let mid = spawn(&mut roster, Side::Party, 50);
        let slow = spawn(&mut roster, Side::Enemy, 25);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = PcgRng::seeded(11);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);

        scheduler.start(&mut ctx);
        let mut counts = [0u32; 3];
        for _ in 0..700 {
            let TurnStep::Act(actor) = scheduler.next_turn(&mut ctx).unwrap() else {
                panic!("combat ended early");
            };
            counts[actor.index()] += 1;
            scheduler.end_turn(&mut ctx).unwrap();
        }

        assert!(counts[fast.index()].abs_diff(400) <= 4, "{counts:?}");
        assert!(counts[mid.index()].abs_diff(200) <= 4, "{counts:?}");
        assert!(counts[slow.index()].abs_diff(100) <= 4, "{counts:?}");
    }

    #[test]
    fn round_advances_once_everyone_acted() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        spawn(&mut roster, Side::Party, 10);
        spawn(&mut roster, Side::Enemy, 10);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);

        scheduler.start(&mut ctx);
        scheduler.next_turn(&mut ctx).unwrap();
        scheduler.end_turn(&mut ctx).unwrap();
        assert_eq!(scheduler.round(), 1);
        scheduler.next_turn(&mut ctx).unwrap();
        scheduler.end_turn(&mut ctx).unwrap();
        assert_eq!(scheduler.round(), 2);

        let rounds = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::RoundStarted { .. }))
            .count();
        assert_eq!(rounds, 2);
    }

    #[test]
    fn dead_combatants_do_not_block_the_round() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let a = spawn(&mut roster, Side::Party, 20);
        let b = spawn(&mut roster, Side::Party, 10);
        spawn(&mut roster, Side::Enemy, 15);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(a));
        ctx.deal(b, crate::combat::Hit::direct(500.0, crate::state::Element::Neutral), false);
        scheduler.end_turn(&mut ctx).unwrap();
        assert_eq!(scheduler.round(), 1);

        // The enemy acts next; b is dead and excluded, so the round closes.
        scheduler.next_turn(&mut ctx).unwrap();
        scheduler.end_turn(&mut ctx).unwrap();
        assert_eq!(scheduler.round(), 2);
    }

    #[test]
    fn revived_combatants_wait_a_full_interval() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let fast = spawn(&mut roster, Side::Party, 200);
        let fallen = spawn(&mut roster, Side::Party, 10);
        spawn(&mut roster, Side::Enemy, 1);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        // 18 turns of 50 ticks leave 100 of the fallen one's 1000.
        for _ in 0..17 {
            assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(fast));
            scheduler.end_turn(&mut ctx).unwrap();
        }
        assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(fast));
        assert_eq!(scheduler.counter(fallen), Some(100.0));
        ctx.deal(fallen, crate::combat::Hit::direct(500.0, crate::state::Element::Neutral), false);
        scheduler.end_turn(&mut ctx).unwrap();

        assert!(ctx.revive(fallen, 0.5));
        assert_eq!(scheduler.counter(fallen), Some(1000.0));
        for _ in 0..10 {
            assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(fast));
            scheduler.end_turn(&mut ctx).unwrap();
        }
    }

    #[test]
    fn prevented_turns_are_skipped() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let sleeper = spawn(&mut roster, Side::Party, 100);
        let other = spawn(&mut roster, Side::Enemy, 10);
        roster
            .get_mut(sleeper)
            .unwrap()
            .apply_status(StatusEffect::with_duration(StatusEffectKind::Sleeping, 3));
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        // Prevented twice; the effect expires during the third status pass.
        let step = scheduler.next_turn(&mut ctx).unwrap();
        assert_eq!(step, TurnStep::Act(sleeper));
        let prevented = events
            .iter()
            .filter(|e| matches!(e, BattleEvent::TurnPrevented { actor, .. } if *actor == sleeper))
            .count();
        assert_eq!(prevented, 2);
        assert!(!events.iter().any(|e| matches!(e, BattleEvent::TurnStarted { actor } if *actor == other)));
    }

    #[test]
    fn defend_lasts_until_the_owner_acts_again() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let guard = spawn(&mut roster, Side::Party, 20);
        spawn(&mut roster, Side::Enemy, 5);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(guard));
        ctx.roster.get_mut(guard).unwrap().defend();
        scheduler.end_turn(&mut ctx).unwrap();

        // guard (interval 500) acts again before the enemy (2000).
        assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(guard));
        assert!(!ctx.roster.get(guard).unwrap().is_defending());
    }

    #[test]
    fn status_death_costs_the_turn_and_can_end_combat() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        spawn(&mut roster, Side::Party, 10);
        let doomed = spawn(&mut roster, Side::Enemy, 100);
        roster
            .get_mut(doomed)
            .unwrap()
            .apply_status(StatusEffect::new(StatusEffectKind::Burning, 3, 100.0));
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        assert_eq!(
            scheduler.next_turn(&mut ctx).unwrap(),
            TurnStep::Finished(CombatOutcome::Victory)
        );
        assert!(!events.iter().any(|e| matches!(e, BattleEvent::TurnStarted { .. })));
        assert!(events.contains(&BattleEvent::CombatEnded {
            outcome: CombatOutcome::Victory
        }));
    }

    #[test]
    fn flee_chance_stays_in_bounds() {
        let config = BattleConfig::default();
        for (party, enemy) in [(1, 10_000), (10_000, 1), (50, 50), (60, 40)] {
            let mut roster = Roster::new();
            spawn(&mut roster, Side::Party, party);
            spawn(&mut roster, Side::Enemy, enemy);
            let chance = TurnScheduler::flee_chance(&roster, &config, Side::Party);
            assert!((0.1..=0.9).contains(&chance), "{chance}");
        }

        let mut roster = Roster::new();
        spawn(&mut roster, Side::Party, 60);
        spawn(&mut roster, Side::Enemy, 40);
        let chance = TurnScheduler::flee_chance(&roster, &config, Side::Party);
        assert!((chance - 0.7).abs() < 1e-5);
    }

    #[test]
    fn successful_flee_ends_combat() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let runner = spawn(&mut roster, Side::Party, 10);
        spawn(&mut roster, Side::Enemy, 10);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.2);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        scheduler.next_turn(&mut ctx).unwrap();
        let attempt = scheduler.attempt_flee(&mut ctx, runner);
        assert!(attempt.escaped);
        assert_eq!(scheduler.end_turn(&mut ctx).unwrap(), Some(CombatOutcome::Escaped));
        assert_eq!(
            scheduler.next_turn(&mut ctx).unwrap(),
            TurnStep::Finished(CombatOutcome::Escaped)
        );
    }

    #[test]
    fn preview_is_pure_and_starts_with_the_current_actor() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let fast = spawn(&mut roster, Side::Party, 100);
        let slow = spawn(&mut roster, Side::Enemy, 50);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.3);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);
        scheduler.next_turn(&mut ctx).unwrap();

        let before = scheduler.counter(slow);
        let preview = scheduler.upcoming_turns(ctx.roster, &config, 5);
        assert_eq!(preview, vec![fast, fast, slow, fast, fast]);
        assert_eq!(scheduler.counter(slow), before);
        assert_eq!(scheduler.current(), Some(fast));
    }

    #[test]
    fn preview_tie_break_matches_a_kept_coin_flip() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let first = spawn(&mut roster, Side::Party, 40);
        let second = spawn(&mut roster, Side::Enemy, 40);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        // 0.9 loses every coin flip, so ties stay with the lower id.
        let mut rng = ScriptedRng::always(0.9);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        let preview = scheduler.upcoming_turns(ctx.roster, &config, 4);
        assert_eq!(preview, vec![first, second, first, second]);

        let mut played = Vec::new();
        for _ in 0..4 {
            let TurnStep::Act(actor) = scheduler.next_turn(&mut ctx).unwrap() else {
                panic!("combat ended early");
            };
            played.push(actor);
            scheduler.end_turn(&mut ctx).unwrap();
        }
        assert_eq!(played, preview);
    }

    #[test]
    fn won_coin_flip_hands_the_tie_over() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        spawn(&mut roster, Side::Party, 40);
        let second = spawn(&mut roster, Side::Enemy, 40);
        let mut scheduler = TurnScheduler::new(&roster, &config);
        let mut rng = ScriptedRng::always(0.1);
        let mut events: Vec<BattleEvent> = Vec::new();
        let mut ctx = CombatContext::new(&mut roster, &mut rng, &config, &mut events);
        scheduler.start(&mut ctx);

        assert_eq!(scheduler.next_turn(&mut ctx).unwrap(), TurnStep::Act(second));
    }
}
