use tracing::warn;

use crate::ability::{TargetPattern, UtilityRegistry};
use crate::action::{Action, ActionError, ActionExecutor, ActionOutcome, valid_targets};
use crate::combat::CombatContext;
use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::events::{BattleEvent, EventLog};
use crate::item::Inventory;
use crate::state::{CombatantId, Roster, RosterError, Side};

use super::{CombatOutcome, TurnError, TurnScheduler, TurnStep};

/// Owns one combat and exposes the controller-facing loop.
///
/// ```text
/// start → loop { next_turn → Act(actor) → execute(action) → end_turn }
///       → Finished(outcome)
/// ```
pub struct BattleEngine<R: RngOracle> {
    roster: Roster,
    scheduler: TurnScheduler,
    rng: R,
    config: BattleConfig,
    events: EventLog,
    utilities: UtilityRegistry,
    inventory: Option<Box<dyn Inventory>>,
}

impl<R: RngOracle> BattleEngine<R> {
    /// Builds an engine over a populated roster. Both sides need at least one
    /// living combatant.
    pub fn new(roster: Roster, config: BattleConfig, rng: R) -> Result<Self, RosterError> {
        for side in [Side::Party, Side::Enemy] {
            if roster.is_wiped(side) {
                return Err(RosterError::EmptySide(side));
            }
        }
        let scheduler = TurnScheduler::new(&roster, &config);
        Ok(Self {
            roster,
            scheduler,
            rng,
            config,
            events: EventLog::new(),
            utilities: UtilityRegistry::new(),
            inventory: None,
        })
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: impl Inventory + 'static) -> Self {
        self.inventory = Some(Box::new(inventory));
        self
    }

    #[must_use]
    pub fn with_utilities(mut self, utilities: UtilityRegistry) -> Self {
        self.utilities = utilities;
        self
    }

    // ========================================================================
    // Turn loop
    // ========================================================================

    pub fn start(&mut self) {
        let mut ctx = CombatContext::new(
            &mut self.roster,
            &mut self.rng,
            &self.config,
            &mut self.events,
        );
        self.scheduler.start(&mut ctx);
    }

    pub fn next_turn(&mut self) -> Result<TurnStep, TurnError> {
        let mut ctx = CombatContext::new(
            &mut self.roster,
            &mut self.rng,
            &self.config,
            &mut self.events,
        );
        self.scheduler.next_turn(&mut ctx)
    }

    /// Executes an action of the combatant holding the turn.
    pub fn execute(&mut self, action: &Action) -> Result<ActionOutcome, ActionError> {
        if self.scheduler.is_over() {
            return Err(ActionError::CombatOver);
        }
        if self.scheduler.current() != Some(action.actor) {
            return Err(ActionError::NotActorsTurn(action.actor));
        }

        let inventory = match self.inventory.as_mut() {
            Some(inventory) => Some(&mut **inventory as &mut dyn Inventory),
            None => None,
        };
        let ctx = CombatContext::new(
            &mut self.roster,
            &mut self.rng,
            &self.config,
            &mut self.events,
        );
        let result = ActionExecutor::new(ctx, &mut self.scheduler, &self.utilities)
            .with_inventory(inventory)
            .execute(action);

        if let Err(err) = &result {
            warn!(actor = %action.actor, kind = %action.kind, error = %err, "action rejected");
        }
        result
    }

    pub fn end_turn(&mut self) -> Result<Option<CombatOutcome>, TurnError> {
        let mut ctx = CombatContext::new(
            &mut self.roster,
            &mut self.rng,
            &self.config,
            &mut self.events,
        );
        self.scheduler.end_turn(&mut ctx)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Targets `actor` may choose for `pattern`. Random patterns draw from the
    /// engine's RNG.
    pub fn valid_targets(&mut self, actor: CombatantId, pattern: TargetPattern) -> Vec<CombatantId> {
        valid_targets(&self.roster, actor, pattern, &mut self.rng)
    }

    pub fn upcoming_turns(&self, count: usize) -> Vec<CombatantId> {
        self.scheduler
            .upcoming_turns(&self.roster, &self.config, count)
    }

    pub fn flee_chance(&self, side: Side) -> f32 {
        TurnScheduler::flee_chance(&self.roster, &self.config, side)
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.scheduler.outcome()
    }

    pub fn current(&self) -> Option<CombatantId> {
        self.scheduler.current()
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn inventory(&self) -> Option<&dyn Inventory> {
        self.inventory.as_deref()
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[BattleEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }
}
