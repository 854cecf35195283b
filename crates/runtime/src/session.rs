//! Battle session orchestrator.
//!
//! A session owns one [`BattleEngine`], asks providers for actions whenever a
//! combatant holds the turn, and republishes every engine event on the
//! [`EventBus`].

use battle_content::ContentRegistry;
use battle_core::{
    Action, BattleConfig, BattleEngine, CombatOutcome, CombatantId, PcgRng, RngOracle, Side,
    TurnStep,
};
use crate::api::{ActionProvider, BattleView, ProviderKind, Result, RuntimeError};
use crate::events::{EventBus, EventReceiver, Topic};
use crate::scenario::Scenario;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    /// Turns after which an undecided battle is called a draw.
    pub max_turns: u32,
    /// Seed of the battle RNG; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 256,
            max_turns: 500,
            seed: None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished(CombatOutcome),
    /// The turn cap was reached with both sides standing.
    Draw,
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub seed: Option<u64>,
    pub rounds: u32,
    pub turns: u32,
    pub survivors: Vec<CombatantId>,
}

/// Drives one battle from start to finish.
pub struct BattleSession<R: RngOracle = PcgRng> {
    engine: BattleEngine<R>,
    bus: EventBus,

    party_provider: Option<Box<dyn ActionProvider>>,
    enemy_provider: Option<Box<dyn ActionProvider>>,

    max_turns: u32,
    turns: u32,
    seed: Option<u64>,
}

impl BattleSession<PcgRng> {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }
}

impl<R: RngOracle> BattleSession<R> {
    /// Wraps an engine that is ready to start.
    pub fn new(engine: BattleEngine<R>) -> Self {
        let defaults = SessionConfig::default();
        Self {
            engine,
            bus: EventBus::with_capacity(defaults.event_buffer_size),
            party_provider: None,
            enemy_provider: None,
            max_turns: defaults.max_turns,
            turns: 0,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the party action provider
    pub fn set_party_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.party_provider = Some(Box::new(provider));
    }

    /// Set the enemy action provider
    pub fn set_enemy_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.enemy_provider = Some(Box::new(provider));
    }

    pub fn engine(&self) -> &BattleEngine<R> {
        &self.engine
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribe to battle events of one topic
    pub fn subscribe(&self, topic: Topic) -> EventReceiver {
        self.bus.subscribe(topic)
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Starts the battle. Calling it again has no effect.
    pub fn start(&mut self) {
        self.engine.start();
        self.flush();
    }

    /// Plays one turn.
    ///
    /// Returns the outcome once the battle is decided, or a draw once the
    /// turn cap is reached.
    pub fn step(&mut self) -> Result<Option<SessionOutcome>> {
        if let Some(outcome) = self.engine.outcome() {
            return Ok(Some(SessionOutcome::Finished(outcome)));
        }
        if self.turns >= self.max_turns {
            tracing::warn!(turns = self.turns, "turn cap reached, calling a draw");
            return Ok(Some(SessionOutcome::Draw));
        }

        let step = self.engine.next_turn();
        self.flush();
        let actor = match step? {
            TurnStep::Finished(outcome) => return Ok(Some(SessionOutcome::Finished(outcome))),
            TurnStep::Act(actor) => actor,
        };

        let action = self.request_action(actor)?;
        if let Err(err) = self.engine.execute(&action) {
            tracing::warn!(%actor, error = %err, "provider action rejected, defending instead");
            self.engine.execute(&Action::defend(actor))?;
        }
        let ended = self.engine.end_turn();
        self.flush();
        ended?;

        self.turns += 1;
        Ok(self.engine.outcome().map(SessionOutcome::Finished))
    }

    /// Runs the battle to completion.
    pub fn run(&mut self) -> Result<SessionReport> {
        self.start();
        let outcome = loop {
            if let Some(outcome) = self.step()? {
                break outcome;
            }
        };

        let survivors = self
            .engine
            .roster()
            .living()
            .map(|combatant| combatant.id())
            .collect();
        tracing::info!(
            ?outcome,
            rounds = self.engine.round(),
            turns = self.turns,
            "session finished"
        );
        Ok(SessionReport {
            outcome,
            seed: self.seed,
            rounds: self.engine.round(),
            turns: self.turns,
            survivors,
        })
    }

    fn request_action(&mut self, actor: CombatantId) -> Result<Action> {
        let side = self
            .engine
            .roster()
            .side_of(actor)
            .ok_or(battle_core::RosterError::UnknownCombatant(actor))?;
        let view = BattleView {
            roster: self.engine.roster(),
            config: self.engine.config(),
            inventory: self.engine.inventory(),
            round: self.engine.round(),
        };
        let provider = match side {
            Side::Party => self.party_provider.as_mut(),
            Side::Enemy => self.enemy_provider.as_mut(),
        }
        .ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::from(side),
        })?;
        provider.provide_action(actor, &view)
    }

    fn flush(&mut self) {
        let round = self.engine.round();
        for event in self.engine.drain_events() {
            self.bus.publish(round, event);
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds a seeded session from content.
pub struct SessionBuilder {
    config: SessionConfig,
    party_provider: Option<Box<dyn ActionProvider>>,
    enemy_provider: Option<Box<dyn ActionProvider>>,
    bus: Option<EventBus>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            party_provider: None,
            enemy_provider: None,
            bus: None,
        }
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    pub fn party_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.party_provider = Some(Box::new(provider));
        self
    }

    pub fn enemy_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.enemy_provider = Some(Box::new(provider));
        self
    }

    /// Publish on an existing bus instead of a fresh one.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Spawns the scenario and wires everything into a session.
    pub fn build(self, scenario: &Scenario, registry: &ContentRegistry) -> Result<BattleSession> {
        let seed = self.config.seed.unwrap_or_else(random_seed);
        let (roster, inventory) = scenario.build(registry, &self.config.battle)?;
        let engine = BattleEngine::new(roster, self.config.battle, PcgRng::seeded(seed))?
            .with_inventory(inventory);

        tracing::info!(seed, scenario = %scenario.name, "session built");
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));
        let mut session = BattleSession::new(engine)
            .with_bus(bus)
            .with_max_turns(self.config.max_turns);
        session.party_provider = self.party_provider;
        session.enemy_provider = self.enemy_provider;
        session.seed = Some(seed);
        Ok(session)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh seed for sessions started without one.
pub fn random_seed() -> u64 {
    rand::random()
}
