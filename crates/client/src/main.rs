//! Headless battle simulator.
//!
//! Loads a content directory, runs one or more AI-versus-AI battles of an
//! encounter and prints how each one ended.
//!
//! ```bash
//! # Five seeded runs of the bundled ambush, with the event stream
//! cargo run -p battle-sim -- --encounter goblin_ambush --seed 7 --battles 5 --events
//! ```

mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{ContentFactory, ContentRegistry};
use battle_core::CombatOutcome;
use battle_runtime::{
    BasicAiProvider, BattleSession, EventBus, EventReceiver, Scenario, SessionOutcome,
    SessionReport, Topic, random_seed,
};
use clap::Parser;

/// Per-topic buffer; large enough to hold a whole capped battle.
const EVENT_CAPACITY: usize = 16_384;

/// Runs AI-controlled battles from battle content.
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Headless turn-based battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory; defaults to the bundled sample content
    #[arg(long)]
    content: Option<PathBuf>,

    /// Encounter id to fight
    #[arg(long, default_value = "goblin_ambush")]
    encounter: String,

    /// Seed of the first battle; later battles use the following seeds
    #[arg(long)]
    seed: Option<u64>,

    /// Number of battles to run
    #[arg(long, default_value_t = 1)]
    battles: u32,

    /// Turns after which a battle is called a draw
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Print every battle event
    #[arg(long)]
    events: bool,

    /// List encounters and characters, then exit
    #[arg(long)]
    list: bool,

    /// Log at info level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Default)]
struct Tally {
    victories: u32,
    defeats: u32,
    escapes: u32,
    draws: u32,
}

impl Tally {
    fn record(&mut self, outcome: SessionOutcome) {
        match outcome {
            SessionOutcome::Finished(CombatOutcome::Victory) => self.victories += 1,
            SessionOutcome::Finished(CombatOutcome::Defeat) => self.defeats += 1,
            SessionOutcome::Finished(CombatOutcome::Escaped) => self.escapes += 1,
            SessionOutcome::Draw => self.draws += 1,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let factory = cli
        .content
        .clone()
        .map_or_else(ContentFactory::bundled, ContentFactory::new);
    let registry = factory
        .load_registry()
        .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;

    if cli.list {
        list_content(&registry);
        return Ok(());
    }

    let config = factory.load_config()?;
    let scenario = Scenario::from_encounter(&registry, &cli.encounter)?;
    let first_seed = cli.seed.unwrap_or_else(random_seed);

    let mut tally = Tally::default();
    for index in 0..cli.battles {
        let seed = first_seed.wrapping_add(u64::from(index));
        let bus = EventBus::with_capacity(EVENT_CAPACITY);
        let receivers = bus.subscribe_multiple(&Topic::ALL);

        let mut session = BattleSession::builder()
            .battle_config(config.clone())
            .seed(seed)
            .max_turns(cli.max_turns)
            .bus(bus)
            .party_provider(BasicAiProvider::new(seed).with_healing_item("potion"))
            .enemy_provider(BasicAiProvider::new(seed.rotate_left(32)))
            .build(&scenario, &registry)?;
        let report = session.run()?;

        if cli.events {
            print_events(receivers);
        }
        print_report(&scenario, &session, &report);
        tally.record(report.outcome);
    }

    if cli.battles > 1 {
        println!(
            "{} battles: {} victories, {} defeats, {} escapes, {} draws",
            cli.battles, tally.victories, tally.defeats, tally.escapes, tally.draws
        );
    }
    Ok(())
}

fn list_content(registry: &ContentRegistry) {
    println!("encounters:");
    for id in registry.encounter_ids() {
        if let Some(encounter) = registry.encounter(id) {
            println!(
                "  {id:<16} {} ({} vs {})",
                encounter.name,
                encounter.party.join(", "),
                encounter.enemies.join(", ")
            );
        }
    }
    println!("characters:");
    for id in registry.character_ids() {
        if let Some(character) = registry.character(id) {
            println!("  {id:<16} {} the {}", character.name, character.role);
        }
    }
}

fn print_events(receivers: Vec<(Topic, EventReceiver)>) {
    let mut events = Vec::new();
    for (_, mut receiver) in receivers {
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
    }
    events.sort_by_key(|event| event.sequence);
    for event in events {
        println!("  [{:>4}] round {:>3} {:?}", event.sequence, event.round, event.event);
    }
}

fn print_report(scenario: &Scenario, session: &BattleSession, report: &SessionReport) {
    let outcome = match report.outcome {
        SessionOutcome::Finished(outcome) => outcome.to_string(),
        SessionOutcome::Draw => "Draw".to_owned(),
    };
    let survivors: Vec<String> = report
        .survivors
        .iter()
        .filter_map(|id| session.engine().roster().get(*id))
        .map(|combatant| {
            format!(
                "{} {:.0}/{:.0}",
                combatant.name(),
                combatant.health(),
                combatant.max_health()
            )
        })
        .collect();

    println!(
        "{} seed={} outcome={} rounds={} turns={} survivors=[{}]",
        scenario.name,
        report.seed.unwrap_or_default(),
        outcome,
        report.rounds,
        report.turns,
        survivors.join(", ")
    );
}
