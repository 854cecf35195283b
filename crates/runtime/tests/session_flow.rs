use battle_content::{ContentFactory, ContentRegistry};
use battle_core::{Action, BattleEvent, CombatOutcome, CombatantId};
use battle_runtime::{
    BasicAiProvider, BattleSession, DefendActionProvider, EventBus, RuntimeError, Scenario,
    ScriptedProvider, SessionOutcome, Topic,
};

const ALDER: CombatantId = CombatantId(0);

fn registry() -> ContentRegistry {
    ContentFactory::bundled()
        .load_registry()
        .expect("bundled content should load")
}

fn duel(registry: &ContentRegistry) -> Scenario {
    Scenario::from_encounter(registry, "duel").unwrap()
}

fn ai_battle(registry: &ContentRegistry, seed: u64) -> (SessionOutcome, u32, Vec<BattleEvent>) {
    let bus = EventBus::with_capacity(16_384);
    let mut flow = bus.subscribe(Topic::Flow);
    let mut combatant = bus.subscribe(Topic::Combatant);

    let scenario = Scenario::from_encounter(registry, "goblin_ambush").unwrap();
    let mut session = BattleSession::builder()
        .seed(seed)
        .bus(bus)
        .party_provider(BasicAiProvider::new(seed).with_healing_item("potion"))
        .enemy_provider(BasicAiProvider::new(seed ^ 0xA5A5))
        .build(&scenario, registry)
        .unwrap();
    let report = session.run().unwrap();

    let mut events = Vec::new();
    while let Ok(event) = flow.try_recv() {
        events.push(event);
    }
    while let Ok(event) = combatant.try_recv() {
        events.push(event);
    }
    events.sort_by_key(|event| event.sequence);
    (
        report.outcome,
        report.turns,
        events.into_iter().map(|event| event.event).collect(),
    )
}

#[test]
fn ai_battle_reaches_an_outcome() {
    let registry = registry();
    let (outcome, turns, events) = ai_battle(&registry, 2024);

    assert!(turns > 0);
    assert!(matches!(events.first(), Some(BattleEvent::CombatStarted { .. })));
    match outcome {
        SessionOutcome::Finished(outcome) => {
            assert!(events.contains(&BattleEvent::CombatEnded { outcome }));
        }
        SessionOutcome::Draw => assert_eq!(turns, 500),
    }
}

#[test]
fn ai_battles_replay_from_their_seed() {
    let registry = registry();
    assert_eq!(ai_battle(&registry, 99), ai_battle(&registry, 99));
}

#[test]
fn escape_item_ends_the_session() {
    let registry = registry();
    let scenario = duel(&registry).with_item("smoke_bomb", 1);
    let mut session = BattleSession::builder()
        .seed(1)
        .party_provider(ScriptedProvider::new([Action::item(ALDER, "smoke_bomb", vec![ALDER])]))
        .enemy_provider(DefendActionProvider)
        .build(&scenario, &registry)
        .unwrap();

    let report = session.run().unwrap();
    // The goblin is faster and defends first; Alder escapes on the second turn.
    assert_eq!(report.outcome, SessionOutcome::Finished(CombatOutcome::Escaped));
    assert_eq!(report.turns, 2);
    assert_eq!(report.seed, Some(1));
    assert_eq!(report.survivors.len(), 2);
}

#[test]
fn rejected_actions_become_defend() {
    let registry = registry();
    let mut session = BattleSession::builder()
        .seed(3)
        .max_turns(4)
        .party_provider(ScriptedProvider::new([
            Action::talk(ALDER, ""),
            Action::talk(ALDER, ""),
        ]))
        .enemy_provider(DefendActionProvider)
        .build(&duel(&registry), &registry)
        .unwrap();

    let report = session.run().unwrap();
    assert_eq!(report.outcome, SessionOutcome::Draw);
    assert_eq!(report.turns, 4);
    let alder = session.engine().roster().get(ALDER).unwrap();
    assert_eq!(alder.health(), alder.max_health());
}

#[test]
fn short_scripts_fail_loudly() {
    let registry = registry();
    let mut session = BattleSession::builder()
        .seed(5)
        .party_provider(ScriptedProvider::default())
        .enemy_provider(DefendActionProvider)
        .build(&duel(&registry), &registry)
        .unwrap();

    let err = session.run().unwrap_err();
    assert!(matches!(err, RuntimeError::ScriptExhausted(id) if id == ALDER));
}

#[test]
fn missing_provider_is_reported() {
    let registry = registry();
    let mut session = BattleSession::builder()
        .seed(5)
        .party_provider(DefendActionProvider)
        .build(&duel(&registry), &registry)
        .unwrap();

    let err = session.run().unwrap_err();
    assert!(matches!(err, RuntimeError::ProviderNotSet { .. }));
}
