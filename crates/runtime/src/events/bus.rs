//! Topic-based event bus implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use battle_core::BattleEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Combat, round and turn boundaries
    Flow,
    /// Actions taken and their immediate results (misses, flee rolls, items)
    Action,
    /// Changes to individual combatants
    Combatant,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Flow, Topic::Action, Topic::Combatant];

    /// Topic a battle event is published on.
    pub fn of(event: &BattleEvent) -> Self {
        use BattleEvent::*;
        match event {
            CombatStarted { .. }
            | CombatEnded { .. }
            | RoundStarted { .. }
            | TurnStarted { .. }
            | TurnPrevented { .. }
            | TurnEnded { .. } => Topic::Flow,
            ActionExecuted { .. }
            | ActionRedirected { .. }
            | AbilityMissed { .. }
            | FleeAttempted { .. }
            | DialogueRequested { .. }
            | ItemUsed { .. } => Topic::Action,
            DamageDealt { .. }
            | HitNegated { .. }
            | Healed { .. }
            | ResourceChanged { .. }
            | StatusApplied { .. }
            | StatusRemoved { .. }
            | StatusesCleared { .. }
            | StatusResisted { .. }
            | CombatantDefeated { .. }
            | CombatantRevived { .. } => Topic::Combatant,
        }
    }
}

/// A battle event stamped with its position in the session's stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic across all topics of one bus.
    pub sequence: u64,
    pub round: u32,
    pub event: BattleEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

struct Channels {
    flow: broadcast::Sender<Event>,
    action: broadcast::Sender<Event>,
    combatant: broadcast::Sender<Event>,
    sequence: AtomicU64,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Flow => &self.flow,
            Topic::Action => &self.action,
            Topic::Combatant => &self.combatant,
        }
    }
}

/// Receiving end of one topic.
pub type EventReceiver = broadcast::Receiver<Event>;

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks and needs no async
/// runtime; slow subscribers lag and skip instead of stalling the battle.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                flow: broadcast::channel(capacity).0,
                action: broadcast::channel(capacity).0,
                combatant: broadcast::channel(capacity).0,
                sequence: AtomicU64::new(0),
            }),
        }
    }

    /// Publish a battle event to its topic and return the stamped event.
    pub fn publish(&self, round: u32, event: BattleEvent) -> Event {
        let event = Event {
            sequence: self.channels.sequence.fetch_add(1, Ordering::Relaxed),
            round,
            event,
        };
        let topic = event.topic();
        if self.channels.sender(topic).send(event.clone()).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
        event
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> EventReceiver {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, EventReceiver)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of events published so far.
    pub fn published(&self) -> u64 {
        self.channels.sequence.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
