use crate::state::Element;

/// Battle configuration constants and tunable parameters.
///
/// Every knob that content designers may want to tweak lives here. Values are
/// read at resolution time, so a session can be configured once at setup and
/// shared by the executor and the scheduler.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Numerator of the CTB interval: `tick_threshold / (speed_base + speed)`.
    pub tick_threshold: f32,

    /// Flat speed offset added before computing the CTB interval.
    ///
    /// Zero keeps turn frequency exactly proportional to speed.
    pub speed_base: f32,

    /// Damage multiplier applied to standard hits while defending (< 1).
    pub defend_multiplier: f32,

    /// Base power of the fallback basic attack used when an Attack action
    /// carries no ability.
    pub basic_attack_power: f32,

    /// Percentage of max MP restored by the fallback basic attack.
    pub basic_attack_mp_restore_percent: f32,

    /// Percentage of max MP a combatant starts the battle with.
    pub starting_mp_percent: f32,

    /// Fraction of taken damage sent back to the attacker by Reflecting.
    pub reflect_fraction: f32,

    /// Element of the bonus hit dealt when a trap springs.
    pub trap_element: Element,

    /// Simulated delay (seconds) before a prevented turn auto-ends.
    pub prevented_turn_delay: f32,

    /// Flee success probability with equal party speeds.
    pub flee_base_chance: f32,

    /// Flee probability change per point of average speed difference.
    pub flee_speed_slope: f32,

    /// Lower bound of the flee probability.
    pub flee_min_chance: f32,

    /// Upper bound of the flee probability.
    pub flee_max_chance: f32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active status effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 16;
    /// Maximum number of combatants across both sides.
    pub const MAX_COMBATANTS: usize = 32;

    // ===== fixed rule constants =====
    /// Chance that Paralyzed prevents an action.
    pub const PARALYSIS_CHANCE: f32 = 0.5;
    /// Chance that Disoriented prevents an action.
    pub const DISORIENT_CHANCE: f32 = 0.3;
    /// Chance that an actor with AccuracyDown misses an offensive action.
    pub const ACCURACY_DOWN_MISS_CHANCE: f32 = 0.3;
    /// Chance that a confused actor's offensive action is redirected.
    pub const CONFUSION_REDIRECT_CHANCE: f32 = 0.5;
    /// Attack multiplier of Weakened.
    pub const WEAKENED_ATTACK_FACTOR: f32 = 0.5;
    /// Damage multiplier of Fortified.
    pub const FORTIFY_FACTOR: f32 = 0.5;
    /// Poison tick as a fraction of max HP per magnitude point.
    pub const POISON_FRACTION: f32 = 0.05;
    /// Burn tick per magnitude point.
    pub const BURN_BASE_DAMAGE: f32 = 5.0;
    /// Crit multiplier substituted for non-positive content values.
    pub const DEFAULT_CRIT_MULTIPLIER: f32 = 1.5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_THRESHOLD: f32 = 10_000.0;
    pub const DEFAULT_SPEED_BASE: f32 = 0.0;
    pub const DEFAULT_DEFEND_MULTIPLIER: f32 = 0.5;
    pub const DEFAULT_BASIC_ATTACK_POWER: f32 = 10.0;
    pub const DEFAULT_BASIC_ATTACK_MP_RESTORE_PERCENT: f32 = 20.0;
    pub const DEFAULT_STARTING_MP_PERCENT: f32 = 100.0;
    pub const DEFAULT_REFLECT_FRACTION: f32 = 0.3;
    pub const DEFAULT_PREVENTED_TURN_DELAY: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            tick_threshold: Self::DEFAULT_TICK_THRESHOLD,
            speed_base: Self::DEFAULT_SPEED_BASE,
            defend_multiplier: Self::DEFAULT_DEFEND_MULTIPLIER,
            basic_attack_power: Self::DEFAULT_BASIC_ATTACK_POWER,
            basic_attack_mp_restore_percent: Self::DEFAULT_BASIC_ATTACK_MP_RESTORE_PERCENT,
            starting_mp_percent: Self::DEFAULT_STARTING_MP_PERCENT,
            reflect_fraction: Self::DEFAULT_REFLECT_FRACTION,
            trap_element: Element::Earth,
            prevented_turn_delay: Self::DEFAULT_PREVENTED_TURN_DELAY,
            flee_base_chance: 0.5,
            flee_speed_slope: 0.01,
            flee_min_chance: 0.1,
            flee_max_chance: 0.9,
        }
    }

    /// Builder-style override of the starting MP percentage.
    #[must_use]
    pub fn with_starting_mp_percent(mut self, percent: f32) -> Self {
        self.starting_mp_percent = percent;
        self
    }

    /// Builder-style override of the defend multiplier.
    #[must_use]
    pub fn with_defend_multiplier(mut self, multiplier: f32) -> Self {
        self.defend_multiplier = multiplier;
        self
    }

    /// CTB interval for a combatant with the given modified speed.
    ///
    /// Speed is floored at 1 so rooted combatants still act eventually.
    pub fn turn_interval(&self, modified_speed: i32) -> f32 {
        let speed = modified_speed.max(1) as f32;
        self.tick_threshold / (self.speed_base + speed)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
