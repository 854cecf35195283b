use crate::config::BattleConfig;
use crate::state::RosterError;

use super::{Combatant, CombatantId, CombatantProfile, Side};

/// Every combatant in the battle, both sides, indexed by [`CombatantId`].
///
/// Combatants are never removed; defeated ones stay in place and are
/// filtered out of living queries until revived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant and returns its id.
    pub fn spawn(
        &mut self,
        side: Side,
        profile: CombatantProfile,
        config: &BattleConfig,
    ) -> Result<CombatantId, RosterError> {
        if self.combatants.len() >= BattleConfig::MAX_COMBATANTS {
            return Err(RosterError::RosterFull {
                max: BattleConfig::MAX_COMBATANTS,
            });
        }
        let id = CombatantId(self.combatants.len() as u32);
        self.combatants.push(Combatant::new(id, side, profile, config));
        Ok(id)
    }

    /// Returns a reference to a combatant by ID.
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    /// Returns a mutable reference to a combatant by ID.
    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    pub fn require(&self, id: CombatantId) -> Result<&Combatant, RosterError> {
        self.get(id).ok_or(RosterError::UnknownCombatant(id))
    }

    pub fn require_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, RosterError> {
        self.get_mut(id).ok_or(RosterError::UnknownCombatant(id))
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        self.get(id).map(Combatant::side)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.combatants.iter().map(Combatant::id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    pub fn on_side(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side() == side)
    }

    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.on_side(side).filter(|c| c.is_alive())
    }

    pub fn living_ids_on(&self, side: Side) -> Vec<CombatantId> {
        self.living_on(side).map(Combatant::id).collect()
    }

    /// True when nobody on `side` is alive (including an empty side).
    pub fn is_wiped(&self, side: Side) -> bool {
        self.living_on(side).next().is_none()
    }

    /// Average modified speed of the living members of `side`; zero when
    /// none are alive.
    pub fn average_speed(&self, side: Side) -> f32 {
        let (total, count) = self
            .living_on(side)
            .fold((0i64, 0u32), |(total, count), c| {
                (total + i64::from(c.modified_speed()), count + 1)
            });
        if count == 0 {
            return 0.0;
        }
        total as f32 / count as f32
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, speed: i32) -> CombatantProfile {
        CombatantProfile::new(name, 50.0, 10.0, 5.0, 5.0, speed)
    }

    #[test]
    fn spawn_assigns_dense_ids() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        let a = roster.spawn(Side::Party, profile("a", 10), &config).unwrap();
        let b = roster.spawn(Side::Enemy, profile("b", 10), &config).unwrap();
        assert_eq!(a, CombatantId(0));
        assert_eq!(b, CombatantId(1));
        assert_eq!(roster.side_of(b), Some(Side::Enemy));
        assert!(roster.get(CombatantId(7)).is_none());
    }

    #[test]
    fn average_speed_counts_living_only() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        roster.spawn(Side::Party, profile("a", 10), &config).unwrap();
        roster.spawn(Side::Party, profile("b", 30), &config).unwrap();
        assert_eq!(roster.average_speed(Side::Party), 20.0);
        assert_eq!(roster.average_speed(Side::Enemy), 0.0);
        assert!(roster.is_wiped(Side::Enemy));
    }

    #[test]
    fn roster_capacity_is_bounded() {
        let config = BattleConfig::default();
        let mut roster = Roster::new();
        for _ in 0..BattleConfig::MAX_COMBATANTS {
            roster.spawn(Side::Party, profile("x", 1), &config).unwrap();
        }
        assert_eq!(
            roster.spawn(Side::Party, profile("x", 1), &config),
            Err(RosterError::RosterFull {
                max: BattleConfig::MAX_COMBATANTS
            })
        );
    }
}
