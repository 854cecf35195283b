use std::fmt;

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Stable handle of a combatant inside a [`Roster`](crate::state::Roster).
///
/// Ids are dense roster indices allocated at setup and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the battle a combatant fights for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Player-controlled allies.
    #[default]
    Party,
    /// Opposing combatants.
    Enemy,
}

impl Side {
    /// The side this one fights against.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Party => Self::Enemy,
            Self::Enemy => Self::Party,
        }
    }
}

/// Combat archetype. Informational; used by controllers for decision weighting.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Tank,
    #[strum(to_string = "DPS")]
    Dps,
    Support,
    #[default]
    Hybrid,
}

/// Elemental affinity carried by combatants, abilities and hits.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Earth,
    Wind,
    Water,
    Fire,
    Light,
    #[default]
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(Element::from_str("fire").unwrap(), Element::Fire);
        assert_eq!(Role::from_str("dps").unwrap(), Role::Dps);
        assert_eq!(Role::from_str("DPS").unwrap(), Role::Dps);
        assert_eq!(Side::from_str("ENEMY").unwrap(), Side::Enemy);
        assert!(Element::from_str("plasma").is_err());
    }

    #[test]
    fn opposite_side_round_trips() {
        assert_eq!(Side::Party.opposite(), Side::Enemy);
        assert_eq!(Side::Party.opposite().opposite(), Side::Party);
    }
}
