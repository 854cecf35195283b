//! Item definitions and their effect on combatants.

use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

use crate::ability::TargetPattern;
use crate::combat::{CombatContext, Hit};
use crate::state::{CombatantId, Element, StatusEffect, StatusEffectKind};

use super::ItemError;

/// What an item does when used.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Heals living, wounded targets by `power`.
    #[default]
    Healing,
    /// Restores `power` MP to living targets below max.
    MpRestore,
    /// Revives dead targets at `power` percent of max health.
    Revive,
    /// Applies `status` with magnitude `power`.
    Buff,
    /// Clears every status effect of afflicted targets.
    Cure,
    /// Standard hit of `power` from the user.
    Damage,
    /// Ends combat as an escape.
    Escape,
}

/// A consumable or reusable combat item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub target: TargetPattern,
    pub power: f32,
    /// Duration of the applied status, for buff items.
    pub duration: i32,
    pub status: Option<StatusEffectKind>,
    pub consumable: bool,
}

/// What a successful item use did.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemReport {
    pub item: String,
    pub affected: Vec<CombatantId>,
    /// The item ends combat as an escape.
    pub escape: bool,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            target: TargetPattern::SingleAlly,
            power: 0.0,
            duration: 0,
            status: None,
            consumable: true,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetPattern) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusEffectKind, duration: i32) -> Self {
        self.status = Some(status);
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn reusable(mut self) -> Self {
        self.consumable = false;
        self
    }

    /// Applies the item to `targets`.
    ///
    /// Succeeds when at least one target was affected. Escape items always
    /// succeed and leave the flee itself to the caller.
    pub fn apply(
        &self,
        user: CombatantId,
        targets: &[CombatantId],
        ctx: &mut CombatContext<'_>,
    ) -> Result<ItemReport, ItemError> {
        if targets.is_empty() {
            return Err(ItemError::NoTargets(self.id.clone()));
        }
        debug!(%user, item = %self.id, kind = %self.kind, "using item");

        let mut report = ItemReport {
            item: self.id.clone(),
            ..ItemReport::default()
        };

        for &target in targets {
            let Some(combatant) = ctx.roster.get(target) else {
                continue;
            };
            let alive = combatant.is_alive();
            let wounded = combatant.health() < combatant.max_health();
            let drained = combatant.mana() < combatant.max_mana();
            let afflicted = !combatant.statuses().is_empty();

            let affected = match self.kind {
                ItemKind::Healing => alive && wounded && ctx.heal(target, self.power) > 0.0,
                ItemKind::MpRestore => {
                    alive && drained && ctx.restore_mana(target, self.power) > 0.0
                }
                ItemKind::Revive => !alive && ctx.revive(target, self.power / 100.0),
                ItemKind::Buff => match self.status {
                    Some(kind) if alive => {
                        ctx.apply_status(target, StatusEffect::new(kind, self.duration, self.power))
                    }
                    _ => false,
                },
                ItemKind::Cure => alive && afflicted && ctx.clear_statuses(target) > 0,
                ItemKind::Damage => {
                    if alive {
                        ctx.deal(target, Hit::standard(self.power, Element::Neutral, user), false);
                    }
                    alive
                }
                ItemKind::Escape => {
                    report.escape = true;
                    return Ok(report);
                }
            };

            if affected {
                report.affected.push(target);
            }
        }

        if report.affected.is_empty() {
            return Err(ItemError::NoEffect(self.id.clone()));
        }
        Ok(report)
    }
}
