//! Action dispatch.
//!
//! # Execution Flow
//!
//! ```text
//! validate actor → confusion override (attacks and skills) → dispatch by kind
//!     → ActionExecuted event
//! ```
//!
//! Validation failures return before anything is mutated or emitted.

use tracing::{debug, info};

use crate::ability::{AbilityEffects, AbilityOutcome, UtilityRegistry, resolve};
use crate::combat::{CombatContext, Hit, raw_damage};
use crate::engine::TurnScheduler;
use crate::events::BattleEvent;
use crate::item::{Inventory, ItemError};
use crate::state::CombatantId;

use super::{Action, ActionError, ActionKind, ActionOutcome, confusion_redirect};

/// Executes one action against the battle state.
pub struct ActionExecutor<'a> {
    ctx: CombatContext<'a>,
    scheduler: &'a mut TurnScheduler,
    utilities: &'a UtilityRegistry,
    inventory: Option<&'a mut dyn Inventory>,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(
        ctx: CombatContext<'a>,
        scheduler: &'a mut TurnScheduler,
        utilities: &'a UtilityRegistry,
    ) -> Self {
        Self {
            ctx,
            scheduler,
            utilities,
            inventory: None,
        }
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Option<&'a mut dyn Inventory>) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn execute(&mut self, action: &Action) -> Result<ActionOutcome, ActionError> {
        let actor = action.actor;
        if !self.ctx.roster.require(actor)?.is_alive() {
            return Err(ActionError::ActorDefeated(actor));
        }
        self.validate(action)?;

        let mut targets = action.targets.clone();
        if action.is_offensive() {
            if let Some(target) = confusion_redirect(&*self.ctx.roster, actor, &mut *self.ctx.rng) {
                debug!(%actor, %target, "confusion redirects action");
                self.ctx
                    .events
                    .emit(BattleEvent::ActionRedirected { actor, target });
                targets = vec![target];
            }
        }

        info!(%actor, kind = %action.kind, targets = targets.len(), "executing action");
        let outcome = match action.kind {
            ActionKind::Attack => self.attack(action, &targets)?,
            ActionKind::Skill => self.skill(action, &targets)?,
            ActionKind::Item => self.use_item(action, &targets)?,
            ActionKind::Defend => {
                if let Some(combatant) = self.ctx.roster.get_mut(actor) {
                    combatant.defend();
                }
                ActionOutcome::Defended
            }
            ActionKind::Flee => {
                let attempt = self.scheduler.attempt_flee(&mut self.ctx, actor);
                if attempt.escaped {
                    ActionOutcome::FleeSucceeded {
                        chance: attempt.chance,
                    }
                } else {
                    ActionOutcome::FleeFailed {
                        chance: attempt.chance,
                    }
                }
            }
            ActionKind::Talk => {
                let dialogue_id = action.dialogue_id.clone().unwrap_or_default();
                self.ctx.events.emit(BattleEvent::DialogueRequested {
                    actor,
                    dialogue_id: dialogue_id.clone(),
                });
                ActionOutcome::Dialogue(dialogue_id)
            }
        };

        self.ctx.events.emit(BattleEvent::ActionExecuted {
            actor,
            kind: action.kind,
            targets,
        });
        Ok(outcome)
    }

    /// Shape and resource checks that need no randomness.
    fn validate(&self, action: &Action) -> Result<(), ActionError> {
        let actor = self.ctx.roster.require(action.actor)?;
        match action.kind {
            ActionKind::Attack => {
                let target = action.targets.first().ok_or(ActionError::NoTargets)?;
                match &action.ability {
                    Some(ability) => ability.check_usable(actor)?,
                    None if !self.ctx.roster.require(*target)?.is_alive() => {
                        return Err(ActionError::TargetDefeated(*target));
                    }
                    None => {}
                }
            }
            ActionKind::Skill => {
                let ability = action.ability.as_ref().ok_or(ActionError::MissingAbility)?;
                ability.check_usable(actor)?;
                if action.targets.is_empty() {
                    return Err(ActionError::NoTargets);
                }
            }
            ActionKind::Item => {
                let item = action.item.as_deref().ok_or(ActionError::MissingItem)?;
                let inventory = self.inventory.as_deref().ok_or(ActionError::NoInventory)?;
                if !inventory.has_item(item) {
                    return Err(ItemError::NotHeld(item.to_owned()).into());
                }
                if action.targets.is_empty() {
                    return Err(ActionError::NoTargets);
                }
            }
            ActionKind::Talk => {
                if action.dialogue_id.as_deref().is_none_or(str::is_empty) {
                    return Err(ActionError::EmptyDialogue);
                }
            }
            ActionKind::Defend | ActionKind::Flee => {}
        }
        Ok(())
    }

    fn attack(
        &mut self,
        action: &Action,
        targets: &[CombatantId],
    ) -> Result<ActionOutcome, ActionError> {
        if let Some(ability) = &action.ability {
            let outcome = resolve(ability, action.actor, targets, &mut self.ctx, self.utilities)?;
            return Ok(ActionOutcome::Resolved(outcome));
        }

        // Fallback: flat basic attack on the first target, then MP regain.
        let actor = self.ctx.roster.require(action.actor)?;
        let element = actor.element();
        let raw = raw_damage(self.ctx.config.basic_attack_power, actor.modified_attack());
        let regain = actor.mana_percent(self.ctx.config.basic_attack_mp_restore_percent);

        let mut effects = AbilityEffects::default();
        if let Some(&target) = targets.first() {
            let report = self
                .ctx
                .deal(target, Hit::standard(raw, element, action.actor), false);
            effects.damage_dealt = report.dealt;
        }
        self.ctx.restore_mana(action.actor, regain);
        Ok(ActionOutcome::Resolved(AbilityOutcome::Resolved(effects)))
    }

    fn skill(
        &mut self,
        action: &Action,
        targets: &[CombatantId],
    ) -> Result<ActionOutcome, ActionError> {
        let ability = action.ability.as_ref().ok_or(ActionError::MissingAbility)?;
        let outcome = resolve(ability, action.actor, targets, &mut self.ctx, self.utilities)?;
        Ok(ActionOutcome::Resolved(outcome))
    }

    fn use_item(
        &mut self,
        action: &Action,
        targets: &[CombatantId],
    ) -> Result<ActionOutcome, ActionError> {
        let item = action.item.as_deref().ok_or(ActionError::MissingItem)?;
        let inventory = self.inventory.as_deref_mut().ok_or(ActionError::NoInventory)?;

        let report = inventory.use_item(item, action.actor, targets, &mut self.ctx)?;
        self.ctx.events.emit(BattleEvent::ItemUsed {
            actor: action.actor,
            item: report.item.clone(),
        });
        if report.escape {
            self.scheduler.guaranteed_flee(&mut self.ctx);
        }
        Ok(ActionOutcome::ItemUsed(report))
    }
}
