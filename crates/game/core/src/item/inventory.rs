//! Item storage.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::combat::CombatContext;
use crate::state::CombatantId;

use super::{ItemDefinition, ItemError, ItemReport};

/// Item collaborator of the action executor.
pub trait Inventory {
    fn has_item(&self, item_id: &str) -> bool;

    /// Uses one unit of `item_id`, consuming it on success when the item is
    /// consumable. Nothing is consumed on failure.
    fn use_item(
        &mut self,
        item_id: &str,
        user: CombatantId,
        targets: &[CombatantId],
        ctx: &mut CombatContext<'_>,
    ) -> Result<ItemReport, ItemError>;
}

/// A stack of one item.
#[derive(Clone, Debug, PartialEq)]
pub struct InventorySlot {
    pub item: Arc<ItemDefinition>,
    pub quantity: u32,
}

/// Party-wide item storage: one stack per distinct item, limited number of
/// stacks, empty stacks removed.
#[derive(Clone, Debug, PartialEq)]
pub struct PartyInventory {
    slots: Vec<InventorySlot>,
    max_slots: usize,
}

impl Default for PartyInventory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SLOTS)
    }
}

impl PartyInventory {
    pub const DEFAULT_MAX_SLOTS: usize = 20;

    pub fn new(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_slots,
        }
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    fn slot(&self, item_id: &str) -> Option<&InventorySlot> {
        self.slots.iter().find(|slot| slot.item.id == item_id)
    }

    /// Adds `quantity` units, stacking onto an existing slot if present.
    pub fn add_item(&mut self, item: Arc<ItemDefinition>, quantity: u32) -> Result<(), ItemError> {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.item.id == item.id) {
            slot.quantity += quantity;
            debug!(item = %item.id, total = slot.quantity, "stacked item");
            return Ok(());
        }
        if self.slots.len() >= self.max_slots {
            warn!(item = %item.id, max = self.max_slots, "inventory full");
            return Err(ItemError::InventoryFull {
                max: self.max_slots,
            });
        }
        debug!(item = %item.id, quantity, "added item");
        self.slots.push(InventorySlot { item, quantity });
        Ok(())
    }

    /// Removes `quantity` units, dropping the stack once empty.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> Result<(), ItemError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.item.id == item_id)
            .ok_or_else(|| ItemError::NotHeld(item_id.to_owned()))?;

        let slot = &mut self.slots[index];
        if slot.quantity < quantity {
            return Err(ItemError::NotEnough {
                item: item_id.to_owned(),
                held: slot.quantity,
                requested: quantity,
            });
        }
        slot.quantity -= quantity;
        if slot.quantity == 0 {
            self.slots.remove(index);
        }
        Ok(())
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.slot(item_id).map_or(0, |slot| slot.quantity)
    }

    pub fn get(&self, item_id: &str) -> Option<&Arc<ItemDefinition>> {
        self.slot(item_id).map(|slot| &slot.item)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl Inventory for PartyInventory {
    fn has_item(&self, item_id: &str) -> bool {
        self.quantity(item_id) > 0
    }

    fn use_item(
        &mut self,
        item_id: &str,
        user: CombatantId,
        targets: &[CombatantId],
        ctx: &mut CombatContext<'_>,
    ) -> Result<ItemReport, ItemError> {
        let item = self
            .get(item_id)
            .filter(|_| self.has_item(item_id))
            .cloned()
            .ok_or_else(|| ItemError::NotHeld(item_id.to_owned()))?;

        let report = item.apply(user, targets, ctx)?;
        if item.consumable {
            self.remove_item(item_id, 1)?;
        }
        Ok(report)
    }
}
