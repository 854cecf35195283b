//! Combat items and the inventory contract.
//!
//! The executor only talks to the [`Inventory`] trait. [`PartyInventory`] is
//! the stacked implementation used by sessions and tests.

pub mod definition;
pub mod error;
pub mod inventory;

pub use definition::{ItemDefinition, ItemKind, ItemReport};
pub use error::ItemError;
pub use inventory::{Inventory, InventorySlot, PartyInventory};
