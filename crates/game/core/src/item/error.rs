//! Item errors.

use crate::error::{BattleError, ErrorSeverity};

/// Errors that occur while storing or using items.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemError {
    /// Every slot holds a different item.
    #[error("Inventory is full (max slots: {max})")]
    InventoryFull { max: usize },

    /// The inventory holds none of this item.
    #[error("Item '{0}' is not held")]
    NotHeld(String),

    /// Fewer units are held than requested.
    #[error("Not enough '{item}': have {held}, need {requested}")]
    NotEnough {
        item: String,
        held: u32,
        requested: u32,
    },

    /// The item was used without any target.
    #[error("Item '{0}' has no targets")]
    NoTargets(String),

    /// No target was affected; nothing is consumed.
    #[error("Item '{0}' had no effect")]
    NoEffect(String),
}

impl BattleError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        use ItemError::*;
        match self {
            InventoryFull { .. } | NotEnough { .. } => ErrorSeverity::Recoverable,
            NotHeld(_) | NoEffect(_) => ErrorSeverity::Recoverable,
            NoTargets(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ItemError::*;
        match self {
            InventoryFull { .. } => "ITEM_INVENTORY_FULL",
            NotHeld(_) => "ITEM_NOT_HELD",
            NotEnough { .. } => "ITEM_NOT_ENOUGH",
            NoTargets(_) => "ITEM_NO_TARGETS",
            NoEffect(_) => "ITEM_NO_EFFECT",
        }
    }
}
