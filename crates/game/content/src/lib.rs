//! Data-driven battle content.
//!
//! This crate turns data files into core definitions:
//! - Ability catalogs (RON)
//! - Character catalogs (RON), referencing abilities by id
//! - Item catalogs (RON)
//! - Encounters (RON)
//! - Battle configuration (TOML)
//!
//! Text tags are resolved exactly once, in [`tags`], while records are
//! converted. The resulting [`ContentRegistry`] is read-only during battle.

pub mod records;
pub mod registry;
pub mod tags;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use records::{
    AbilityCatalog, AbilityRecord, CharacterCatalog, CharacterRecord, EncounterCatalog,
    EncounterRecord, ItemCatalog, ItemRecord,
};
pub use registry::{CharacterTemplate, ContentRegistry};
pub use tags::{parse_status, parse_tag};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CharacterLoader, ConfigLoader, ContentFactory, EncounterLoader, ItemLoader,
};
