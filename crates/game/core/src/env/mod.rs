//! Environment collaborators injected into resolution.
//!
//! The simulation never reaches for ambient randomness: every roll goes
//! through an [`RngOracle`] handed in by the caller.

pub mod rng;

pub use rng::{PcgRng, RngOracle, ScriptedRng};
