//! RPG-lite progression
//!
//! Player stats, the upgrade catalog, and the level-up controller that
//! pauses the simulation while an upgrade choice is pending.

pub mod catalog;
pub mod controller;
pub mod stats;

pub use catalog::{UpgradeCatalog, UpgradeDefinition, UpgradeId};
pub use controller::{ProgressionController, ProgressionPhase};
pub use stats::PlayerStats;
