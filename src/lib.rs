//! sprite-curator - trims rarity-tagged sprite folders to fixed quotas
//!
//! This library classifies `<n>_BBTap_<Rarity>.png` files, selects which ones
//! each rarity keeps, deletes the rest, and renumbers the survivors from 1 per
//! rarity.

pub mod cli;
pub mod config;
pub mod curator;
pub mod output;
pub mod plan;
pub mod rarity;
pub mod sprite_file;

pub use config::{ConfigError, CurationRules, RarityRule};
pub use curator::{CurateError, CurateResult, CurationReport, Curator};
pub use plan::{CurationPlan, DeletionReason};
pub use rarity::Rarity;
pub use sprite_file::SpriteFile;

pub use cli::{Args, run_cli};
