//! Data-driven content definitions and loaders.
//!
//! This crate houses authored combat content and the loaders for its RON/TOML
//! data files:
//! - Ability definitions (data-driven via RON)
//! - Combat tuning (data-driven via TOML)
//! - Headless scenarios: player loadout, enemy waves, timed bonus grants
//!   (data-driven via TOML)
//!
//! Ability names are resolved to [`skill_core::AbilityId`]s when the catalog is
//! built; nothing downstream compares names again.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{BonusGrant, EnemyWave, PlayerSpec, Scenario, TimedBonus};

#[cfg(feature = "loaders")]
pub use loaders::{AbilityLoader, ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
