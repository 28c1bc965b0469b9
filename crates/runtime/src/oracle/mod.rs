//! Runtime implementations of the per-owner oracles.
//!
//! The world answers spatial, effect and prefab queries; these tables answer
//! the owner-scoped ones. Both are bundled into a [`skill_core::CombatEnv`] by
//! the simulation on every step.
mod attributes;
mod loadouts;

pub use attributes::{Attributes, OwnerAttributes};
pub use loadouts::Loadouts;
