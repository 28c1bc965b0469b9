//! Identity, faction and loadout value types shared by every module.
//!
//! Positions and directions are planar [`glam::Vec2`]; simulation time is
//! `f32` seconds supplied by the host on every update.
mod common;
mod element;
mod faction;

pub use common::{AbilityId, EntityId, PrefabId, VisualHandle};
pub use element::{ElementTag, PassiveDescriptor, PassiveKind};
pub use faction::{Faction, FactionFilter};
