//! Per-owner attribute and loadout providers.

use crate::state::{ElementTag, EntityId, PassiveDescriptor};

/// Current elemental loadout of an owner.
pub trait LoadoutOracle {
    fn current_element(&self, owner: EntityId) -> ElementTag;

    fn current_passive(&self, owner: EntityId) -> PassiveDescriptor;
}

/// Base attributes of an owner that feed into ability resolution.
pub trait OwnerOracle {
    /// Flat attack power added to every ability's level damage.
    fn attack_power(&self, owner: EntityId) -> f32;

    /// Baseline acquisition radius used when searching for targets.
    fn attack_range(&self, owner: EntityId) -> f32;
}
