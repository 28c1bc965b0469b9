//! Attack power and range per owner.

use std::collections::BTreeMap;

use skill_core::{EntityId, OwnerOracle, SkillOwner, StatBucket};

/// Authored attributes before player-scoped bonuses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OwnerAttributes {
    pub attack_power: f32,
    pub attack_range: f32,
}

#[derive(Clone, Debug, Default)]
pub struct Attributes {
    base: BTreeMap<EntityId, OwnerAttributes>,
    effective: BTreeMap<EntityId, OwnerAttributes>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, owner: EntityId, attributes: OwnerAttributes) {
        self.base.insert(owner, attributes);
        self.effective.insert(owner, attributes);
    }

    /// Re-derives effective values from `owner`'s `PlayerPower` and
    /// `PlayerRange` buckets.
    pub fn refresh(&mut self, owner: &SkillOwner) {
        let Some(base) = self.base.get(&owner.id()) else {
            return;
        };
        let effective = OwnerAttributes {
            attack_power: base.attack_power * owner.player_multiplier(StatBucket::PlayerPower),
            attack_range: base.attack_range * owner.player_multiplier(StatBucket::PlayerRange),
        };
        self.effective.insert(owner.id(), effective);
    }

    pub fn get(&self, owner: EntityId) -> Option<OwnerAttributes> {
        self.effective.get(&owner).copied()
    }
}

impl OwnerOracle for Attributes {
    fn attack_power(&self, owner: EntityId) -> f32 {
        self.get(owner).map_or(0.0, |a| a.attack_power)
    }

    fn attack_range(&self, owner: EntityId) -> f32 {
        self.get(owner).map_or(0.0, |a| a.attack_range)
    }
}
