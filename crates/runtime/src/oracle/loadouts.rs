//! Element and on-hit passive per owner.

use std::collections::BTreeMap;

use skill_core::{ElementTag, EntityId, LoadoutOracle, PassiveDescriptor};

#[derive(Clone, Debug, Default)]
pub struct Loadouts {
    entries: BTreeMap<EntityId, (ElementTag, PassiveDescriptor)>,
}

impl Loadouts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, owner: EntityId, element: ElementTag, passive: PassiveDescriptor) {
        self.entries.insert(owner, (element, passive));
    }
}

impl LoadoutOracle for Loadouts {
    fn current_element(&self, owner: EntityId) -> ElementTag {
        self.entries
            .get(&owner)
            .map_or(ElementTag::default(), |(element, _)| *element)
    }

    fn current_passive(&self, owner: EntityId) -> PassiveDescriptor {
        self.entries
            .get(&owner)
            .map_or(PassiveDescriptor::NONE, |(_, passive)| *passive)
    }
}
