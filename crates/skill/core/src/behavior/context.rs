//! Transient parameter bundle for one cast or one replica.

use glam::Vec2;

use crate::ability::TraitTags;
use crate::modifiers::SpreadPattern;
use crate::state::{
    AbilityId, ElementTag, EntityId, Faction, FactionFilter, PassiveDescriptor, PrefabId,
};

/// Everything a behavior needs to resolve one cast.
///
/// Built fresh for every top-level cast; replicas are clones produced by
/// [`ExecutionContext::replicate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionContext {
    pub ability: AbilityId,
    pub caster: EntityId,
    pub caster_faction: Faction,
    pub target: Option<EntityId>,
    pub traits: TraitTags,

    // === Resolved numbers ===
    pub damage: f32,
    pub range: f32,
    pub speed_multiplier: f32,
    pub duration_multiplier: f32,

    // === Loadout ===
    pub element: ElementTag,
    pub passive: PassiveDescriptor,

    // === Visuals ===
    pub prefab: PrefabId,
    pub impact_prefab: PrefabId,

    // === Multiplicity ===
    pub spawn_count: u32,
    pub pattern: SpreadPattern,
    pub multicast_chance: f32,

    // === Replication ===
    /// Recursion guard: once set, the context never triggers multi-cast again.
    pub is_replication: bool,
    pub replication_index: u32,
    pub replication_total: u32,
    /// Added to the caster position (projectiles) or anchor (areas).
    pub position_offset: Vec2,
    /// Fixed area anchor, overriding the behavior's anchor rule.
    pub anchor: Option<Vec2>,

    /// Cast counter value the context was built with; seeds its random rolls.
    pub nonce: u64,
}

impl ExecutionContext {
    /// Neutral context: no target, zero damage, single unit, no multi-cast.
    pub fn new(ability: AbilityId, caster: EntityId) -> Self {
        Self {
            ability,
            caster,
            caster_faction: Faction::Player,
            target: None,
            traits: TraitTags::empty(),
            damage: 0.0,
            range: 0.0,
            speed_multiplier: 1.0,
            duration_multiplier: 1.0,
            element: ElementTag::Neutral,
            passive: PassiveDescriptor::NONE,
            prefab: PrefabId::NONE,
            impact_prefab: PrefabId::NONE,
            spawn_count: 1,
            pattern: SpreadPattern::default(),
            multicast_chance: 0.0,
            is_replication: false,
            replication_index: 0,
            replication_total: 0,
            position_offset: Vec2::ZERO,
            anchor: None,
            nonce: 0,
        }
    }

    /// Clone for replica `index` of `total`: damage scaled by `damage_factor`,
    /// a single unit, shifted by `offset`, and flagged as a replication.
    pub fn replicate(&self, index: u32, total: u32, damage_factor: f32, offset: Vec2) -> Self {
        Self {
            damage: self.damage * damage_factor,
            spawn_count: 1,
            is_replication: true,
            replication_index: index,
            replication_total: total,
            position_offset: self.position_offset + offset,
            anchor: self.anchor.map(|anchor| anchor + offset),
            ..self.clone()
        }
    }

    /// Filter selecting entities this cast may hurt.
    pub fn hostile_filter(&self) -> FactionFilter {
        FactionFilter::HostileTo(self.caster_faction)
    }

    pub fn has_trait(&self, tag: TraitTags) -> bool {
        self.traits.contains(tag)
    }
}
