//! Shared arena and ability definitions for skill-core integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::sync::Arc;

use skill_core::{
    AbilityCatalog, AbilityDefinition, AbilityId, AreaParams, Behavior, CombatEnv, DeliveryTags,
    DotParams, EffectSink, ElementTag, EntityId, Faction, FactionFilter, LoadoutOracle,
    OwnerOracle, PassiveDescriptor, PcgRng, PrefabId, PrefabSpawner, ProjectileParams,
    SpatialOracle, SpreadPattern, TraitTags, Vec2, VisualHandle,
};

pub const ARROW: AbilityId = AbilityId(1);
pub const FIREBALL: AbilityId = AbilityId(2);
pub const POISON: AbilityId = AbilityId(3);

pub fn arrow() -> AbilityDefinition {
    AbilityDefinition {
        id: ARROW,
        name: "Arrow".into(),
        delivery: DeliveryTags::PROJECTILE,
        traits: TraitTags::SINGLE_TARGET,
        base_damage: 10.0,
        damage_per_level: 2.0,
        base_cooldown: 1.0,
        cooldown_per_level: -0.1,
        base_range: 8.0,
        range_per_level: 0.0,
        max_level: 5,
        base_count: 1,
        pattern: SpreadPattern::Fan {
            spread_degrees: 15.0,
        },
        multicast_delay: None,
        prefab: PrefabId(10),
        impact_prefab: PrefabId::NONE,
        behavior: Behavior::Projectile(ProjectileParams::default()),
    }
}

pub fn fireball() -> AbilityDefinition {
    AbilityDefinition {
        id: FIREBALL,
        name: "Fireball".into(),
        delivery: DeliveryTags::AREA,
        traits: TraitTags::INSTANT | TraitTags::MULTI_TARGET | TraitTags::EXPLOSIVE,
        base_damage: 20.0,
        damage_per_level: 5.0,
        base_cooldown: 3.0,
        cooldown_per_level: 0.0,
        base_range: 3.0,
        range_per_level: 0.0,
        max_level: 5,
        base_count: 1,
        pattern: SpreadPattern::Ring,
        multicast_delay: Some(0.2),
        prefab: PrefabId(20),
        impact_prefab: PrefabId(21),
        behavior: Behavior::AreaInstant(AreaParams::default()),
    }
}

pub fn poison_cloud() -> AbilityDefinition {
    AbilityDefinition {
        id: POISON,
        name: "Poison Cloud".into(),
        delivery: DeliveryTags::AREA | DeliveryTags::DOT,
        traits: TraitTags::MULTI_TARGET,
        base_damage: 4.0,
        damage_per_level: 1.0,
        base_cooldown: 5.0,
        cooldown_per_level: 0.0,
        base_range: 2.5,
        range_per_level: 0.0,
        max_level: 5,
        base_count: 1,
        pattern: SpreadPattern::Ring,
        multicast_delay: None,
        prefab: PrefabId(30),
        impact_prefab: PrefabId::NONE,
        behavior: Behavior::AreaDot(DotParams::default()),
    }
}

pub fn catalog() -> Arc<AbilityCatalog> {
    Arc::new(AbilityCatalog::new([arrow(), fireball(), poison_cloud()]).expect("valid catalog"))
}

/// Flat 2D arena with a player at the origin.
#[derive(Default)]
pub struct Arena {
    bodies: RefCell<BTreeMap<EntityId, (Vec2, Faction)>>,
    pub damage: RefCell<Vec<(EntityId, f32)>>,
    next_visual: Cell<u64>,
    pub attack_power: f32,
}

impl Arena {
    pub fn new() -> Self {
        let arena = Self::default();
        arena.place(EntityId::PLAYER, Vec2::ZERO, Faction::Player);
        arena
    }

    pub fn place(&self, entity: EntityId, position: Vec2, faction: Faction) {
        self.bodies.borrow_mut().insert(entity, (position, faction));
    }

    pub fn enemy(&self, id: u32, x: f32, y: f32) -> EntityId {
        let entity = EntityId(id);
        self.place(entity, Vec2::new(x, y), Faction::Enemy);
        entity
    }

    pub fn hits_on(&self, entity: EntityId) -> usize {
        self.damage.borrow().iter().filter(|(e, _)| *e == entity).count()
    }

    pub fn env(&self) -> CombatEnv<'_> {
        CombatEnv::with_all(self, self, self, self, self, &PcgRng)
    }
}

impl SpatialOracle for Arena {
    fn entities_within(&self, point: Vec2, radius: f32, filter: FactionFilter) -> Vec<EntityId> {
        self.bodies
            .borrow()
            .iter()
            .filter(|(_, (position, faction))| {
                filter.matches(*faction) && position.distance(point) <= radius
            })
            .map(|(entity, _)| *entity)
            .collect()
    }

    fn nearest(&self, point: Vec2, radius: f32, filter: FactionFilter) -> Option<EntityId> {
        let bodies = self.bodies.borrow();
        self.entities_within(point, radius, filter)
            .into_iter()
            .min_by(|a, b| {
                bodies[a]
                    .0
                    .distance_squared(point)
                    .total_cmp(&bodies[b].0.distance_squared(point))
            })
    }

    fn position_of(&self, entity: EntityId) -> Option<Vec2> {
        self.bodies.borrow().get(&entity).map(|(position, _)| *position)
    }
}

impl EffectSink for Arena {
    fn apply_damage(&self, entity: EntityId, amount: f32) {
        self.damage.borrow_mut().push((entity, amount));
    }

    fn apply_passive(&self, _entity: EntityId, _passive: &PassiveDescriptor, _source_damage: f32) {}
}

impl PrefabSpawner for Arena {
    fn spawn(&self, _prefab: PrefabId, _position: Vec2, _rotation: f32) -> VisualHandle {
        let handle = self.next_visual.get() + 1;
        self.next_visual.set(handle);
        VisualHandle(handle)
    }

    fn destroy_after(&self, _handle: VisualHandle, _seconds: f32) {}
}

impl OwnerOracle for Arena {
    fn attack_power(&self, _owner: EntityId) -> f32 {
        self.attack_power
    }

    fn attack_range(&self, _owner: EntityId) -> f32 {
        10.0
    }
}

impl LoadoutOracle for Arena {
    fn current_element(&self, _owner: EntityId) -> ElementTag {
        ElementTag::Neutral
    }

    fn current_passive(&self, _owner: EntityId) -> PassiveDescriptor {
        PassiveDescriptor::NONE
    }
}
