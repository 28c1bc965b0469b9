//! In-memory host world for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use glam::Vec2;

use crate::env::{CombatEnv, EffectSink, LoadoutOracle, OwnerOracle, PcgRng, PrefabSpawner, SpatialOracle};
use crate::state::{
    ElementTag, EntityId, Faction, FactionFilter, PassiveDescriptor, PrefabId, VisualHandle,
};

#[derive(Default)]
pub struct FakeWorld {
    bodies: RefCell<BTreeMap<EntityId, (Vec2, Faction)>>,
    pub damage: RefCell<Vec<(EntityId, f32)>>,
    pub passives: RefCell<Vec<EntityId>>,
    pub spawned: RefCell<Vec<(PrefabId, Vec2)>>,
    pub destroyed: RefCell<Vec<VisualHandle>>,
    next_visual: Cell<u64>,
}

impl FakeWorld {
    /// Player at the origin.
    pub fn new() -> Self {
        let world = Self::default();
        world.place(EntityId::PLAYER, Vec2::ZERO, Faction::Player);
        world
    }

    pub fn place(&self, entity: EntityId, position: Vec2, faction: Faction) {
        self.bodies.borrow_mut().insert(entity, (position, faction));
    }

    pub fn enemy(&self, id: u32, x: f32, y: f32) -> EntityId {
        let entity = EntityId(id);
        self.place(entity, Vec2::new(x, y), Faction::Enemy);
        entity
    }

    pub fn remove(&self, entity: EntityId) {
        self.bodies.borrow_mut().remove(&entity);
    }

    pub fn hits_on(&self, entity: EntityId) -> usize {
        self.damage.borrow().iter().filter(|(e, _)| *e == entity).count()
    }

    pub fn damage_on(&self, entity: EntityId) -> f32 {
        self.damage
            .borrow()
            .iter()
            .filter(|(e, _)| *e == entity)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl SpatialOracle for FakeWorld {
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
                let da = bodies[a].0.distance_squared(point);
                let db = bodies[b].0.distance_squared(point);
                da.total_cmp(&db)
            })
    }

    fn position_of(&self, entity: EntityId) -> Option<Vec2> {
        self.bodies.borrow().get(&entity).map(|(position, _)| *position)
    }
}

impl EffectSink for FakeWorld {
    fn apply_damage(&self, entity: EntityId, amount: f32) {
        self.damage.borrow_mut().push((entity, amount));
    }

    fn apply_passive(&self, entity: EntityId, _passive: &PassiveDescriptor, _source_damage: f32) {
        self.passives.borrow_mut().push(entity);
    }
}

impl PrefabSpawner for FakeWorld {
    fn spawn(&self, prefab: PrefabId, position: Vec2, _rotation: f32) -> VisualHandle {
        self.spawned.borrow_mut().push((prefab, position));
        let handle = self.next_visual.get() + 1;
        self.next_visual.set(handle);
        VisualHandle(handle)
    }

    fn destroy_after(&self, handle: VisualHandle, _seconds: f32) {
        self.destroyed.borrow_mut().push(handle);
    }
}

/// Fixed attributes and loadout for every owner.
pub struct FixedOwner {
    pub attack_power: f32,
    pub attack_range: f32,
    pub passive: PassiveDescriptor,
}

impl Default for FixedOwner {
    fn default() -> Self {
        Self {
            attack_power: 0.0,
            attack_range: 10.0,
            passive: PassiveDescriptor::NONE,
        }
    }
}

impl OwnerOracle for FixedOwner {
    fn attack_power(&self, _owner: EntityId) -> f32 {
        self.attack_power
    }

    fn attack_range(&self, _owner: EntityId) -> f32 {
        self.attack_range
    }
}

impl LoadoutOracle for FixedOwner {
    fn current_element(&self, _owner: EntityId) -> ElementTag {
        ElementTag::Fire
    }

    fn current_passive(&self, _owner: EntityId) -> PassiveDescriptor {
        self.passive
    }
}

pub static RNG: PcgRng = PcgRng;

pub fn env<'a>(world: &'a FakeWorld, owner: &'a FixedOwner) -> CombatEnv<'a> {
    CombatEnv::with_all(world, world, world, owner, owner, &RNG)
}
