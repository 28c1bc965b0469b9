//! Entity table implementing the spatial, effect and prefab oracles.
//!
//! The oracles take `&self`, so mutable state sits behind `RefCell`. The
//! simulation is single-threaded and no oracle call re-enters another, so
//! borrows never overlap.

mod status;
mod visuals;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use glam::Vec2;
use skill_core::{
    EffectSink, EntityId, Faction, FactionFilter, PassiveDescriptor, PrefabId, PrefabSpawner,
    SpatialOracle, VisualHandle,
};

use crate::events::{CombatEvent, DamageCause};

pub use status::{ActiveStatus, StatusSlot};
pub use visuals::Visual;
use visuals::Visuals;

/// Distance at which a chasing body stops and starts dealing contact damage.
pub const CONTACT_RANGE: f32 = 0.6;

/// How far a chasing body looks for something to chase.
pub const AGGRO_RADIUS: f32 = 40.0;

/// One simulated entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Units per second.
    pub speed: f32,
    /// Damage per second dealt to a touched hostile.
    pub contact_damage: f32,
    /// Chasing bodies walk toward the nearest hostile every step.
    pub chases: bool,
    pub status: StatusSlot,
}

impl Body {
    pub fn new(name: impl Into<String>, faction: Faction, position: Vec2, health: f32) -> Self {
        Self {
            id: EntityId::PLAYER,
            name: name.into(),
            faction,
            position,
            health,
            max_health: health,
            speed: 0.0,
            contact_damage: 0.0,
            chases: false,
            status: StatusSlot::default(),
        }
    }

    /// A hostile that walks toward its nearest target and hurts it on contact.
    pub fn chaser(
        name: impl Into<String>,
        position: Vec2,
        health: f32,
        speed: f32,
        contact_damage: f32,
    ) -> Self {
        Self {
            speed,
            contact_damage,
            chases: true,
            ..Self::new(name, Faction::Enemy, position, health)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Result of one [`World::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldStep {
    pub killed: Vec<EntityId>,
    pub status_damage: f32,
    pub contact_damage: f32,
    pub visuals_expired: usize,
}

#[derive(Debug, Default)]
pub struct World {
    bodies: RefCell<BTreeMap<EntityId, Body>>,
    visuals: RefCell<Visuals>,
    events: RefCell<Vec<CombatEvent>>,
    clock: Cell<f32>,
    next_id: Cell<u32>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Entities
    // ========================================================================

    /// Inserts `body` under its own id, replacing any body with that id.
    pub fn insert(&self, body: Body) {
        let id = body.id;
        self.next_id.set(self.next_id.get().max(id.0 + 1));
        self.bodies.borrow_mut().insert(id, body);
    }

    /// Inserts `body` under a freshly allocated id.
    pub fn spawn_body(&self, mut body: Body) -> EntityId {
        let id = EntityId(self.next_id.get().max(1));
        body.id = id;
        self.insert(body);
        id
    }

    pub fn body(&self, entity: EntityId) -> Option<Body> {
        self.bodies.borrow().get(&entity).cloned()
    }

    /// Applies `f` to a body in place, returning its result.
    pub fn with_body_mut<R>(&self, entity: EntityId, f: impl FnOnce(&mut Body) -> R) -> Option<R> {
        self.bodies.borrow_mut().get_mut(&entity).map(f)
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.bodies
            .borrow()
            .get(&entity)
            .is_some_and(Body::is_alive)
    }

    pub fn health_of(&self, entity: EntityId) -> Option<f32> {
        self.bodies.borrow().get(&entity).map(|body| body.health)
    }

    /// Living members of `faction`.
    pub fn count(&self, faction: Faction) -> usize {
        self.bodies
            .borrow()
            .values()
            .filter(|body| body.faction == faction && body.is_alive())
            .count()
    }

    // ========================================================================
    // Clock and events
    // ========================================================================

    pub fn clock(&self) -> f32 {
        self.clock.get()
    }

    pub(crate) fn set_clock(&self, now: f32) {
        self.clock.set(now);
    }

    pub(crate) fn drain_events(&self) -> Vec<CombatEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    // ========================================================================
    // Visuals
    // ========================================================================

    pub fn visual(&self, handle: VisualHandle) -> Option<Visual> {
        self.visuals.borrow().get(handle).copied()
    }

    pub fn live_visuals(&self) -> usize {
        self.visuals.borrow().live()
    }

    pub fn visuals_spawned(&self) -> u64 {
        self.visuals.borrow().spawned_total()
    }

    // ========================================================================
    // Step
    // ========================================================================

    /// Advances statuses, chasing movement, contact damage, deaths and visual
    /// expiry by `dt`, at the current clock.
    pub fn step(&self, dt: f32) -> WorldStep {
        let mut summary = WorldStep::default();
        self.tick_statuses(dt, &mut summary);
        self.move_chasers(dt);
        self.apply_contact(dt, &mut summary);
        self.remove_dead(&mut summary);
        summary.visuals_expired = self.visuals.borrow_mut().sweep(self.clock());
        summary
    }

    fn tick_statuses(&self, dt: f32, summary: &mut WorldStep) {
        let ticked: Vec<(EntityId, f32)> = self
            .bodies
            .borrow_mut()
            .values_mut()
            .filter(|body| body.is_alive())
            .map(|body| (body.id, body.status.tick(dt)))
            .filter(|(_, damage)| *damage > 0.0)
            .collect();
        for (entity, damage) in ticked {
            summary.status_damage += self.damage(entity, damage, DamageCause::Status);
        }
    }

    /// Nearest living hostile to `body`, with its position.
    fn chase_target(&self, body: &Body) -> Option<(EntityId, Vec2)> {
        let target = self.nearest(body.position, AGGRO_RADIUS, FactionFilter::HostileTo(body.faction))?;
        Some((target, self.position_of(target)?))
    }

    fn move_chasers(&self, dt: f32) {
        let moves: Vec<(EntityId, Vec2)> = {
            let bodies = self.bodies.borrow();
            bodies
                .values()
                .filter(|body| body.chases && body.is_alive() && body.speed > 0.0)
                .filter_map(|body| {
                    let (_, goal) = self.chase_target(body)?;
                    let offset = goal - body.position;
                    let gap = offset.length() - CONTACT_RANGE;
                    if gap <= 0.0 {
                        return None;
                    }
                    let step = (body.speed * body.status.movement_factor() * dt).min(gap);
                    Some((body.id, body.position + offset.normalize_or_zero() * step))
                })
                .collect()
        };
        let mut bodies = self.bodies.borrow_mut();
        for (entity, position) in moves {
            if let Some(body) = bodies.get_mut(&entity) {
                body.position = position;
            }
        }
    }

    fn apply_contact(&self, dt: f32, summary: &mut WorldStep) {
        let touches: Vec<(EntityId, f32)> = {
            let bodies = self.bodies.borrow();
            bodies
                .values()
                .filter(|body| body.chases && body.is_alive() && body.contact_damage > 0.0)
                .filter(|body| !body.status.is_stunned())
                .filter_map(|body| {
                    let (target, goal) = self.chase_target(body)?;
                    (goal.distance(body.position) <= CONTACT_RANGE + 1e-3)
                        .then_some((target, body.contact_damage * dt))
                })
                .collect()
        };
        for (target, amount) in touches {
            summary.contact_damage += self.damage(target, amount, DamageCause::Contact);
        }
    }

    fn remove_dead(&self, summary: &mut WorldStep) {
        let now = self.clock();
        let mut bodies = self.bodies.borrow_mut();
        let dead: Vec<EntityId> = bodies
            .values()
            .filter(|body| !body.is_alive())
            .map(|body| body.id)
            .collect();
        let mut events = self.events.borrow_mut();
        for entity in dead {
            if let Some(body) = bodies.remove(&entity) {
                tracing::debug!(entity = %entity, name = %body.name, "entity died");
                events.push(CombatEvent::Killed {
                    at: now,
                    entity,
                    name: body.name,
                    faction: body.faction,
                });
                summary.killed.push(entity);
            }
        }
    }

    /// Subtracts health from a living body and records the hit; returns the
    /// amount applied.
    fn damage(&self, entity: EntityId, amount: f32, cause: DamageCause) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let faction = {
            let mut bodies = self.bodies.borrow_mut();
            let Some(body) = bodies.get_mut(&entity).filter(|body| body.is_alive()) else {
                return 0.0;
            };
            body.health -= amount;
            body.faction
        };
        self.events.borrow_mut().push(CombatEvent::Damaged {
            at: self.clock(),
            target: entity,
            faction,
            amount,
            cause,
        });
        amount
    }
}

impl SpatialOracle for World {
    fn entities_within(&self, point: Vec2, radius: f32, filter: FactionFilter) -> Vec<EntityId> {
        self.bodies
            .borrow()
            .values()
            .filter(|body| {
                body.is_alive()
                    && filter.matches(body.faction)
                    && body.position.distance(point) <= radius
            })
            .map(|body| body.id)
            .collect()
    }

    fn nearest(&self, point: Vec2, radius: f32, filter: FactionFilter) -> Option<EntityId> {
        self.bodies
            .borrow()
            .values()
            .filter(|body| body.is_alive() && filter.matches(body.faction))
            .map(|body| (body.id, body.position.distance_squared(point)))
            .filter(|(_, d2)| *d2 <= radius * radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    }

    fn position_of(&self, entity: EntityId) -> Option<Vec2> {
        self.bodies
            .borrow()
            .get(&entity)
            .filter(|body| body.is_alive())
            .map(|body| body.position)
    }
}

impl EffectSink for World {
    fn apply_damage(&self, entity: EntityId, amount: f32) {
        self.damage(entity, amount, DamageCause::Ability);
    }

    fn apply_passive(&self, entity: EntityId, passive: &PassiveDescriptor, source_damage: f32) {
        let applied = self.with_body_mut(entity, |body| {
            body.status.apply(passive, source_damage);
            body.status.kind()
        });
        if let Some(Some(kind)) = applied {
            self.events.borrow_mut().push(CombatEvent::StatusApplied {
                at: self.clock(),
                target: entity,
                kind,
            });
        }
    }
}

impl PrefabSpawner for World {
    fn spawn(&self, prefab: PrefabId, position: Vec2, rotation: f32) -> VisualHandle {
        self.visuals.borrow_mut().spawn(Visual {
            prefab,
            position,
            rotation,
            expires_at: None,
        })
    }

    fn destroy_after(&self, handle: VisualHandle, seconds: f32) {
        let at = self.clock() + seconds.max(0.0);
        self.visuals.borrow_mut().expire_at(handle, at);
    }

    fn move_to(&self, handle: VisualHandle, position: Vec2, rotation: f32) {
        self.visuals.borrow_mut().move_to(handle, position, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::PassiveKind;

    fn arena() -> (World, EntityId) {
        let world = World::new();
        world.insert(Body::new("player", Faction::Player, Vec2::ZERO, 50.0));
        let goblin = world.spawn_body(Body::chaser("goblin", Vec2::new(5.0, 0.0), 20.0, 2.0, 4.0));
        (world, goblin)
    }

    #[test]
    fn spawn_allocates_ids_after_the_player() {
        let (world, goblin) = arena();
        assert_eq!(goblin, EntityId(1));
        assert_eq!(world.spawn_body(Body::new("rock", Faction::Neutral, Vec2::ONE, 1.0)), EntityId(2));
    }

    #[test]
    fn chaser_walks_to_contact_range_then_hurts() {
        let (world, goblin) = arena();
        for _ in 0..30 {
            world.step(0.1);
        }
        let position = world.position_of(goblin).unwrap();
        assert!((position.length() - CONTACT_RANGE).abs() < 1e-3);
        assert!(world.health_of(EntityId::PLAYER).unwrap() < 50.0);
    }

    #[test]
    fn frozen_chaser_holds_still() {
        let (world, goblin) = arena();
        world.apply_passive(goblin, &PassiveDescriptor::new(PassiveKind::Freeze, 0.0, 1.0), 0.0);
        world.step(0.5);
        assert_eq!(world.position_of(goblin), Some(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn lethal_damage_hides_then_removes_the_body() {
        let (world, goblin) = arena();
        world.apply_damage(goblin, 25.0);
        assert_eq!(world.position_of(goblin), None);
        assert!(world.entities_within(Vec2::ZERO, 10.0, FactionFilter::Any).len() == 1);

        let step = world.step(0.1);
        assert_eq!(step.killed, vec![goblin]);
        assert!(world.body(goblin).is_none());

        let events = world.drain_events();
        assert!(events.iter().any(|e| matches!(e, CombatEvent::Killed { entity, .. } if *entity == goblin)));
    }

    #[test]
    fn visuals_expire_on_the_world_clock() {
        let world = World::new();
        let handle = world.spawn(PrefabId(3), Vec2::ZERO, 0.0);
        world.destroy_after(handle, 0.5);
        world.set_clock(0.4);
        world.step(0.0);
        assert!(world.visual(handle).is_some());
        world.set_clock(0.6);
        assert_eq!(world.step(0.0).visuals_expired, 1);
        assert_eq!(world.live_visuals(), 0);
    }
}
