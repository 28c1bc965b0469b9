//! Spatial queries and world-visible side effects.
//!
//! These traits are the only way the core touches the host world. All methods
//! take `&self`; hosts that mutate on `apply_damage` use interior mutability,
//! which is sound because the simulation is single-threaded.

use glam::Vec2;

use crate::state::{EntityId, FactionFilter, PassiveDescriptor, PrefabId, VisualHandle};

/// Read-only spatial index over live entities.
pub trait SpatialOracle {
    /// All entities within `radius` of `point` that pass `filter`.
    fn entities_within(&self, point: Vec2, radius: f32, filter: FactionFilter) -> Vec<EntityId>;

    /// Closest entity within `radius` of `point` that passes `filter`.
    fn nearest(&self, point: Vec2, radius: f32, filter: FactionFilter) -> Option<EntityId>;

    /// Current position, or `None` once the entity has been destroyed.
    fn position_of(&self, entity: EntityId) -> Option<Vec2>;
}

/// Receives damage and on-hit passives.
pub trait EffectSink {
    fn apply_damage(&self, entity: EntityId, amount: f32);

    fn apply_passive(&self, entity: EntityId, passive: &PassiveDescriptor, source_damage: f32);
}

/// Spawns and retires visuals. Purely cosmetic: the core never reads back.
pub trait PrefabSpawner {
    /// Spawn a prefab at `position` facing `rotation` radians.
    fn spawn(&self, prefab: PrefabId, position: Vec2, rotation: f32) -> VisualHandle;

    /// Schedule the visual for removal after `seconds`.
    fn destroy_after(&self, handle: VisualHandle, seconds: f32);

    /// Move a live visual. Hosts that animate on their own may ignore this.
    fn move_to(&self, _handle: VisualHandle, _position: Vec2, _rotation: f32) {}
}
