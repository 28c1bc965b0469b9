//! Projectile launch and flight.

use core::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::ability::TraitTags;
use crate::behavior::{BehaviorScope, CastOutcome, ExecutionContext, ProjectileParams};
use crate::env::{EffectSink, PrefabSpawner, SpatialOracle};
use crate::modifiers::pattern::heading;
use crate::state::{
    AbilityId, EntityId, FactionFilter, PassiveDescriptor, PrefabId, VisualHandle,
};

const IMPACT_VISUAL_SECONDS: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Homing {
    target: EntityId,
    /// Radians per second.
    turn_rate: f32,
}

/// A projectile in flight.
#[derive(Clone, Debug)]
pub struct LiveProjectile {
    pub ability: AbilityId,
    pub caster: EntityId,
    pub position: Vec2,
    /// Unit heading.
    pub direction: Vec2,
    pub damage: f32,
    filter: FactionFilter,
    speed: f32,
    remaining: f32,
    passive: PassiveDescriptor,
    homing: Option<Homing>,
    pierce_left: u32,
    pierce_decay: f32,
    hits: Vec<EntityId>,
    visual: Option<VisualHandle>,
    impact_prefab: PrefabId,
    expired: bool,
}

/// Spawns one projectile per direction of the context's pattern.
pub(crate) fn launch(
    params: &ProjectileParams,
    ctx: &ExecutionContext,
    scope: &mut BehaviorScope<'_>,
) -> CastOutcome {
    let spatial = match scope.env.spatial() {
        Ok(spatial) => spatial,
        Err(err) => {
            tracing::warn!(ability = %ctx.ability, %err, "projectile cast skipped");
            return CastOutcome::NONE;
        }
    };
    let Some(caster_position) = spatial.position_of(ctx.caster) else {
        return CastOutcome::NONE;
    };

    let origin = caster_position + ctx.position_offset;
    let aim = ctx
        .target
        .and_then(|target| spatial.position_of(target))
        .map_or(Vec2::X, |target| target - origin);
    let directions = ctx.pattern.directions(ctx.spawn_count, aim);

    let homing = ctx
        .target
        .filter(|_| ctx.has_trait(TraitTags::HOMING))
        .map(|target| Homing {
            target,
            turn_rate: params.turn_rate_degrees.to_radians(),
        });
    let pierce_left = if ctx.has_trait(TraitTags::PIERCE) {
        params.pierce_depth
    } else {
        0
    };
    let spawner = scope.env.spawner().ok().filter(|_| !ctx.prefab.is_none());

    for direction in &directions {
        let visual = spawner.map(|spawner| spawner.spawn(ctx.prefab, origin, heading(*direction)));
        scope.effects.push_projectile(LiveProjectile {
            ability: ctx.ability,
            caster: ctx.caster,
            position: origin,
            direction: *direction,
            damage: ctx.damage,
            filter: ctx.hostile_filter(),
            speed: params.speed * ctx.speed_multiplier,
            remaining: params.lifetime * ctx.duration_multiplier,
            passive: ctx.passive,
            homing,
            pierce_left,
            pierce_decay: params.pierce_decay,
            hits: Vec::new(),
            visual,
            impact_prefab: ctx.impact_prefab,
            expired: false,
        });
    }

    tracing::trace!(
        ability = %ctx.ability,
        caster = %ctx.caster,
        count = directions.len(),
        replica = ctx.is_replication,
        "projectiles launched"
    );
    CastOutcome::units(directions.len() as u32)
}

impl LiveProjectile {
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Targets already hit, in hit order.
    pub fn hits(&self) -> &[EntityId] {
        &self.hits
    }

    pub fn pierce_left(&self) -> u32 {
        self.pierce_left
    }

    /// Steers, moves and resolves contacts for one step. Returns hits landed.
    pub(crate) fn advance(
        &mut self,
        dt: f32,
        spatial: &dyn SpatialOracle,
        sink: Option<&dyn EffectSink>,
        spawner: Option<&dyn PrefabSpawner>,
        hit_radius: f32,
    ) -> u32 {
        if self.expired {
            return 0;
        }
        self.steer(dt, spatial);
        let start = self.position;
        let end = start + self.direction * self.speed * dt;
        self.position = end;
        self.remaining -= dt;
        if let (Some(spawner), Some(visual)) = (spawner, self.visual) {
            spawner.move_to(visual, self.position, heading(self.direction));
        }

        // Swept contact along this step's segment, nearest to `start` first.
        let midpoint = (start + end) * 0.5;
        let reach = start.distance(end) * 0.5 + hit_radius;
        let mut candidates: Vec<(f32, EntityId)> = spatial
            .entities_within(midpoint, reach, self.filter)
            .into_iter()
            .filter(|entity| !self.hits.contains(entity))
            .filter_map(|entity| {
                let position = spatial.position_of(entity)?;
                let (along, distance) = segment_projection(start, end, position);
                (distance <= hit_radius).then_some((along, entity))
            })
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut landed = 0;
        for (_, entity) in candidates {
            if self.expired {
                break;
            }
            if let Some(sink) = sink {
                sink.apply_damage(entity, self.damage);
                if !self.passive.is_none() {
                    sink.apply_passive(entity, &self.passive, self.damage);
                }
            }
            if let Some(spawner) = spawner.filter(|_| !self.impact_prefab.is_none()) {
                let impact = spawner.spawn(self.impact_prefab, self.position, 0.0);
                spawner.destroy_after(impact, IMPACT_VISUAL_SECONDS);
            }
            self.hits.push(entity);
            landed += 1;

            if self.pierce_left == 0 {
                self.expired = true;
            } else {
                self.pierce_left -= 1;
                self.damage *= self.pierce_decay;
            }
        }

        if self.remaining <= 0.0 {
            self.expired = true;
        }
        landed
    }

    /// Turns toward the homing target by at most `turn_rate × dt`.
    fn steer(&mut self, dt: f32, spatial: &dyn SpatialOracle) {
        let Some(homing) = self.homing else {
            return;
        };
        let Some(target) = spatial.position_of(homing.target) else {
            return;
        };
        let to = target - self.position;
        if to.length_squared() < 1e-6 {
            return;
        }

        let current = heading(self.direction);
        let mut delta = heading(to) - current;
        // Wrap to [-PI, PI]
        if delta > PI {
            delta -= TAU;
        }
        if delta < -PI {
            delta += TAU;
        }
        let max_step = homing.turn_rate * dt;
        let next = current + delta.clamp(-max_step, max_step);
        let (s, c) = next.sin_cos();
        self.direction = Vec2::new(c, s);
    }

    pub(crate) fn retire(&self, spawner: Option<&dyn PrefabSpawner>) {
        if let (Some(spawner), Some(visual)) = (spawner, self.visual) {
            spawner.destroy_after(visual, 0.0);
        }
    }
}

/// Parameter along `start..end` (0..=1) of the closest point to `point`, and
/// the distance to it.
fn segment_projection(start: Vec2, end: Vec2, point: Vec2) -> (f32, f32) {
    let segment = end - start;
    let length_sq = segment.length_squared();
    if length_sq < 1e-12 {
        return (0.0, start.distance(point));
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    (t, (start + segment * t).distance(point))
}
