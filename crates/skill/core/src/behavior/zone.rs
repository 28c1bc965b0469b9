//! Ticking damage zones: timed DOT fields and owner-following auras.

use glam::Vec2;

use crate::behavior::area::{anchor_offset, resolve_anchor};
use crate::behavior::{AuraParams, BehaviorScope, CastOutcome, DotParams, ExecutionContext};
use crate::env::{EffectSink, PrefabSpawner, SpatialOracle};
use crate::state::{AbilityId, EntityId, FactionFilter, PassiveDescriptor, VisualHandle};

/// Shortest tick interval honoured, whatever the authored value.
const MIN_TICK_INTERVAL: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneKind {
    /// Fixed position, timed.
    Dot,
    /// Follows its caster; at most one per caster and ability.
    Aura,
}

/// A trigger volume that damages its occupants every tick.
#[derive(Clone, Debug)]
pub struct Zone {
    pub ability: AbilityId,
    pub caster: EntityId,
    pub kind: ZoneKind,
    pub center: Vec2,
    pub radius: f32,
    pub damage: f32,
    filter: FactionFilter,
    passive: PassiveDescriptor,
    tick_interval: f32,
    until_tick: f32,
    /// `None` for permanent zones.
    remaining: Option<f32>,
    visual: Option<VisualHandle>,
    expired: bool,
}

/// Spawns one DOT zone per unit; extra units are jittered around the anchor.
pub(crate) fn spawn_dot(
    params: &DotParams,
    ctx: &ExecutionContext,
    scope: &mut BehaviorScope<'_>,
) -> CastOutcome {
    let spatial = match scope.env.spatial() {
        Ok(spatial) => spatial,
        Err(err) => {
            tracing::warn!(ability = %ctx.ability, %err, "dot cast skipped");
            return CastOutcome::NONE;
        }
    };
    let Some(anchor) = resolve_anchor(params.anchor, ctx, spatial) else {
        return CastOutcome::NONE;
    };

    let units = ctx.spawn_count.max(1);
    let duration = params.duration * ctx.duration_multiplier;
    for index in 0..units {
        let center = anchor + anchor_offset(ctx, index, scope);
        let visual = spawn_visual(ctx, center, duration, scope);
        scope.effects.push_zone(Zone {
            ability: ctx.ability,
            caster: ctx.caster,
            kind: ZoneKind::Dot,
            center,
            radius: ctx.range,
            damage: ctx.damage,
            filter: ctx.hostile_filter(),
            passive: ctx.passive,
            tick_interval: params.tick_interval,
            until_tick: params.tick_interval,
            remaining: Some(duration),
            visual,
            expired: false,
        });
    }
    tracing::trace!(ability = %ctx.ability, zones = units, duration, "dot zones spawned");
    CastOutcome::units(units)
}

/// Spawns the caster's aura, or refreshes the live one.
///
/// A recast while the aura exists updates its numbers and produces no units;
/// a replica never touches an existing aura.
pub(crate) fn spawn_aura(
    params: &AuraParams,
    ctx: &ExecutionContext,
    scope: &mut BehaviorScope<'_>,
) -> CastOutcome {
    let duration = (!params.permanent).then(|| params.duration * ctx.duration_multiplier);
    if let Some(existing) = scope.effects.aura_mut(ctx.caster, ctx.ability) {
        if !ctx.is_replication {
            existing.radius = ctx.range;
            existing.damage = ctx.damage;
            existing.passive = ctx.passive;
            existing.tick_interval = params.tick_interval;
            if duration.is_some() {
                existing.remaining = duration;
            }
        }
        return CastOutcome::NONE;
    }

    let spatial = match scope.env.spatial() {
        Ok(spatial) => spatial,
        Err(err) => {
            tracing::warn!(ability = %ctx.ability, %err, "aura cast skipped");
            return CastOutcome::NONE;
        }
    };
    let Some(center) = spatial.position_of(ctx.caster) else {
        return CastOutcome::NONE;
    };

    let visual = spawn_visual(ctx, center, duration.unwrap_or(0.0), scope);
    scope.effects.push_zone(Zone {
        ability: ctx.ability,
        caster: ctx.caster,
        kind: ZoneKind::Aura,
        center,
        radius: ctx.range,
        damage: ctx.damage,
        filter: ctx.hostile_filter(),
        passive: ctx.passive,
        tick_interval: params.tick_interval,
        until_tick: params.tick_interval,
        remaining: duration,
        visual,
        expired: false,
    });
    tracing::debug!(ability = %ctx.ability, caster = %ctx.caster, "aura spawned");
    CastOutcome::units(1)
}

fn spawn_visual(
    ctx: &ExecutionContext,
    center: Vec2,
    lifetime: f32,
    scope: &BehaviorScope<'_>,
) -> Option<VisualHandle> {
    if ctx.prefab.is_none() {
        return None;
    }
    let spawner = scope.env.spawner().ok()?;
    let visual = spawner.spawn(ctx.prefab, center, 0.0);
    if lifetime > 0.0 {
        spawner.destroy_after(visual, lifetime);
    }
    Some(visual)
}

impl Zone {
    /// True once the lifetime has run out.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Auras have no lifetime and live until removed.
    pub fn is_permanent(&self) -> bool {
        self.remaining.is_none()
    }

    /// Seconds left, `None` for permanent zones.
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Follows the caster (auras), fires due ticks and counts down the
    /// lifetime. Returns hits landed.
    pub(crate) fn advance(
        &mut self,
        dt: f32,
        spatial: &dyn SpatialOracle,
        sink: Option<&dyn EffectSink>,
        spawner: Option<&dyn PrefabSpawner>,
    ) -> u32 {
        if self.expired {
            return 0;
        }
        if self.kind == ZoneKind::Aura {
            let Some(position) = spatial.position_of(self.caster) else {
                self.expired = true;
                return 0;
            };
            self.center = position;
            if let (Some(spawner), Some(visual)) = (spawner, self.visual) {
                spawner.move_to(visual, position, 0.0);
            }
        }

        let mut landed = 0;
        let interval = self.tick_interval.max(MIN_TICK_INTERVAL);
        self.until_tick -= dt;
        while self.until_tick <= 0.0 {
            landed += self.tick(spatial, sink);
            self.until_tick += interval;
        }

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.expired = true;
            }
        }
        landed
    }

    fn tick(&self, spatial: &dyn SpatialOracle, sink: Option<&dyn EffectSink>) -> u32 {
        let occupants = spatial.entities_within(self.center, self.radius, self.filter);
        if let Some(sink) = sink {
            for &entity in &occupants {
                sink.apply_damage(entity, self.damage);
                if !self.passive.is_none() {
                    sink.apply_passive(entity, &self.passive, self.damage);
                }
            }
        }
        occupants.len() as u32
    }

    pub(crate) fn retire(&self, spawner: Option<&dyn PrefabSpawner>) {
        if let (Some(spawner), Some(visual)) = (spawner, self.visual) {
            spawner.destroy_after(visual, 0.0);
        }
    }
}
