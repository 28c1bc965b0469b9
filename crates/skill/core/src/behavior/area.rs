//! Instant area strikes with staggered extra anchors.

use std::sync::Arc;

use glam::Vec2;

use crate::ability::AbilityDefinition;
use crate::behavior::{
    Anchor, AreaParams, BehaviorScope, CastOutcome, Continuation, ExecutionContext,
};
use crate::env::{ANCHOR_JITTER_CONTEXT, CombatEnv, SpatialOracle, compute_seed};
use crate::modifiers::pattern;

/// Resolves the centre of an area effect.
///
/// A fixed context anchor wins; otherwise the target or caster position,
/// shifted by the context offset. `None` when that entity is gone.
pub(crate) fn resolve_anchor(
    anchor: Anchor,
    ctx: &ExecutionContext,
    spatial: &dyn SpatialOracle,
) -> Option<Vec2> {
    if let Some(fixed) = ctx.anchor {
        return Some(fixed);
    }
    let base = match anchor {
        Anchor::Target => spatial.position_of(ctx.target?)?,
        Anchor::Caster => spatial.position_of(ctx.caster)?,
    };
    Some(base + ctx.position_offset)
}

/// Jittered offset for extra anchor `index` (index 0 is never jittered).
pub(crate) fn anchor_offset(ctx: &ExecutionContext, index: u32, scope: &BehaviorScope<'_>) -> Vec2 {
    if index == 0 {
        return Vec2::ZERO;
    }
    let Ok(rng) = scope.env.rng() else {
        return Vec2::ZERO;
    };
    let seed = compute_seed(
        scope.config.rng_seed,
        ctx.nonce,
        ctx.caster.0,
        ANCHOR_JITTER_CONTEXT + u64::from(index),
    );
    pattern::jitter(rng, seed, scope.config.anchor_jitter_radius)
}

/// Strikes the first anchor now and schedules the rest `anchor_stagger`
/// seconds apart.
pub(crate) fn detonate(
    params: &AreaParams,
    definition: &Arc<AbilityDefinition>,
    ctx: &ExecutionContext,
    scope: &mut BehaviorScope<'_>,
) -> CastOutcome {
    let spatial = match scope.env.spatial() {
        Ok(spatial) => spatial,
        Err(err) => {
            tracing::warn!(ability = %ctx.ability, %err, "area cast skipped");
            return CastOutcome::NONE;
        }
    };
    let Some(anchor) = resolve_anchor(params.anchor, ctx, spatial) else {
        return CastOutcome::NONE;
    };

    let units = ctx.spawn_count.max(1);
    let hits = strike(params, ctx, anchor, scope.env);
    for index in 1..units {
        let offset = anchor_offset(ctx, index, scope);
        let due = scope.now + index as f32 * scope.config.anchor_stagger;
        scope.timers.schedule(
            due,
            Continuation::AreaStrike {
                definition: Arc::clone(definition),
                context: ctx.clone(),
                anchor: anchor + offset,
            },
        );
    }

    CastOutcome {
        produced: units,
        hits,
    }
}

/// Damages every valid target within `ctx.range` of `anchor`.
///
/// Anchors are independent: a target inside two anchors is hit twice.
pub(crate) fn strike(
    params: &AreaParams,
    ctx: &ExecutionContext,
    anchor: Vec2,
    env: CombatEnv<'_>,
) -> u32 {
    let Ok(spatial) = env.spatial() else {
        return 0;
    };
    if let Ok(spawner) = env.spawner()
        && !ctx.prefab.is_none()
    {
        let visual = spawner.spawn(ctx.prefab, anchor, 0.0);
        spawner.destroy_after(visual, params.visual_lifetime);
    }

    let targets = spatial.entities_within(anchor, ctx.range, ctx.hostile_filter());
    if let Ok(sink) = env.effects() {
        for &target in &targets {
            sink.apply_damage(target, ctx.damage);
            if !ctx.passive.is_none() {
                sink.apply_passive(target, &ctx.passive, ctx.damage);
            }
        }
    }
    tracing::trace!(
        ability = %ctx.ability,
        x = anchor.x,
        y = anchor.y,
        hits = targets.len(),
        "area strike"
    );
    targets.len() as u32
}
