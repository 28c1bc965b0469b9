//! Effect strategies and the state they leave behind.
//!
//! A [`Behavior`] is picked per definition at load time and dispatched by
//! variant. Executing one either resolves immediately (area strikes) or
//! leaves live effects in the owner's [`ActiveEffects`], advanced every
//! update. Delayed work (replicas, staggered anchors) goes into the
//! [`TimerQueue`] as a [`Continuation`].
mod area;
mod context;
mod effects;
mod params;
mod projectile;
mod timers;
mod zone;

#[cfg(test)]
pub(crate) mod testkit;

pub use context::ExecutionContext;
pub use effects::ActiveEffects;
pub use params::{Anchor, AreaParams, AuraParams, DotParams, ProjectileParams};
pub use projectile::LiveProjectile;
pub use timers::{Continuation, TimerQueue};
pub use zone::{Zone, ZoneKind};

use std::sync::Arc;

use crate::ability::{AbilityDefinition, TraitTags};
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::modifiers::Replicator;

/// Effect strategy of an ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Spawns projectiles along the ability's direction pattern.
    Projectile(ProjectileParams),
    /// Damages everything around one or more anchors, once.
    AreaInstant(AreaParams),
    /// Leaves a timed zone that damages its occupants every tick.
    AreaDot(DotParams),
    /// Keeps a single zone around the caster.
    AreaAura(AuraParams),
}

/// Mutable world a behavior writes into.
pub struct BehaviorScope<'a> {
    pub env: CombatEnv<'a>,
    pub config: &'a CombatConfig,
    pub effects: &'a mut ActiveEffects,
    pub timers: &'a mut TimerQueue,
    /// Simulation time of the cast.
    pub now: f32,
}

/// Result of one behavior execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastOutcome {
    /// Effect units produced (projectiles, anchors, zones). Multi-cast rolls
    /// once per unit.
    pub produced: u32,
    /// Hits landed synchronously during execution.
    pub hits: u32,
}

impl CastOutcome {
    pub const NONE: Self = Self {
        produced: 0,
        hits: 0,
    };

    pub const fn units(produced: u32) -> Self {
        Self { produced, hits: 0 }
    }
}

/// What a fired continuation ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resumed {
    Replica(CastOutcome),
    Strike { hits: u32 },
    /// Caster gone or the replica could no longer execute.
    Dropped,
}

impl Behavior {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Projectile(_) => "projectile",
            Self::AreaInstant(_) => "area_instant",
            Self::AreaDot(_) => "area_dot",
            Self::AreaAura(_) => "area_aura",
        }
    }

    /// Checks authored parameters.
    ///
    /// # Errors
    ///
    /// Returns a static reason when a parameter would stall or break the effect.
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            Self::Projectile(p) => {
                if p.speed <= 0.0 {
                    return Err("projectile speed must be positive");
                }
                if p.lifetime <= 0.0 {
                    return Err("projectile lifetime must be positive");
                }
                if p.turn_rate_degrees < 0.0 {
                    return Err("turn rate must not be negative");
                }
                if !(0.0..=1.0).contains(&p.pierce_decay) {
                    return Err("pierce decay must be within 0..=1");
                }
            }
            Self::AreaInstant(p) => {
                if p.visual_lifetime < 0.0 {
                    return Err("visual lifetime must not be negative");
                }
            }
            Self::AreaDot(p) => {
                if p.tick_interval <= 0.0 {
                    return Err("tick interval must be positive");
                }
                if p.duration <= 0.0 {
                    return Err("dot duration must be positive");
                }
            }
            Self::AreaAura(p) => {
                if p.tick_interval <= 0.0 {
                    return Err("tick interval must be positive");
                }
                if !p.permanent && p.duration <= 0.0 {
                    return Err("timed aura duration must be positive");
                }
            }
        }
        Ok(())
    }

    /// Whether a cast with these traits needs a target.
    pub fn requires_target(&self, traits: TraitTags) -> bool {
        match self {
            Self::Projectile(_) => {
                traits.intersects(TraitTags::HOMING | TraitTags::SINGLE_TARGET)
            }
            Self::AreaInstant(p) => p.anchor == Anchor::Target,
            Self::AreaDot(p) => p.anchor == Anchor::Target,
            Self::AreaAura(_) => false,
        }
    }

    /// True unless the strategy needs a target and the context has none.
    pub fn can_execute(&self, ctx: &ExecutionContext) -> bool {
        !self.requires_target(ctx.traits) || ctx.target.is_some()
    }

    /// Performs the cast's world-visible effects.
    pub fn execute(
        &self,
        definition: &Arc<AbilityDefinition>,
        ctx: &ExecutionContext,
        scope: &mut BehaviorScope<'_>,
    ) -> CastOutcome {
        match self {
            Self::Projectile(params) => projectile::launch(params, ctx, scope),
            Self::AreaInstant(params) => area::detonate(params, definition, ctx, scope),
            Self::AreaDot(params) => zone::spawn_dot(params, ctx, scope),
            Self::AreaAura(params) => zone::spawn_aura(params, ctx, scope),
        }
    }
}

/// Fires one due continuation.
///
/// Continuations whose caster has no position any more are abandoned
/// silently.
pub fn resume(continuation: Continuation, scope: &mut BehaviorScope<'_>) -> Resumed {
    let caster = continuation.caster();
    let caster_alive = scope
        .env
        .spatial()
        .ok()
        .and_then(|spatial| spatial.position_of(caster))
        .is_some();
    if !caster_alive {
        tracing::debug!(%caster, kind = continuation.kind(), "continuation dropped");
        return Resumed::Dropped;
    }

    match continuation {
        Continuation::Replicate {
            definition,
            context,
        } => {
            let behavior = definition.behavior;
            if !behavior.can_execute(&context) {
                return Resumed::Dropped;
            }
            let outcome = behavior.execute(&definition, &context, scope);
            // The replica carries the recursion guard, so this is a no-op.
            Replicator::process_multi_cast(&definition, &context, outcome.produced, scope);
            Resumed::Replica(outcome)
        }
        Continuation::AreaStrike {
            definition,
            context,
            anchor,
        } => match &definition.behavior {
            Behavior::AreaInstant(params) => Resumed::Strike {
                hits: area::strike(params, &context, anchor, scope.env),
            },
            _ => Resumed::Dropped,
        },
    }
}

#[cfg(test)]
mod tests;
