use std::sync::Arc;

use glam::Vec2;

use super::testkit::{FakeWorld, FixedOwner, env};
use super::*;
use crate::ability::definition::fixtures;
use crate::modifiers::pattern::heading;
use crate::state::{EntityId, PassiveDescriptor, PassiveKind};

#[derive(Default)]
struct Harness {
    config: CombatConfig,
    effects: ActiveEffects,
    timers: TimerQueue,
}

impl Harness {
    fn cast(
        &mut self,
        definition: &Arc<AbilityDefinition>,
        ctx: &ExecutionContext,
        env: CombatEnv<'_>,
        now: f32,
    ) -> CastOutcome {
        let mut scope = BehaviorScope {
            env,
            config: &self.config,
            effects: &mut self.effects,
            timers: &mut self.timers,
            now,
        };
        definition.behavior.execute(definition, ctx, &mut scope)
    }

    fn resume_due(&mut self, env: CombatEnv<'_>, now: f32) -> Vec<Resumed> {
        let due = self.timers.drain_due(now);
        let mut scope = BehaviorScope {
            env,
            config: &self.config,
            effects: &mut self.effects,
            timers: &mut self.timers,
            now,
        };
        due.into_iter()
            .map(|continuation| resume(continuation, &mut scope))
            .collect()
    }
}

fn context(definition: &AbilityDefinition, target: Option<EntityId>) -> ExecutionContext {
    let mut ctx = ExecutionContext::new(definition.id, EntityId::PLAYER);
    ctx.target = target;
    ctx.traits = definition.traits;
    ctx.damage = definition.base_damage;
    ctx.range = definition.base_range;
    ctx.prefab = definition.prefab;
    ctx.impact_prefab = definition.impact_prefab;
    ctx.pattern = definition.pattern;
    ctx
}

#[test]
fn target_requirements_follow_traits_and_anchor() {
    let arrow = fixtures::arrow();
    assert!(!arrow.behavior.can_execute(&context(&arrow, None)));
    assert!(arrow.behavior.can_execute(&context(&arrow, Some(EntityId(1)))));

    let mut untargeted = context(&arrow, None);
    untargeted.traits = TraitTags::empty();
    assert!(arrow.behavior.can_execute(&untargeted));

    let aura = fixtures::aura();
    assert!(aura.behavior.can_execute(&context(&aura, None)));
    let explosion = fixtures::explosion();
    assert!(!explosion.behavior.can_execute(&context(&explosion, None)));
}

#[test]
fn validation_rejects_stalling_parameters() {
    let bad = Behavior::AreaDot(DotParams {
        tick_interval: 0.0,
        ..DotParams::default()
    });
    assert!(bad.validate().is_err());
    let bad = Behavior::Projectile(ProjectileParams {
        speed: 0.0,
        ..ProjectileParams::default()
    });
    assert!(bad.validate().is_err());
    assert!(Behavior::AreaAura(AuraParams::default()).validate().is_ok());
}

#[test]
fn projectile_fan_spawns_one_per_unit() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let target = world.enemy(1, 5.0, 0.0);
    let arrow = Arc::new(fixtures::arrow());
    let mut ctx = context(&arrow, Some(target));
    ctx.spawn_count = 3;

    let mut harness = Harness::default();
    let outcome = harness.cast(&arrow, &ctx, env(&world, &owner), 0.0);

    assert_eq!(outcome.produced, 3);
    let headings: Vec<f32> = harness
        .effects
        .projectiles()
        .iter()
        .map(|p| heading(p.direction).to_degrees())
        .collect();
    assert!((headings[0] + 15.0).abs() < 1e-3);
    assert!(headings[1].abs() < 1e-3);
    assert!((headings[2] - 15.0).abs() < 1e-3);
    assert_eq!(world.spawned.borrow().len(), 3);
}

#[test]
fn projectile_hits_once_and_expires() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let target = world.enemy(1, 2.0, 0.0);
    let arrow = Arc::new(fixtures::arrow());
    let ctx = context(&arrow, Some(target));

    let mut harness = Harness::default();
    harness.cast(&arrow, &ctx, env(&world, &owner), 0.0);

    let mut hits = 0;
    for _ in 0..5 {
        hits += harness
            .effects
            .update(0.1, env(&world, &owner), &harness.config);
    }
    assert_eq!(hits, 1);
    assert_eq!(world.damage_on(target), 10.0);
    assert!(harness.effects.projectiles().is_empty());
}

#[test]
fn pierce_is_bounded_and_decays() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let first = world.enemy(1, 2.0, 0.0);
    let second = world.enemy(2, 4.0, 0.0);
    let third = world.enemy(3, 6.0, 0.0);

    let mut definition = fixtures::arrow();
    definition.traits |= TraitTags::PIERCE;
    definition.behavior = Behavior::Projectile(ProjectileParams {
        pierce_depth: 1,
        pierce_decay: 0.5,
        ..ProjectileParams::default()
    });
    let definition = Arc::new(definition);
    let ctx = context(&definition, Some(first));

    let mut harness = Harness::default();
    harness.cast(&definition, &ctx, env(&world, &owner), 0.0);
    for _ in 0..10 {
        harness
            .effects
            .update(0.1, env(&world, &owner), &harness.config);
    }

    assert_eq!(world.damage_on(first), 10.0);
    assert_eq!(world.damage_on(second), 5.0);
    assert_eq!(world.hits_on(third), 0);
}

#[test]
fn homing_turn_is_rate_limited() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let target = world.enemy(1, 10.0, 0.0);

    let mut definition = fixtures::arrow();
    definition.traits |= TraitTags::HOMING;
    definition.behavior = Behavior::Projectile(ProjectileParams {
        turn_rate_degrees: 90.0,
        ..ProjectileParams::default()
    });
    let definition = Arc::new(definition);
    let ctx = context(&definition, Some(target));

    let mut harness = Harness::default();
    harness.cast(&definition, &ctx, env(&world, &owner), 0.0);
    // Target jumps behind-left of the projectile.
    world.place(target, Vec2::new(-10.0, 10.0), crate::state::Faction::Enemy);
    harness
        .effects
        .update(0.1, env(&world, &owner), &harness.config);

    let turned = heading(harness.effects.projectiles()[0].direction).to_degrees();
    assert!(turned > 0.0);
    assert!(turned <= 9.0 + 1e-3, "turned {turned} degrees");
}

#[test]
fn area_anchors_double_hit_overlapping_targets() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let near = world.enemy(1, 5.0, 0.0);
    let far = world.enemy(2, 6.0, 0.0);
    let explosion = Arc::new(fixtures::explosion());
    let mut ctx = context(&explosion, Some(near));
    ctx.spawn_count = 3;

    let mut harness = Harness::default();
    let outcome = harness.cast(&explosion, &ctx, env(&world, &owner), 0.0);
    assert_eq!(outcome.produced, 3);
    assert_eq!(outcome.hits, 2);
    assert_eq!(harness.timers.len(), 2);

    // Anchors are staggered: the second fires at 0.1, the third at 0.2.
    assert_eq!(harness.resume_due(env(&world, &owner), 0.1).len(), 1);
    let resumed = harness.resume_due(env(&world, &owner), 0.2);
    assert_eq!(resumed, vec![Resumed::Strike { hits: 2 }]);

    assert_eq!(world.hits_on(near), 3);
    assert_eq!(world.hits_on(far), 3);
}

#[test]
fn continuations_of_destroyed_casters_are_dropped() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let target = world.enemy(1, 5.0, 0.0);
    let explosion = Arc::new(fixtures::explosion());
    let mut ctx = context(&explosion, Some(target));
    ctx.spawn_count = 2;

    let mut harness = Harness::default();
    harness.cast(&explosion, &ctx, env(&world, &owner), 0.0);
    world.remove(EntityId::PLAYER);

    let resumed = harness.resume_due(env(&world, &owner), 1.0);
    assert_eq!(resumed, vec![Resumed::Dropped]);
    assert_eq!(world.hits_on(target), 1);
}

#[test]
fn dot_zone_ticks_then_expires() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let target = world.enemy(1, 3.0, 0.0);
    let cloud = Arc::new(fixtures::poison_cloud());
    let mut ctx = context(&cloud, Some(target));
    ctx.passive = PassiveDescriptor::new(PassiveKind::Poison, 0.2, 2.0);

    let mut harness = Harness::default();
    assert_eq!(harness.cast(&cloud, &ctx, env(&world, &owner), 0.0).produced, 1);

    for _ in 0..6 {
        harness
            .effects
            .update(0.5, env(&world, &owner), &harness.config);
    }
    assert_eq!(world.hits_on(target), 6);
    assert_eq!(world.passives.borrow().len(), 6);
    assert!(harness.effects.is_empty());
}

#[test]
fn aura_is_a_singleton_that_follows_its_caster() {
    let world = FakeWorld::new();
    let owner = FixedOwner::default();
    let aura = Arc::new(fixtures::aura());
    let ctx = context(&aura, None);

    let mut harness = Harness::default();
    assert_eq!(harness.cast(&aura, &ctx, env(&world, &owner), 0.0).produced, 1);

    let mut stronger = ctx.clone();
    stronger.damage = 9.0;
    assert_eq!(harness.cast(&aura, &stronger, env(&world, &owner), 1.0).produced, 0);
    assert_eq!(harness.effects.zones().len(), 1);
    assert_eq!(harness.effects.zones()[0].damage, 9.0);
    assert!(harness.effects.zones()[0].is_permanent());

    world.place(EntityId::PLAYER, Vec2::new(4.0, 4.0), crate::state::Faction::Player);
    harness
        .effects
        .update(0.1, env(&world, &owner), &harness.config);
    assert_eq!(harness.effects.zones()[0].center, Vec2::new(4.0, 4.0));

    world.remove(EntityId::PLAYER);
    harness
        .effects
        .update(0.1, env(&world, &owner), &harness.config);
    assert!(harness.effects.zones().is_empty());
}

#[test]
fn missing_spatial_oracle_is_a_noop() {
    let arrow = Arc::new(fixtures::arrow());
    let ctx = context(&arrow, Some(EntityId(1)));
    let mut harness = Harness::default();
    let outcome = harness.cast(&arrow, &ctx, CombatEnv::empty(), 0.0);
    assert_eq!(outcome, CastOutcome::NONE);
    assert!(harness.effects.is_empty());
}
