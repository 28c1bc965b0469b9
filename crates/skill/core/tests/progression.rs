//! Bonus aggregation, count growth and spread layout seen through the public API.

mod common;

use std::sync::Arc;

use common::{ARROW, FIREBALL, POISON, catalog};
use skill_core::modifiers::pattern::heading;
use skill_core::{
    AbilityId, AbilityInstance, CombatConfig, CountModifier, EntityId, Faction, SkillOwner,
    StatAggregator, StatBucket, Vec2,
};

fn player() -> SkillOwner {
    SkillOwner::new(
        EntityId::PLAYER,
        Faction::Player,
        catalog(),
        CombatConfig::default(),
    )
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn recomputing_an_unchanged_ledger_is_stable() {
    let config = CombatConfig::default();
    let mut stats = StatAggregator::new(&config);
    let mut instances = vec![
        AbilityInstance::new(Arc::new(common::arrow())),
        AbilityInstance::new(Arc::new(common::poison_cloud())),
    ];
    stats.apply_bonus(StatBucket::AllAbilitiesDamage, 30.0, &mut instances);
    stats.apply_bonus(StatBucket::DotCooldown, 20.0, &mut instances);
    stats.apply_bonus(StatBucket::ProjectileRange, 50.0, &mut instances);

    let first: Vec<_> = instances.iter().map(|i| i.multipliers).collect();
    stats.recompute_all(&mut instances);
    stats.recompute_all(&mut instances);
    let second: Vec<_> = instances.iter().map(|i| i.multipliers).collect();
    assert_eq!(first, second);
}

#[test]
fn shared_and_delivery_buckets_compose_multiplicatively() {
    let mut owner = player();
    owner.equip(ARROW).unwrap();
    owner.equip(FIREBALL).unwrap();

    owner.apply_bonus(StatBucket::AllAbilitiesDamage, 25.0);
    owner.apply_bonus(StatBucket::ProjectileDamage, 25.0);

    assert!(close(owner.instances()[0].multipliers.damage, 1.5625));
    assert!(close(owner.instances()[1].multipliers.damage, 1.25));
}

#[test]
fn area_dot_ability_collects_both_delivery_buckets() {
    let mut owner = player();
    owner.equip(POISON).unwrap();
    owner.equip(ARROW).unwrap();

    owner.apply_bonus(StatBucket::AreaDamage, 25.0);
    owner.apply_bonus(StatBucket::DotDamage, 25.0);
    owner.apply_bonus(StatBucket::AllAbilitiesDamage, 25.0);

    assert!(close(owner.instances()[0].multipliers.damage, 1.953125));
    assert!(close(owner.instances()[1].multipliers.damage, 1.25));
}

#[test]
fn stacked_cooldown_reduction_never_drops_below_the_floor() {
    let mut owner = player();
    owner.equip(ARROW).unwrap();
    let floor = owner.config().min_cooldown_multiplier;

    let mut previous = owner.instances()[0].effective_cooldown(owner.config());
    for percent in [30.0, 50.0, 100.0, 100.0, 250.0] {
        owner.apply_bonus(StatBucket::AllAbilitiesCooldown, percent);
        let instance = &owner.instances()[0];
        let cooldown = instance.effective_cooldown(owner.config());
        assert!(cooldown <= previous);
        assert!(instance.multipliers.cooldown >= floor);
        assert!(cooldown >= owner.config().min_cooldown_seconds);
        previous = cooldown;
    }
    assert!(close(owner.instances()[0].multipliers.cooldown, floor));
}

#[test]
fn unseeded_ability_falls_back_then_grows() {
    let counts = CountModifier::from_catalog(&catalog());
    assert_eq!(counts.get_total_count(POISON), 1);

    let mut counts = counts;
    let unknown = AbilityId(99);
    assert_eq!(counts.get_total_count(unknown), counts.fallback_count(unknown));
    counts.add_count(unknown, 2);
    assert_eq!(counts.get_total_count(unknown), counts.fallback_count(unknown) + 2);
}

#[test]
fn arrow_with_two_extra_projectiles_fans_over_thirty_degrees() {
    let mut owner = player();
    owner.equip(ARROW).unwrap();
    owner.add_count(ARROW, 2);
    assert_eq!(owner.total_count(ARROW), 3);

    let mut angles: Vec<f32> = owner
        .counts()
        .get_directions(ARROW, Vec2::X)
        .into_iter()
        .map(|dir| heading(dir).to_degrees())
        .collect();
    angles.sort_by(f32::total_cmp);

    assert_eq!(angles.len(), 3);
    assert!((angles[0] + 15.0).abs() < 1e-3);
    assert!(angles[1].abs() < 1e-3);
    assert!((angles[2] - 15.0).abs() < 1e-3);
    assert!((angles[2] - angles[0] - 30.0).abs() < 1e-3);
}

#[test]
fn level_ups_and_bonuses_stack() {
    let mut owner = player();
    let slot = owner.equip(ARROW).unwrap();
    owner.apply_bonus(StatBucket::ProjectileDamage, 50.0);
    assert!(owner.level_up(slot).unwrap());

    let arrow = &owner.instances()[slot];
    assert_eq!(arrow.level(), 2);
    // (10 + 2) * 1.5 with no attack power
    assert!(close(arrow.current_damage(0.0), 18.0));
}
