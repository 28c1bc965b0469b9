//! Reset-and-replay recomputation of per-ability multipliers.

use crate::ability::AbilityInstance;
use crate::config::CombatConfig;
use crate::stats::{BucketScope, BucketStat, StatBucket, StatLedger, applies_to};

/// Owns the stat ledger and derives every instance's multipliers from it.
#[derive(Clone, Debug)]
pub struct StatAggregator {
    ledger: StatLedger,
    min_cooldown_multiplier: f32,
}

impl StatAggregator {
    /// Empty ledger; the cooldown floor is taken from `config`.
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            ledger: StatLedger::new(),
            min_cooldown_multiplier: config.min_cooldown_multiplier,
        }
    }

    /// Rebuilds an aggregator over a previously recorded ledger.
    pub fn with_ledger(config: &CombatConfig, ledger: StatLedger) -> Self {
        Self {
            ledger,
            min_cooldown_multiplier: config.min_cooldown_multiplier,
        }
    }

    /// Every bonus granted so far.
    pub fn ledger(&self) -> &StatLedger {
        &self.ledger
    }

    /// Records a bonus and immediately recomputes every instance.
    pub fn apply_bonus(&mut self, bucket: StatBucket, percent: f32, instances: &mut [AbilityInstance]) {
        self.ledger.push(bucket, percent);
        tracing::debug!(bucket = bucket.key(), percent, "stat bonus applied");
        self.recompute_all(instances);
    }

    /// Resets every instance to identity and replays the whole ledger.
    ///
    /// Idempotent: the result depends only on the ledger and the instances'
    /// delivery tags, never on previous derived values.
    pub fn recompute_all(&self, instances: &mut [AbilityInstance]) {
        for instance in instances.iter_mut() {
            self.recompute(instance);
        }
        tracing::debug!(
            entries = self.ledger.len(),
            instances = instances.len(),
            "multipliers recomputed"
        );
    }

    /// Reset-and-replay for a single instance.
    pub fn recompute(&self, instance: &mut AbilityInstance) {
        instance.reset_derived();
        let delivery = instance.definition().delivery;

        for entry in self.ledger.entries() {
            if !applies_to(delivery, entry.bucket) {
                continue;
            }
            let Some(stat) = entry.bucket.stat() else {
                continue;
            };
            let factor = 1.0 + entry.percent / 100.0;
            let multipliers = &mut instance.multipliers;
            match stat {
                BucketStat::Damage => multipliers.damage *= factor,
                BucketStat::Range => multipliers.range *= factor,
                BucketStat::Speed => multipliers.speed *= factor,
                BucketStat::Duration => multipliers.duration *= factor,
                BucketStat::Cooldown => {
                    multipliers.cooldown *= (1.0 - entry.percent / 100.0).max(0.0);
                }
                BucketStat::Count => {
                    if entry.percent > 0.0 {
                        instance.extras.count += entry.percent as u32;
                    }
                }
                BucketStat::MultiCast => instance.extras.multicast_chance += entry.percent,
                BucketStat::Health | BucketStat::Power | BucketStat::Heal => {}
            }
        }

        let multipliers = &mut instance.multipliers;
        multipliers.cooldown = multipliers.cooldown.max(self.min_cooldown_multiplier);
    }

    /// `1 + total/100` for a player-scoped bucket; 1.0 for any other bucket.
    pub fn player_multiplier(&self, bucket: StatBucket) -> f32 {
        match bucket.scope() {
            Some(BucketScope::Player) => 1.0 + self.ledger.total(bucket) / 100.0,
            _ => 1.0,
        }
    }
}

impl Default for StatAggregator {
    fn default() -> Self {
        Self::new(&CombatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ability::definition::fixtures;

    fn instances() -> Vec<AbilityInstance> {
        vec![
            AbilityInstance::new(Arc::new(fixtures::arrow())),
            AbilityInstance::new(Arc::new(fixtures::explosion())),
            AbilityInstance::new(Arc::new(fixtures::poison_cloud())),
        ]
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut aggregator = StatAggregator::default();
        let mut owned = instances();
        aggregator.apply_bonus(StatBucket::AllAbilitiesDamage, 25.0, &mut owned);
        aggregator.apply_bonus(StatBucket::AreaCooldown, 20.0, &mut owned);

        let first: Vec<_> = owned.iter().map(|i| (i.multipliers, i.extras)).collect();
        aggregator.recompute_all(&mut owned);
        aggregator.recompute_all(&mut owned);
        let second: Vec<_> = owned.iter().map(|i| (i.multipliers, i.extras)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn delivery_scoped_buckets_compose_multiplicatively() {
        let mut aggregator = StatAggregator::default();
        let mut owned = instances();
        aggregator.apply_bonus(StatBucket::AllAbilitiesDamage, 25.0, &mut owned);
        aggregator.apply_bonus(StatBucket::ProjectileDamage, 25.0, &mut owned);

        assert!((owned[0].multipliers.damage - 1.5625).abs() < 1e-6);
        assert!((owned[1].multipliers.damage - 1.25).abs() < 1e-6);
    }

    #[test]
    fn area_dot_ability_receives_both_groups() {
        let mut aggregator = StatAggregator::default();
        let mut owned = instances();
        aggregator.apply_bonus(StatBucket::AreaDamage, 25.0, &mut owned);
        aggregator.apply_bonus(StatBucket::DotDamage, 25.0, &mut owned);
        aggregator.apply_bonus(StatBucket::AllAbilitiesDamage, 25.0, &mut owned);

        assert!((owned[2].multipliers.damage - 1.953125).abs() < 1e-5);
        assert!((owned[1].multipliers.damage - 1.5625).abs() < 1e-6);
        assert_eq!(owned[0].multipliers.damage, 1.25);
    }

    #[test]
    fn cooldown_is_clamped_at_floor() {
        let mut aggregator = StatAggregator::default();
        let mut owned = instances();
        aggregator.apply_bonus(StatBucket::AllAbilitiesCooldown, 60.0, &mut owned);
        aggregator.apply_bonus(StatBucket::AllAbilitiesCooldown, 60.0, &mut owned);
        let floor = CombatConfig::DEFAULT_MIN_COOLDOWN_MULTIPLIER;
        assert!((owned[0].multipliers.cooldown - 0.16).abs() < 1e-5);

        aggregator.apply_bonus(StatBucket::ProjectileCooldown, 150.0, &mut owned);
        assert_eq!(owned[0].multipliers.cooldown, floor);
        assert!(owned[0].current_cooldown() > 0.0);
    }

    #[test]
    fn count_and_multicast_buckets_feed_extras() {
        let mut aggregator = StatAggregator::default();
        let mut owned = instances();
        aggregator.apply_bonus(StatBucket::ProjectileCount, 2.0, &mut owned);
        aggregator.apply_bonus(StatBucket::ProjectileCount, 1.7, &mut owned);
        aggregator.apply_bonus(StatBucket::AreaMultiCast, 30.0, &mut owned);

        assert_eq!(owned[0].extras.count, 3);
        assert_eq!(owned[0].extras.multicast_chance, 0.0);
        assert_eq!(owned[1].extras.multicast_chance, 30.0);
        assert_eq!(owned[0].multipliers.damage, 1.0);
    }

    #[test]
    fn player_buckets_never_touch_abilities() {
        let mut aggregator = StatAggregator::default();
        let mut owned = instances();
        aggregator.apply_bonus(StatBucket::PlayerPower, 50.0, &mut owned);
        aggregator.apply_bonus(StatBucket::PlayerPower, 10.0, &mut owned);

        assert!(owned.iter().all(|i| i.multipliers == crate::ability::Multipliers::IDENTITY));
        assert!((aggregator.player_multiplier(StatBucket::PlayerPower) - 1.6).abs() < 1e-6);
        assert_eq!(aggregator.player_multiplier(StatBucket::AreaDamage), 1.0);
    }
}
