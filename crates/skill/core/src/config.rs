/// Combat tuning constants and runtime-tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Ability slots an owner may fill. Clamped to [`Self::MAX_ABILITY_SLOTS`].
    pub max_ability_slots: usize,
    /// Damage factor applied to every multi-cast replica.
    pub replica_damage_factor: f32,
    /// Delay in seconds before replicas fire, unless the definition overrides it.
    pub multicast_delay: f32,
    /// Spacing in seconds between staggered area anchors.
    pub anchor_stagger: f32,
    /// Maximum random offset applied to anchors after the first.
    pub anchor_jitter_radius: f32,
    /// Maximum random offset applied to replicated area casts.
    pub replica_jitter_radius: f32,
    /// Lower bound for the aggregated cooldown multiplier.
    pub min_cooldown_multiplier: f32,
    /// Lower bound in seconds for any resolved cooldown.
    pub min_cooldown_seconds: f32,
    /// Contact radius for projectile hits.
    pub projectile_hit_radius: f32,
    /// Upper bound on units one cast may produce, whatever the count bonuses.
    pub max_spawn_count: u32,
    /// Seed mixed into every random roll.
    pub rng_seed: u64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ABILITY_SLOTS: usize = 12;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ABILITY_SLOTS: usize = 6;
    pub const DEFAULT_REPLICA_DAMAGE_FACTOR: f32 = 0.8;
    pub const DEFAULT_MULTICAST_DELAY: f32 = 0.15;
    pub const DEFAULT_ANCHOR_STAGGER: f32 = 0.1;
    pub const DEFAULT_ANCHOR_JITTER_RADIUS: f32 = 1.5;
    pub const DEFAULT_REPLICA_JITTER_RADIUS: f32 = 1.0;
    pub const DEFAULT_MIN_COOLDOWN_MULTIPLIER: f32 = 0.1;
    pub const DEFAULT_MIN_COOLDOWN_SECONDS: f32 = 0.05;
    pub const DEFAULT_PROJECTILE_HIT_RADIUS: f32 = 0.5;
    pub const DEFAULT_MAX_SPAWN_COUNT: u32 = 32;

    pub fn new() -> Self {
        Self {
            max_ability_slots: Self::DEFAULT_ABILITY_SLOTS,
            replica_damage_factor: Self::DEFAULT_REPLICA_DAMAGE_FACTOR,
            multicast_delay: Self::DEFAULT_MULTICAST_DELAY,
            anchor_stagger: Self::DEFAULT_ANCHOR_STAGGER,
            anchor_jitter_radius: Self::DEFAULT_ANCHOR_JITTER_RADIUS,
            replica_jitter_radius: Self::DEFAULT_REPLICA_JITTER_RADIUS,
            min_cooldown_multiplier: Self::DEFAULT_MIN_COOLDOWN_MULTIPLIER,
            min_cooldown_seconds: Self::DEFAULT_MIN_COOLDOWN_SECONDS,
            projectile_hit_radius: Self::DEFAULT_PROJECTILE_HIT_RADIUS,
            max_spawn_count: Self::DEFAULT_MAX_SPAWN_COUNT,
            rng_seed: 0,
        }
    }

    /// Same config with a different game seed.
    pub fn with_seed(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::new()
        }
    }

    /// Effective slot capacity after applying the compile-time cap.
    pub fn slot_capacity(&self) -> usize {
        self.max_ability_slots.min(Self::MAX_ABILITY_SLOTS)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_capacity_is_capped() {
        let config = CombatConfig {
            max_ability_slots: 99,
            ..CombatConfig::default()
        };
        assert_eq!(config.slot_capacity(), CombatConfig::MAX_ABILITY_SLOTS);
    }
}
