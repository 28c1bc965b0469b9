//! Per-owner runtime wrapper around a definition.

use std::sync::Arc;

use crate::ability::AbilityDefinition;
use crate::config::CombatConfig;
use crate::state::AbilityId;

/// Multipliers derived by the stat aggregator.
///
/// Always rebuilt from scratch: [`Multipliers::IDENTITY`] followed by a full
/// replay of the ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Multipliers {
    pub damage: f32,
    pub cooldown: f32,
    pub range: f32,
    pub speed: f32,
    pub duration: f32,
}

impl Multipliers {
    pub const IDENTITY: Self = Self {
        damage: 1.0,
        cooldown: 1.0,
        range: 1.0,
        speed: 1.0,
        duration: 1.0,
    };
}

impl Default for Multipliers {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Additive contributions from delivery-scoped Count and MultiCast buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScopedExtras {
    pub count: u32,
    pub multicast_chance: f32,
}

/// An ability owned by exactly one actor.
#[derive(Clone, Debug)]
pub struct AbilityInstance {
    definition: Arc<AbilityDefinition>,
    level: u8,
    pub multipliers: Multipliers,
    pub extras: ScopedExtras,
    last_cast: Option<f32>,
}

impl AbilityInstance {
    pub fn new(definition: Arc<AbilityDefinition>) -> Self {
        Self {
            definition,
            level: 1,
            multipliers: Multipliers::IDENTITY,
            extras: ScopedExtras::default(),
            last_cast: None,
        }
    }

    /// Restores an instance at a given level, clamped to `1..=max_level`.
    pub fn with_level(definition: Arc<AbilityDefinition>, level: u8) -> Self {
        let level = level.clamp(1, definition.max_level);
        Self {
            level,
            ..Self::new(definition)
        }
    }

    pub fn id(&self) -> AbilityId {
        self.definition.id
    }

    pub fn definition(&self) -> &Arc<AbilityDefinition> {
        &self.definition
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.definition.max_level
    }

    /// Raises the level by one. Returns false once the ability is maxed.
    pub fn level_up(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.level += 1;
        true
    }

    /// `(attack_power + damage_at(level)) × damage multiplier`.
    pub fn current_damage(&self, attack_power: f32) -> f32 {
        (attack_power + self.definition.damage_at(self.level)) * self.multipliers.damage
    }

    /// `cooldown_at(level) × cooldown multiplier`, without the engine floor.
    pub fn current_cooldown(&self) -> f32 {
        self.definition.cooldown_at(self.level) * self.multipliers.cooldown
    }

    /// Cooldown actually used for readiness, floored at the configured minimum.
    pub fn effective_cooldown(&self, config: &CombatConfig) -> f32 {
        self.current_cooldown().max(config.min_cooldown_seconds)
    }

    /// `range_at(level) × range multiplier`.
    pub fn current_range(&self) -> f32 {
        self.definition.range_at(self.level) * self.multipliers.range
    }

    /// Time of the most recent cast, if any.
    pub fn last_cast(&self) -> Option<f32> {
        self.last_cast
    }

    /// Stamps the cast time used by cooldown checks.
    pub fn record_cast(&mut self, now: f32) {
        self.last_cast = Some(now);
    }

    /// Forgets the last cast so the ability is ready immediately.
    pub fn clear_last_cast(&mut self) {
        self.last_cast = None;
    }

    /// True when `now - last_cast >= cooldown`, or the ability was never cast.
    pub fn is_ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_cast.is_none_or(|last| now - last >= cooldown)
    }

    /// Seconds left before the ability is ready again.
    pub fn remaining_cooldown(&self, now: f32, cooldown: f32) -> f32 {
        self.last_cast
            .map(|last| (cooldown - (now - last)).max(0.0))
            .unwrap_or(0.0)
    }

    /// Resets derived values before a recompute pass.
    pub(crate) fn reset_derived(&mut self) {
        self.multipliers = Multipliers::IDENTITY;
        self.extras = ScopedExtras::default();
    }
}
