//! Multi-cast chance ledger and the replication pass.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ability::{AbilityDefinition, DeliveryTags};
use crate::behavior::{BehaviorScope, Continuation, ExecutionContext};
use crate::env::{MULTICAST_TRIAL_CONTEXT, REPLICA_JITTER_CONTEXT, compute_seed};
use crate::modifiers::pattern;
use crate::state::AbilityId;

/// Cumulative replication chance for one ability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiCastLedgerEntry {
    pub ability: AbilityId,
    /// Percentage points, uncapped.
    pub chance: f32,
}

/// Per-owner multi-cast ledger.
#[derive(Clone, Debug, Default)]
pub struct MultiCastLedger {
    chances: BTreeMap<AbilityId, f32>,
}

impl MultiCastLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `percent` points to the ability's chance. Totals above 100 are
    /// kept: every unit then replicates.
    pub fn add_chance(&mut self, ability: AbilityId, percent: f32) {
        let chance = self.chances.entry(ability).or_insert(0.0);
        *chance += percent;
        tracing::debug!(%ability, percent, total = *chance, "multi-cast chance added");
    }

    /// Accumulated chance, 0 for abilities never granted one.
    pub fn chance(&self, ability: AbilityId) -> f32 {
        self.chances.get(&ability).copied().unwrap_or(0.0)
    }

    /// Ledger rows in ability order.
    pub fn entries(&self) -> impl Iterator<Item = MultiCastLedgerEntry> + '_ {
        self.chances
            .iter()
            .map(|(&ability, &chance)| MultiCastLedgerEntry { ability, chance })
    }
}

/// Rolls replication for a finished cast and schedules the replicas.
pub struct Replicator;

impl Replicator {
    /// Runs one Bernoulli trial per produced unit against
    /// `context.multicast_chance` and schedules a delayed replica for every
    /// success. Returns the number of replicas scheduled.
    ///
    /// Does nothing for replicas, non-positive chances or casts that produced
    /// no units. Replicas carry `is_replication`, so a replica never replicates.
    pub fn process_multi_cast(
        definition: &Arc<AbilityDefinition>,
        context: &ExecutionContext,
        produced_units: u32,
        scope: &mut BehaviorScope<'_>,
    ) -> u32 {
        if context.is_replication || context.multicast_chance <= 0.0 || produced_units == 0 {
            return 0;
        }
        let rng = match scope.env.rng() {
            Ok(rng) => rng,
            Err(err) => {
                tracing::warn!(ability = %context.ability, %err, "multi-cast skipped");
                return 0;
            }
        };

        let seed = scope.config.rng_seed;
        let successes: Vec<u32> = (0..produced_units)
            .filter(|&unit| {
                let roll_seed = compute_seed(
                    seed,
                    context.nonce,
                    context.caster.0,
                    MULTICAST_TRIAL_CONTEXT + u64::from(unit),
                );
                rng.roll_percent(roll_seed) < context.multicast_chance
            })
            .collect();
        if successes.is_empty() {
            return 0;
        }

        let total = successes.len() as u32;
        let delay = definition
            .multicast_delay
            .unwrap_or(scope.config.multicast_delay);
        let jitter_area = definition.has_delivery(DeliveryTags::AREA);

        for (index, _) in successes.iter().enumerate() {
            let index = index as u32;
            let offset = if jitter_area {
                let jitter_seed = compute_seed(
                    seed,
                    context.nonce,
                    context.caster.0,
                    REPLICA_JITTER_CONTEXT + u64::from(index),
                );
                pattern::jitter(rng, jitter_seed, scope.config.replica_jitter_radius)
            } else {
                glam::Vec2::ZERO
            };
            let replica = context.replicate(
                index,
                total,
                scope.config.replica_damage_factor,
                offset,
            );
            scope.timers.schedule(
                scope.now + delay,
                Continuation::Replicate {
                    definition: Arc::clone(definition),
                    context: replica,
                },
            );
        }

        tracing::debug!(
            ability = %context.ability,
            caster = %context.caster,
            produced_units,
            replicas = total,
            "multi-cast scheduled"
        );
        total
    }
}
