//! Per-owner auto-cast loop.
//!
//! Each slot is `Idle(last_cast, cooldown)` until `now - last_cast >= cooldown`;
//! a ready slot whose ability reaches the current target becomes a
//! [`CastRequest`], which the owner executes and records.

use crate::ability::AbilityInstance;
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::state::{AbilityId, EntityId, Faction, FactionFilter};

/// Cooldown bookkeeping for one ability slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CastSlot {
    pub ability: Option<AbilityId>,
    /// Cooldown baseline in seconds, refreshed from the instance every tick.
    pub cooldown: f32,
}

/// A ready ability the scheduler wants cast this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastRequest {
    pub slot: usize,
    pub ability: AbilityId,
    pub target: EntityId,
}

#[derive(Clone, Debug, Default)]
pub struct AutoCaster {
    slots: Vec<CastSlot>,
    target: Option<EntityId>,
}

impl AutoCaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[CastSlot] {
        &self.slots
    }

    /// Target picked by the most recent tick.
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Grows the slot list to cover `instances` and refreshes each slot's
    /// ability and baseline. Slots are never removed; last casts are kept.
    pub fn sync_slots(&mut self, instances: &[AbilityInstance], config: &CombatConfig) {
        if self.slots.len() < instances.len() {
            self.slots.resize(instances.len(), CastSlot::default());
        }
        for (slot, instance) in self.slots.iter_mut().zip(instances) {
            *slot = CastSlot {
                ability: Some(instance.id()),
                cooldown: instance.effective_cooldown(config),
            };
        }
        for slot in self.slots.iter_mut().skip(instances.len()) {
            slot.ability = None;
        }
    }

    /// Puts `instance` into slot `index`: the baseline becomes the new
    /// ability's cooldown and the last cast is cleared, so it is ready
    /// unless primed afterwards.
    pub fn replace_slot(&mut self, index: usize, instance: &mut AbilityInstance, config: &CombatConfig) {
        if self.slots.len() <= index {
            self.slots.resize(index + 1, CastSlot::default());
        }
        self.slots[index] = CastSlot {
            ability: Some(instance.id()),
            cooldown: instance.effective_cooldown(config),
        };
        instance.clear_last_cast();
    }

    /// Starts a full cooldown for the slot's ability as if it had just fired.
    pub fn prime(&mut self, instance: &mut AbilityInstance, now: f32) {
        instance.record_cast(now);
    }

    /// Retargets and returns the ready, in-range abilities.
    ///
    /// The search radius is the larger of the owner's attack range and the
    /// longest current ability range. Abilities that cannot reach the target
    /// are withheld this tick without dropping the target.
    pub fn tick(
        &mut self,
        now: f32,
        caster: EntityId,
        faction: Faction,
        instances: &[AbilityInstance],
        env: CombatEnv<'_>,
        config: &CombatConfig,
    ) -> Vec<CastRequest> {
        self.sync_slots(instances, config);
        let previous = self.target.take();

        let Ok(spatial) = env.spatial() else {
            return Vec::new();
        };
        let Some(origin) = spatial.position_of(caster) else {
            return Vec::new();
        };

        let radius = instances
            .iter()
            .map(AbilityInstance::current_range)
            .fold(env.attack_range_or_zero(caster), f32::max);
        let Some(target) = spatial.nearest(origin, radius, FactionFilter::HostileTo(faction)) else {
            return Vec::new();
        };
        let Some(target_position) = spatial.position_of(target) else {
            return Vec::new();
        };
        if previous != Some(target) {
            tracing::trace!(owner = %caster, %target, "retargeted");
        }
        self.target = Some(target);
        let distance = origin.distance(target_position);

        self.ready_in_range(now, distance, instances, config)
            .into_iter()
            .map(|(slot, ability)| CastRequest {
                slot,
                ability,
                target,
            })
            .collect()
    }

    fn ready_in_range(
        &mut self,
        now: f32,
        distance: f32,
        instances: &[AbilityInstance],
        config: &CombatConfig,
    ) -> Vec<(usize, AbilityId)> {
        let mut ready = Vec::new();
        for (index, instance) in instances.iter().enumerate() {
            let slot = &mut self.slots[index];
            slot.cooldown = instance.effective_cooldown(config);
            if !instance.is_ready(now, slot.cooldown) {
                continue;
            }
            if distance > instance.current_range() {
                continue;
            }
            ready.push((index, instance.id()));
        }
        ready
    }
}
