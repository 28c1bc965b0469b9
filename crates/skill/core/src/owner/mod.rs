//! Per-owner aggregate tying ledgers, instances, scheduler and effects together.
//!
//! A [`SkillOwner`] is the explicit per-actor state object: nothing here is
//! global, so any number of simulated actors can own abilities side by side.
//! Ledgers are mutated only through bonus/level-up calls, synchronously, so a
//! recompute always finishes before the next cast reads an instance.
mod errors;
mod snapshot;

pub use errors::{CastError, LoadoutError};
pub use snapshot::{EquippedAbility, OwnerSnapshot};

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::ability::{AbilityCatalog, AbilityInstance};
use crate::behavior::{
    ActiveEffects, BehaviorScope, CastOutcome, ExecutionContext, Resumed, TimerQueue, resume,
};
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::error::CombatError;
use crate::modifiers::{CountModifier, MultiCastLedger, Replicator};
use crate::scheduler::AutoCaster;
use crate::state::{AbilityId, EntityId, Faction};
use crate::stats::{StatAggregator, StatBucket, StatLedger};

/// What one [`SkillOwner::update`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Top-level casts issued by the scheduler.
    pub casts: u32,
    /// Replicas scheduled by those casts.
    pub replicas_scheduled: u32,
    /// Replicas that fired this update.
    pub replicas_fired: u32,
    /// Hits landed by casts, continuations and live effects.
    pub hits: u32,
    /// Continuations abandoned because the caster was gone.
    pub dropped: u32,
}

impl UpdateReport {
    /// Adds `other`'s counters into this report.
    pub fn merge(&mut self, other: &UpdateReport) {
        self.casts += other.casts;
        self.replicas_scheduled += other.replicas_scheduled;
        self.replicas_fired += other.replicas_fired;
        self.hits += other.hits;
        self.dropped += other.dropped;
    }

    fn absorb_cast(&mut self, outcome: &CastReport) {
        self.casts += 1;
        self.hits += outcome.outcome.hits;
        self.replicas_scheduled += outcome.replicas;
    }
}

/// Outcome of one successful cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastReport {
    pub outcome: CastOutcome,
    /// Replicas scheduled by the multi-cast roll.
    pub replicas: u32,
}

type Instances = ArrayVec<AbilityInstance, { CombatConfig::MAX_ABILITY_SLOTS }>;

pub struct SkillOwner {
    id: EntityId,
    faction: Faction,
    config: CombatConfig,
    catalog: Arc<AbilityCatalog>,
    instances: Instances,
    stats: StatAggregator,
    counts: CountModifier,
    multicast: MultiCastLedger,
    scheduler: AutoCaster,
    effects: ActiveEffects,
    timers: TimerQueue,
    /// Incremented on every top-level cast; seeds that cast's random rolls.
    nonce: u64,
}

impl SkillOwner {
    pub fn new(
        id: EntityId,
        faction: Faction,
        catalog: Arc<AbilityCatalog>,
        config: CombatConfig,
    ) -> Self {
        Self {
            id,
            faction,
            stats: StatAggregator::new(&config),
            counts: CountModifier::from_catalog(&catalog).with_max_count(config.max_spawn_count),
            multicast: MultiCastLedger::new(),
            scheduler: AutoCaster::new(),
            effects: ActiveEffects::new(),
            timers: TimerQueue::new(),
            instances: ArrayVec::new(),
            nonce: 0,
            config,
            catalog,
        }
    }

    /// Rebuilds an owner from a snapshot.
    ///
    /// # Errors
    ///
    /// Fails when an equipped ability is missing from `catalog` or the
    /// snapshot holds more abilities than the config allows.
    pub fn restore(
        snapshot: &OwnerSnapshot,
        faction: Faction,
        catalog: Arc<AbilityCatalog>,
        config: CombatConfig,
    ) -> Result<Self, LoadoutError> {
        let mut owner = Self::new(snapshot.owner, faction, catalog, config);
        owner.stats = StatAggregator::with_ledger(
            &owner.config,
            snapshot.stat_ledger.iter().copied().collect::<StatLedger>(),
        );
        for entry in &snapshot.count_ledger {
            owner.counts.restore_entry(*entry);
        }
        for entry in &snapshot.multicast_ledger {
            owner.multicast.add_chance(entry.ability, entry.chance);
        }
        for equipped in &snapshot.equipped {
            let slot = owner.equip(equipped.ability)?;
            let definition = Arc::clone(owner.instances[slot].definition());
            let mut instance = AbilityInstance::with_level(definition, equipped.level);
            if let Some(last_cast) = equipped.last_cast {
                instance.record_cast(last_cast);
            }
            owner.stats.recompute(&mut instance);
            owner.instances[slot] = instance;
        }
        owner.scheduler.sync_slots(&owner.instances, &owner.config);
        owner.counts.sync_scoped(&owner.instances);
        Ok(owner)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<AbilityCatalog> {
        &self.catalog
    }

    pub fn instances(&self) -> &[AbilityInstance] {
        &self.instances
    }

    pub fn instance(&self, slot: usize) -> Option<&AbilityInstance> {
        self.instances.get(slot)
    }

    pub fn slot_of(&self, ability: AbilityId) -> Option<usize> {
        self.instances
            .iter()
            .position(|instance| instance.id() == ability)
    }

    pub fn stats(&self) -> &StatAggregator {
        &self.stats
    }

    pub fn counts(&self) -> &CountModifier {
        &self.counts
    }

    pub fn multicast(&self) -> &MultiCastLedger {
        &self.multicast
    }

    pub fn scheduler(&self) -> &AutoCaster {
        &self.scheduler
    }

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    // ========================================================================
    // Loadout
    // ========================================================================

    /// Equips `ability` into the next free slot and returns that slot.
    ///
    /// # Errors
    ///
    /// Rejects unknown or duplicate abilities, and any ability beyond the
    /// slot capacity, without changing the owner.
    pub fn equip(&mut self, ability: AbilityId) -> Result<usize, LoadoutError> {
        let definition = self
            .catalog
            .get(ability)
            .cloned()
            .ok_or(LoadoutError::UnknownAbility(ability))?;
        if self.slot_of(ability).is_some() {
            return Err(LoadoutError::AlreadyEquipped(ability));
        }
        let capacity = self.config.slot_capacity();
        if self.instances.len() >= capacity {
            return Err(LoadoutError::CapacityExceeded { capacity });
        }

        let mut instance = AbilityInstance::new(definition);
        self.stats.recompute(&mut instance);
        self.instances.push(instance);
        self.scheduler.sync_slots(&self.instances, &self.config);
        self.counts.sync_scoped(&self.instances);

        let slot = self.instances.len() - 1;
        tracing::debug!(owner = %self.id, %ability, slot, "ability equipped");
        Ok(slot)
    }

    /// Resolves `name` through the catalog, then equips it.
    ///
    /// # Errors
    ///
    /// [`LoadoutError::UnknownName`] for names missing from the catalog, plus
    /// everything [`Self::equip`] reports.
    pub fn equip_by_name(&mut self, name: &str) -> Result<usize, LoadoutError> {
        let ability = self
            .catalog
            .resolve(name)
            .ok_or_else(|| LoadoutError::UnknownName(name.to_string()))?;
        self.equip(ability)
    }

    /// Removes the ability in `slot` and retires its live effects.
    ///
    /// # Errors
    ///
    /// [`LoadoutError::SlotOutOfRange`] when the slot is empty.
    pub fn unequip(&mut self, slot: usize, env: CombatEnv<'_>) -> Result<AbilityInstance, LoadoutError> {
        self.check_slot(slot)?;
        let removed = self.instances.remove(slot);
        self.effects.retire_ability(removed.id(), env.spawner().ok());
        self.scheduler.sync_slots(&self.instances, &self.config);
        self.counts.sync_scoped(&self.instances);
        tracing::debug!(owner = %self.id, ability = %removed.id(), slot, "ability unequipped");
        Ok(removed)
    }

    /// Swaps the ability in `slot` for `ability` and returns the old instance.
    ///
    /// The slot's cooldown baseline becomes the new ability's cooldown and its
    /// last cast is cleared.
    ///
    /// # Errors
    ///
    /// Rejects empty slots, unknown abilities and abilities equipped in
    /// another slot.
    pub fn replace(
        &mut self,
        slot: usize,
        ability: AbilityId,
        env: CombatEnv<'_>,
    ) -> Result<AbilityInstance, LoadoutError> {
        self.check_slot(slot)?;
        let definition = self
            .catalog
            .get(ability)
            .cloned()
            .ok_or(LoadoutError::UnknownAbility(ability))?;
        if self.slot_of(ability).is_some_and(|existing| existing != slot) {
            return Err(LoadoutError::AlreadyEquipped(ability));
        }

        let mut instance = AbilityInstance::new(definition);
        self.stats.recompute(&mut instance);
        self.scheduler.replace_slot(slot, &mut instance, &self.config);
        let old = core::mem::replace(&mut self.instances[slot], instance);
        self.counts.sync_scoped(&self.instances);
        if old.id() != ability {
            self.effects.retire_ability(old.id(), env.spawner().ok());
        }
        tracing::debug!(owner = %self.id, from = %old.id(), to = %ability, slot, "ability replaced");
        Ok(old)
    }

    /// Levels the ability in `slot`. Returns false once it is at max level.
    ///
    /// # Errors
    ///
    /// [`LoadoutError::SlotOutOfRange`] when the slot is empty.
    pub fn level_up(&mut self, slot: usize) -> Result<bool, LoadoutError> {
        self.check_slot(slot)?;
        let leveled = self.instances[slot].level_up();
        if leveled {
            self.scheduler.sync_slots(&self.instances, &self.config);
            tracing::debug!(
                owner = %self.id,
                ability = %self.instances[slot].id(),
                level = self.instances[slot].level(),
                "ability leveled"
            );
        }
        Ok(leveled)
    }

    /// Starts a full cooldown on `slot` as if it had just been cast.
    ///
    /// # Errors
    ///
    /// [`LoadoutError::SlotOutOfRange`] when the slot is empty.
    pub fn prime(&mut self, slot: usize, now: f32) -> Result<(), LoadoutError> {
        self.check_slot(slot)?;
        self.scheduler.prime(&mut self.instances[slot], now);
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<(), LoadoutError> {
        if slot >= self.instances.len() {
            return Err(LoadoutError::SlotOutOfRange {
                slot,
                len: self.instances.len(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Bonuses
    // ========================================================================

    /// Records a stat bonus and recomputes every equipped ability.
    pub fn apply_bonus(&mut self, bucket: StatBucket, percent: f32) {
        self.stats.apply_bonus(bucket, percent, &mut self.instances);
        self.scheduler.sync_slots(&self.instances, &self.config);
        self.counts.sync_scoped(&self.instances);
    }

    /// Adds a flat extra to the count ledger of `ability`.
    pub fn add_count(&mut self, ability: AbilityId, delta: u32) {
        self.counts.add_count(ability, delta);
    }

    /// Adds `percent` to the multicast chance ledger of `ability`.
    pub fn add_multicast_chance(&mut self, ability: AbilityId, percent: f32) {
        self.multicast.add_chance(ability, percent);
    }

    /// Units per cast: the count ledger (or fallback) plus delivery-scoped
    /// Count bonuses of the equipped instance, capped by the config.
    pub fn total_count(&self, ability: AbilityId) -> u32 {
        self.counts.get_total_count(ability)
    }

    /// Per-ability ledger chance plus delivery-scoped MultiCast bonuses.
    pub fn multicast_chance(&self, ability: AbilityId) -> f32 {
        let scoped = self
            .slot_of(ability)
            .map_or(0.0, |slot| self.instances[slot].extras.multicast_chance);
        self.multicast.chance(ability) + scoped
    }

    /// `1 + total/100` for a player-scoped bucket.
    pub fn player_multiplier(&self, bucket: StatBucket) -> f32 {
        self.stats.player_multiplier(bucket)
    }

    // ========================================================================
    // Casting
    // ========================================================================

    /// Resolves the execution context for `slot` against `target`.
    ///
    /// Missing loadout or attribute providers degrade to the neutral element,
    /// no passive and zero attack power.
    pub fn build_context(
        &self,
        slot: usize,
        target: Option<EntityId>,
        env: CombatEnv<'_>,
    ) -> Option<ExecutionContext> {
        let instance = self.instances.get(slot)?;
        let definition = instance.definition();
        let ability = instance.id();

        let mut ctx = ExecutionContext::new(ability, self.id);
        ctx.caster_faction = self.faction;
        ctx.target = target;
        ctx.traits = definition.traits;
        ctx.damage = instance.current_damage(env.attack_power_or_zero(self.id));
        ctx.range = instance.current_range();
        ctx.speed_multiplier = instance.multipliers.speed;
        ctx.duration_multiplier = instance.multipliers.duration;
        ctx.element = env.element_or_default(self.id);
        ctx.passive = env.passive_or_default(self.id);
        ctx.prefab = definition.prefab;
        ctx.impact_prefab = definition.impact_prefab;
        ctx.spawn_count = self.counts.get_total_count(ability);
        ctx.pattern = self.counts.pattern_of(ability);
        ctx.multicast_chance = self.multicast_chance(ability);
        ctx.nonce = self.nonce;
        Some(ctx)
    }

    /// Casts the ability in `slot` now, bypassing targeting.
    ///
    /// On success the cast is recorded and multi-cast is rolled once per
    /// produced unit.
    ///
    /// # Errors
    ///
    /// Returns [`CastError`] for an empty slot, an ability still cooling down,
    /// or a targeted ability cast without a target.
    pub fn cast(
        &mut self,
        slot: usize,
        target: Option<EntityId>,
        now: f32,
        env: CombatEnv<'_>,
    ) -> Result<CastReport, CastError> {
        let len = self.instances.len();
        let instance = self
            .instances
            .get(slot)
            .ok_or(CastError::SlotOutOfRange { slot, len })?;
        let ability = instance.id();
        let cooldown = instance.effective_cooldown(&self.config);
        if !instance.is_ready(now, cooldown) {
            return Err(CastError::NotReady {
                ability,
                remaining: instance.remaining_cooldown(now, cooldown),
            });
        }
        let definition = Arc::clone(instance.definition());
        let ctx = self
            .build_context(slot, target, env)
            .ok_or(CastError::SlotOutOfRange { slot, len })?;
        if !definition.behavior.can_execute(&ctx) {
            return Err(CastError::MissingTarget(ability));
        }

        self.nonce += 1;
        let mut scope = BehaviorScope {
            env,
            config: &self.config,
            effects: &mut self.effects,
            timers: &mut self.timers,
            now,
        };
        let outcome = definition.behavior.execute(&definition, &ctx, &mut scope);
        let replicas = Replicator::process_multi_cast(&definition, &ctx, outcome.produced, &mut scope);
        self.instances[slot].record_cast(now);

        tracing::debug!(
            owner = %self.id,
            %ability,
            behavior = definition.behavior.name(),
            target = ?target,
            produced = outcome.produced,
            replicas,
            "ability cast"
        );
        Ok(CastReport { outcome, replicas })
    }

    /// One simulation step: fires due continuations, advances live effects,
    /// then lets the scheduler cast whatever is ready.
    pub fn update(&mut self, now: f32, dt: f32, env: CombatEnv<'_>) -> UpdateReport {
        let mut report = UpdateReport::default();

        let due = self.timers.drain_due(now);
        if !due.is_empty() {
            let mut scope = BehaviorScope {
                env,
                config: &self.config,
                effects: &mut self.effects,
                timers: &mut self.timers,
                now,
            };
            for continuation in due {
                match resume(continuation, &mut scope) {
                    Resumed::Replica(outcome) => {
                        report.replicas_fired += 1;
                        report.hits += outcome.hits;
                    }
                    Resumed::Strike { hits } => report.hits += hits,
                    Resumed::Dropped => report.dropped += 1,
                }
            }
        }

        report.hits += self.effects.update(dt, env, &self.config);

        let requests = self.scheduler.tick(
            now,
            self.id,
            self.faction,
            &self.instances,
            env,
            &self.config,
        );
        for request in requests {
            match self.cast(request.slot, Some(request.target), now, env) {
                Ok(cast) => report.absorb_cast(&cast),
                Err(err) if err.severity().is_recoverable() => {
                    tracing::trace!(owner = %self.id, ability = %request.ability, %err, "auto-cast withheld");
                }
                Err(err) => {
                    tracing::warn!(
                        owner = %self.id,
                        ability = %request.ability,
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        %err,
                        "auto-cast rejected"
                    );
                }
            }
        }
        report
    }

    /// Drops every pending continuation, e.g. when the owner is destroyed.
    pub fn abandon_pending(&mut self) {
        self.timers.abandon_caster(self.id);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Captures equipped levels, cast times and bonus ledgers for restore.
    pub fn snapshot(&self) -> OwnerSnapshot {
        OwnerSnapshot {
            owner: self.id,
            equipped: self
                .instances
                .iter()
                .map(|instance| EquippedAbility {
                    ability: instance.id(),
                    level: instance.level(),
                    last_cast: instance.last_cast(),
                })
                .collect(),
            stat_ledger: self.stats.ledger().entries().to_vec(),
            count_ledger: self.counts.entries().copied().collect(),
            multicast_ledger: self.multicast.entries().collect(),
        }
    }
}

impl core::fmt::Debug for SkillOwner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkillOwner")
            .field("id", &self.id)
            .field("faction", &self.faction)
            .field("abilities", &self.instances.len())
            .field("nonce", &self.nonce)
            .field("pending", &self.timers.len())
            .finish()
    }
}
