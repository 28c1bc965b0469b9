//! Fixed-step driver around the world and its skill owners.
//!
//! Each step, in order: due enemy waves appear, due bonuses are granted,
//! owner attributes are refreshed, every living owner updates (continuations,
//! live effects, auto-cast), and finally the world advances statuses,
//! movement, contact damage and deaths.

mod builder;
mod report;

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use skill_content::EnemyWave;
use skill_core::{
    AbilityCatalog, AbilityId, CombatEnv, ElementTag, EntityId, Faction, PassiveDescriptor,
    PcgRng, SkillOwner, SpatialOracle, StatBucket, UpdateReport,
};

use crate::events::{CombatEvent, CombatLog, DamageCause};
use crate::oracle::{Attributes, Loadouts, OwnerAttributes};
use crate::world::{Body, World};

pub use builder::SimulationBuilder;
pub use report::{AbilitySummary, SimulationReport};

/// A bonus resolved against the catalog, waiting for its time.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Grant {
    Stat { bucket: StatBucket, percent: f32 },
    Count { ability: AbilityId, amount: u32 },
    MultiCast { ability: AbilityId, percent: f32 },
    LevelUp(AbilityId),
    Equip(AbilityId),
}

#[derive(Clone, Debug)]
pub(crate) struct ScheduledGrant {
    pub at: f32,
    pub grant: Grant,
    pub label: String,
}

/// Movement and health the player had before player-scoped bonuses.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlayerBase {
    pub health: f32,
    pub speed: f32,
}

/// What one [`Simulation::step`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub now: f32,
    pub update: UpdateReport,
    pub killed: usize,
}

pub struct Simulation {
    name: String,
    world: World,
    catalog: Arc<AbilityCatalog>,
    owners: Vec<SkillOwner>,
    attributes: Attributes,
    loadouts: Loadouts,
    rng: PcgRng,
    grants: VecDeque<ScheduledGrant>,
    waves: VecDeque<EnemyWave>,
    player_base: PlayerBase,
    timestep: f32,
    duration: f32,
    log: CombatLog,
    totals: UpdateReport,
    bonuses_granted: u32,
    steps: u64,
}

impl Simulation {
    /// Create a new simulation builder
    pub fn builder(catalog: Arc<AbilityCatalog>) -> SimulationBuilder {
        SimulationBuilder::new(catalog)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn catalog(&self) -> &Arc<AbilityCatalog> {
        &self.catalog
    }

    pub fn owners(&self) -> &[SkillOwner] {
        &self.owners
    }

    pub fn owner(&self, id: EntityId) -> Option<&SkillOwner> {
        self.owners.iter().find(|owner| owner.id() == id)
    }

    pub fn player(&self) -> Option<&SkillOwner> {
        self.owner(EntityId::PLAYER)
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn now(&self) -> f32 {
        self.world.clock()
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// The player is dead, or every enemy is dead and no wave is pending.
    pub fn is_finished(&self) -> bool {
        !self.world.is_alive(EntityId::PLAYER)
            || (self.world.count(Faction::Enemy) == 0 && self.waves.is_empty())
    }

    // ========================================================================
    // Owners
    // ========================================================================

    /// Adds another skill-casting actor, placed as `body`.
    ///
    /// The body takes the owner's id; the owner uses the neutral element and
    /// no passive unless a loadout is given.
    pub fn add_caster(
        &mut self,
        owner: SkillOwner,
        mut body: Body,
        attributes: OwnerAttributes,
        loadout: Option<(ElementTag, PassiveDescriptor)>,
    ) {
        body.id = owner.id();
        body.faction = owner.faction();
        self.world.insert(body);
        self.attributes.insert(owner.id(), attributes);
        if let Some((element, passive)) = loadout {
            self.loadouts.insert(owner.id(), element, passive);
        }
        tracing::debug!(owner = %owner.id(), faction = %owner.faction(), "caster added");
        self.owners.push(owner);
    }

    // ========================================================================
    // Driving
    // ========================================================================

    /// Advances everything by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        let now = self.world.clock() + dt;
        self.world.set_clock(now);
        self.steps += 1;

        self.spawn_due_waves(now);
        self.grant_due_bonuses(now);
        for owner in &self.owners {
            self.attributes.refresh(owner);
        }

        let env = CombatEnv::with_all(
            &self.world,
            &self.world,
            &self.world,
            &self.loadouts,
            &self.attributes,
            &self.rng,
        );
        let mut update = UpdateReport::default();
        for owner in &mut self.owners {
            if self.world.position_of(owner.id()).is_none() {
                owner.abandon_pending();
                continue;
            }
            update.merge(&owner.update(now, dt, env));
        }
        self.totals.merge(&update);

        let world_step = self.world.step(dt);
        self.log.extend(self.world.drain_events());

        StepOutcome {
            now,
            update,
            killed: world_step.killed.len(),
        }
    }

    /// Steps at the configured timestep for `seconds`, stopping early once
    /// the fight is over.
    pub fn run_for(&mut self, seconds: f32) -> SimulationReport {
        let steps = (seconds / self.timestep).round() as u64;
        for _ in 0..steps {
            if self.is_finished() {
                break;
            }
            self.step(self.timestep);
        }
        self.report()
    }

    /// Runs until the configured duration elapses or the fight is over.
    pub fn run(&mut self) -> SimulationReport {
        tracing::info!(
            scenario = %self.name,
            duration = self.duration,
            timestep = self.timestep,
            "simulation started"
        );
        let remaining = (self.duration - self.now()).max(0.0);
        let report = self.run_for(remaining);
        tracing::info!(
            scenario = %self.name,
            elapsed = report.elapsed,
            kills = report.kills,
            player_alive = report.player_alive,
            "simulation finished"
        );
        report
    }

    pub fn report(&self) -> SimulationReport {
        let player = self.world.body(EntityId::PLAYER);
        let damage_taken = [DamageCause::Ability, DamageCause::Status, DamageCause::Contact]
            .into_iter()
            .map(|cause| self.log.damage_to(Faction::Player, cause))
            .sum();
        SimulationReport {
            scenario: self.name.clone(),
            elapsed: self.now(),
            steps: self.steps,
            casts: self.totals.casts,
            replicas_scheduled: self.totals.replicas_scheduled,
            replicas_fired: self.totals.replicas_fired,
            replicas_dropped: self.totals.dropped,
            hits: self.totals.hits,
            damage_dealt: self.log.damage_to(Faction::Enemy, DamageCause::Ability),
            status_damage: self.log.damage_to(Faction::Enemy, DamageCause::Status),
            damage_taken,
            kills: self
                .log
                .kills()
                .filter(|event| matches!(event, CombatEvent::Killed { faction: Faction::Enemy, .. }))
                .count() as u32,
            enemies_remaining: self.world.count(Faction::Enemy),
            bonuses_granted: self.bonuses_granted,
            player_alive: player.as_ref().is_some_and(Body::is_alive),
            player_health: player.map_or(0.0, |body| body.health.max(0.0)),
            visuals_spawned: self.world.visuals_spawned(),
            abilities: self.player().map(AbilitySummary::collect).unwrap_or_default(),
        }
    }

    // ========================================================================
    // Scheduled content
    // ========================================================================

    fn spawn_due_waves(&mut self, now: f32) {
        while self.waves.front().is_some_and(|wave| wave.spawn_at <= now) {
            let Some(wave) = self.waves.pop_front() else {
                break;
            };
            self.spawn_wave(&wave, now);
        }
    }

    /// Places the wave in a column centred on its position.
    fn spawn_wave(&mut self, wave: &EnemyWave, now: f32) {
        let name = if wave.name.is_empty() { "enemy" } else { wave.name.as_str() };
        let centre = Vec2::from(wave.position);
        let half = (wave.count.saturating_sub(1)) as f32 / 2.0;
        for index in 0..wave.count {
            let offset = Vec2::new(0.0, (index as f32 - half) * wave.spacing);
            self.world.spawn_body(Body::chaser(
                name,
                centre + offset,
                wave.health,
                wave.speed,
                wave.contact_damage,
            ));
        }
        tracing::info!(wave = name, count = wave.count, at = now, "wave spawned");
        self.log.push(CombatEvent::WaveSpawned {
            at: now,
            name: name.to_string(),
            count: wave.count,
        });
    }

    fn grant_due_bonuses(&mut self, now: f32) {
        while self.grants.front().is_some_and(|grant| grant.at <= now) {
            let Some(scheduled) = self.grants.pop_front() else {
                break;
            };
            match self.apply_grant(&scheduled.grant) {
                Ok(()) => {
                    self.bonuses_granted += 1;
                    tracing::info!(grant = %scheduled.label, at = now, "bonus granted");
                    self.log.push(CombatEvent::BonusGranted {
                        at: now,
                        description: scheduled.label,
                    });
                }
                Err(reason) => {
                    tracing::warn!(grant = %scheduled.label, %reason, "bonus refused");
                    self.log.push(CombatEvent::GrantRefused {
                        at: now,
                        description: scheduled.label,
                        reason,
                    });
                }
            }
        }
    }

    fn apply_grant(&mut self, grant: &Grant) -> Result<(), String> {
        let base = self.player_base;
        let Some(player) = self
            .owners
            .iter_mut()
            .find(|owner| owner.id() == EntityId::PLAYER)
        else {
            return Err("no player owner".to_string());
        };

        match *grant {
            Grant::Stat { bucket, percent } => {
                player.apply_bonus(bucket, percent);
                if matches!(bucket, StatBucket::PlayerHealth | StatBucket::PlayerSpeed) {
                    let health = base.health * player.player_multiplier(StatBucket::PlayerHealth);
                    let speed = base.speed * player.player_multiplier(StatBucket::PlayerSpeed);
                    self.world.with_body_mut(EntityId::PLAYER, |body| {
                        let ratio = if body.max_health > 0.0 {
                            body.health / body.max_health
                        } else {
                            1.0
                        };
                        body.max_health = health;
                        body.health = ratio * health;
                        body.speed = speed;
                    });
                }
            }
            Grant::Count { ability, amount } => player.add_count(ability, amount),
            Grant::MultiCast { ability, percent } => player.add_multicast_chance(ability, percent),
            Grant::LevelUp(ability) => {
                let slot = player
                    .slot_of(ability)
                    .ok_or_else(|| format!("{ability} is not equipped"))?;
                let leveled = player.level_up(slot).map_err(|e| e.to_string())?;
                if !leveled {
                    return Err(format!("{ability} is already at max level"));
                }
            }
            Grant::Equip(ability) => {
                player.equip(ability).map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("name", &self.name)
            .field("now", &self.now())
            .field("owners", &self.owners.len())
            .field("pending_grants", &self.grants.len())
            .field("pending_waves", &self.waves.len())
            .finish()
    }
}
