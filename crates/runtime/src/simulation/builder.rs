//! Builder turning loaded content into a ready-to-step [`Simulation`].

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use skill_content::{BonusGrant, EnemyWave, PlayerSpec, Scenario, TimedBonus};
use skill_core::{AbilityCatalog, AbilityId, CombatConfig, EntityId, Faction, PassiveDescriptor, PcgRng, SkillOwner};

use super::{Grant, PlayerBase, ScheduledGrant, Simulation};
use crate::error::{Result, RuntimeError};
use crate::events::CombatLog;
use crate::oracle::{Attributes, Loadouts, OwnerAttributes};
use crate::world::{Body, World};

const DEFAULT_TIMESTEP: f32 = 0.05;
const DEFAULT_DURATION: f32 = 30.0;

/// Builder for [`Simulation`].
///
/// Call [`Self::config`] before [`Self::scenario`] or [`Self::seed`]: the
/// config replaces the seed they set.
pub struct SimulationBuilder {
    catalog: Arc<AbilityCatalog>,
    config: CombatConfig,
    name: String,
    player: Option<PlayerSpec>,
    waves: Vec<EnemyWave>,
    bonuses: Vec<TimedBonus>,
    timestep: f32,
    duration: f32,
}

impl SimulationBuilder {
    pub(crate) fn new(catalog: Arc<AbilityCatalog>) -> Self {
        Self {
            catalog,
            config: CombatConfig::default(),
            name: "custom".to_string(),
            player: None,
            waves: Vec::new(),
            bonuses: Vec::new(),
            timestep: DEFAULT_TIMESTEP,
            duration: DEFAULT_DURATION,
        }
    }

    /// Override combat tuning
    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Take player, waves, bonuses, timing and seed from a loaded scenario.
    pub fn scenario(mut self, scenario: &Scenario) -> Self {
        self.name = scenario.name.clone();
        self.player = Some(scenario.player.clone());
        self.waves = scenario.enemies.clone();
        self.bonuses = scenario.bonuses.clone();
        self.timestep = scenario.timestep;
        self.duration = scenario.duration;
        if let Some(seed) = scenario.seed {
            self.config.rng_seed = seed;
        }
        self
    }

    pub fn player(mut self, player: PlayerSpec) -> Self {
        self.player = Some(player);
        self
    }

    pub fn wave(mut self, wave: EnemyWave) -> Self {
        self.waves.push(wave);
        self
    }

    pub fn bonus(mut self, bonus: TimedBonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    pub fn timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = seed;
        self
    }

    /// Resolves every ability name, equips the player and places waves due
    /// at time zero.
    ///
    /// # Errors
    ///
    /// Fails on a non-positive timestep, a missing player, an ability name
    /// absent from the catalog, or a starting loadout the player cannot hold.
    pub fn build(self) -> Result<Simulation> {
        if self.timestep <= 0.0 {
            return Err(RuntimeError::InvalidTimestep(self.timestep));
        }
        let spec = self.player.ok_or(RuntimeError::MissingPlayer)?;
        let resolve = |name: &str| -> Result<AbilityId> {
            self.catalog
                .resolve(name)
                .ok_or_else(|| RuntimeError::UnknownAbility(name.to_string()))
        };

        let mut player = SkillOwner::new(
            EntityId::PLAYER,
            Faction::Player,
            Arc::clone(&self.catalog),
            self.config.clone(),
        );
        for name in &spec.abilities {
            player
                .equip(resolve(name)?)
                .map_err(|source| RuntimeError::Loadout {
                    ability: name.clone(),
                    source,
                })?;
        }

        let mut grants = self
            .bonuses
            .iter()
            .map(|bonus| -> Result<ScheduledGrant> {
                let grant = match &bonus.grant {
                    BonusGrant::Stat { bucket, percent } => Grant::Stat {
                        bucket: *bucket,
                        percent: *percent,
                    },
                    BonusGrant::Count { ability, amount } => Grant::Count {
                        ability: resolve(ability)?,
                        amount: *amount,
                    },
                    BonusGrant::MultiCast { ability, percent } => Grant::MultiCast {
                        ability: resolve(ability)?,
                        percent: *percent,
                    },
                    BonusGrant::LevelUp { ability } => Grant::LevelUp(resolve(ability)?),
                    BonusGrant::Equip { ability } => Grant::Equip(resolve(ability)?),
                };
                Ok(ScheduledGrant {
                    at: bonus.at,
                    grant,
                    label: describe(&bonus.grant),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        grants.sort_by(|a, b| a.at.total_cmp(&b.at));

        let mut waves = self.waves;
        waves.sort_by(|a, b| a.spawn_at.total_cmp(&b.spawn_at));

        let world = World::new();
        let mut body = Body::new("player", Faction::Player, Vec2::ZERO, spec.health);
        body.speed = spec.speed;
        world.insert(body);

        let mut attributes = Attributes::new();
        attributes.insert(
            EntityId::PLAYER,
            OwnerAttributes {
                attack_power: spec.attack_power,
                attack_range: spec.attack_range,
            },
        );
        let mut loadouts = Loadouts::new();
        loadouts.insert(
            EntityId::PLAYER,
            spec.element,
            spec.passive.unwrap_or(PassiveDescriptor::NONE),
        );

        tracing::info!(
            scenario = %self.name,
            abilities = spec.abilities.len(),
            waves = waves.len(),
            bonuses = grants.len(),
            seed = self.config.rng_seed,
            "simulation built"
        );

        let mut simulation = Simulation {
            name: self.name,
            world,
            catalog: self.catalog,
            owners: vec![player],
            attributes,
            loadouts,
            rng: PcgRng,
            grants: VecDeque::from(grants),
            waves: VecDeque::from(waves),
            player_base: PlayerBase {
                health: spec.health,
                speed: spec.speed,
            },
            timestep: self.timestep,
            duration: self.duration,
            log: CombatLog::new(),
            totals: Default::default(),
            bonuses_granted: 0,
            steps: 0,
        };
        simulation.spawn_due_waves(0.0);
        Ok(simulation)
    }
}

fn describe(grant: &BonusGrant) -> String {
    match grant {
        BonusGrant::Stat { bucket, percent } => format!("{bucket} {percent:+}%"),
        BonusGrant::Count { ability, amount } => format!("{ability} +{amount} count"),
        BonusGrant::MultiCast { ability, percent } => format!("{ability} {percent:+}% multi-cast"),
        BonusGrant::LevelUp { ability } => format!("{ability} level up"),
        BonusGrant::Equip { ability } => format!("equip {ability}"),
    }
}
