//! Traits describing the host world the core runs inside.
//!
//! The core consumes a spatial index, an effect sink, a prefab spawner, a
//! loadout provider, an owner attribute provider and an RNG. [`CombatEnv`]
//! bundles them so casts and effect updates can reach everything they need
//! without hard coupling to concrete implementations.
mod error;
mod owner;
mod rng;
mod world;

pub use error::OracleError;
pub use owner::{LoadoutOracle, OwnerOracle};
pub use rng::{
    ANCHOR_JITTER_CONTEXT, MULTICAST_TRIAL_CONTEXT, PcgRng, REPLICA_JITTER_CONTEXT, RngOracle,
    compute_seed,
};
pub use world::{EffectSink, PrefabSpawner, SpatialOracle};

use crate::state::{ElementTag, EntityId, PassiveDescriptor};

/// Aggregates the collaborators required by casts and effect updates.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    spatial: Option<&'a dyn SpatialOracle>,
    effects: Option<&'a dyn EffectSink>,
    spawner: Option<&'a dyn PrefabSpawner>,
    loadout: Option<&'a dyn LoadoutOracle>,
    owner: Option<&'a dyn OwnerOracle>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        spatial: Option<&'a dyn SpatialOracle>,
        effects: Option<&'a dyn EffectSink>,
        spawner: Option<&'a dyn PrefabSpawner>,
        loadout: Option<&'a dyn LoadoutOracle>,
        owner: Option<&'a dyn OwnerOracle>,
        rng: Option<&'a dyn RngOracle>,
    ) -> Self {
        Self {
            spatial,
            effects,
            spawner,
            loadout,
            owner,
            rng,
        }
    }

    /// Bundle with every oracle present.
    pub fn with_all(
        spatial: &'a dyn SpatialOracle,
        effects: &'a dyn EffectSink,
        spawner: &'a dyn PrefabSpawner,
        loadout: &'a dyn LoadoutOracle,
        owner: &'a dyn OwnerOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self::new(
            Some(spatial),
            Some(effects),
            Some(spawner),
            Some(loadout),
            Some(owner),
            Some(rng),
        )
    }

    /// Bundle with no oracles. Behaviors that need one fail with a recoverable error.
    pub fn empty() -> Self {
        Self {
            spatial: None,
            effects: None,
            spawner: None,
            loadout: None,
            owner: None,
            rng: None,
        }
    }

    /// Returns the SpatialOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpatialNotAvailable` if no spatial oracle was provided.
    pub fn spatial(&self) -> Result<&'a dyn SpatialOracle, OracleError> {
        self.spatial.ok_or(OracleError::SpatialNotAvailable)
    }

    /// Returns the EffectSink, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EffectsNotAvailable` if no sink was provided.
    pub fn effects(&self) -> Result<&'a dyn EffectSink, OracleError> {
        self.effects.ok_or(OracleError::EffectsNotAvailable)
    }

    /// Returns the PrefabSpawner, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpawnerNotAvailable` if no spawner was provided.
    pub fn spawner(&self) -> Result<&'a dyn PrefabSpawner, OracleError> {
        self.spawner.ok_or(OracleError::SpawnerNotAvailable)
    }

    /// Returns the LoadoutOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LoadoutNotAvailable` if no loadout oracle was provided.
    pub fn loadout(&self) -> Result<&'a dyn LoadoutOracle, OracleError> {
        self.loadout.ok_or(OracleError::LoadoutNotAvailable)
    }

    /// Returns the OwnerOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::OwnerNotAvailable` if no owner oracle was provided.
    pub fn owner(&self) -> Result<&'a dyn OwnerOracle, OracleError> {
        self.owner.ok_or(OracleError::OwnerNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Loadout element, or [`ElementTag::Neutral`] without a loadout provider.
    pub fn element_or_default(&self, owner: EntityId) -> ElementTag {
        self.loadout
            .map(|loadout| loadout.current_element(owner))
            .unwrap_or_default()
    }

    /// Loadout passive, or [`PassiveDescriptor::NONE`] without a loadout provider.
    pub fn passive_or_default(&self, owner: EntityId) -> PassiveDescriptor {
        self.loadout
            .map(|loadout| loadout.current_passive(owner))
            .unwrap_or(PassiveDescriptor::NONE)
    }

    /// Owner attack power, or 0 without an owner provider.
    pub fn attack_power_or_zero(&self, owner: EntityId) -> f32 {
        self.owner
            .map(|attrs| attrs.attack_power(owner))
            .unwrap_or(0.0)
    }

    /// Owner attack range, or 0 without an owner provider.
    pub fn attack_range_or_zero(&self, owner: EntityId) -> f32 {
        self.owner
            .map(|attrs| attrs.attack_range(owner))
            .unwrap_or(0.0)
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("spatial", &self.spatial.is_some())
            .field("effects", &self.effects.is_some())
            .field("spawner", &self.spawner.is_some())
            .field("loadout", &self.loadout.is_some())
            .field("owner", &self.owner.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}
