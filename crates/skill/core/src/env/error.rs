//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};

/// A collaborator required by a cast was not wired into the [`super::CombatEnv`].
///
/// Callers never propagate these to the host loop: the affected cast or
/// effect update is skipped and logged, or a documented default is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("SpatialOracle not available")]
    SpatialNotAvailable,

    #[error("EffectSink not available")]
    EffectsNotAvailable,

    #[error("PrefabSpawner not available")]
    SpawnerNotAvailable,

    #[error("LoadoutOracle not available")]
    LoadoutNotAvailable,

    #[error("OwnerOracle not available")]
    OwnerNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SpatialNotAvailable => "ORACLE_SPATIAL_NOT_AVAILABLE",
            EffectsNotAvailable => "ORACLE_EFFECTS_NOT_AVAILABLE",
            SpawnerNotAvailable => "ORACLE_SPAWNER_NOT_AVAILABLE",
            LoadoutNotAvailable => "ORACLE_LOADOUT_NOT_AVAILABLE",
            OwnerNotAvailable => "ORACLE_OWNER_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
