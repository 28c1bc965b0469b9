//! Errors raised while assembling a simulation.
//!
//! Once a simulation is running nothing is fatal: refused grants and missing
//! entities are logged and recorded instead.
use skill_core::LoadoutError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown ability '{0}'")]
    UnknownAbility(String),

    #[error("cannot equip '{ability}'")]
    Loadout {
        ability: String,
        #[source]
        source: LoadoutError,
    },

    #[error("simulation requires a player before building")]
    MissingPlayer,

    #[error("timestep must be positive, got {0}")]
    InvalidTimestep(f32),
}
