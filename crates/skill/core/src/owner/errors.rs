//! Errors surfaced by loadout changes and manual casts.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::AbilityId;

/// Rejected loadout change. The owner is left untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LoadoutError {
    #[error("all {capacity} ability slots are occupied")]
    CapacityExceeded { capacity: usize },

    #[error("{0} is not in the catalog")]
    UnknownAbility(AbilityId),

    #[error("no ability named '{0}'")]
    UnknownName(String),

    #[error("{0} is already equipped")]
    AlreadyEquipped(AbilityId),

    #[error("slot {slot} is out of range (owner has {len} abilities)")]
    SlotOutOfRange { slot: usize, len: usize },
}

impl CombatError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CapacityExceeded { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "LOADOUT_CAPACITY_EXCEEDED",
            Self::UnknownAbility(_) => "LOADOUT_UNKNOWN_ABILITY",
            Self::UnknownName(_) => "LOADOUT_UNKNOWN_NAME",
            Self::AlreadyEquipped(_) => "LOADOUT_ALREADY_EQUIPPED",
            Self::SlotOutOfRange { .. } => "LOADOUT_SLOT_OUT_OF_RANGE",
        }
    }
}

/// A manual cast that did not happen.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CastError {
    #[error("slot {slot} is out of range (owner has {len} abilities)")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("{ability} is on cooldown for {remaining:.2}s")]
    NotReady { ability: AbilityId, remaining: f32 },

    #[error("{0} needs a target")]
    MissingTarget(AbilityId),
}

impl CombatError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SlotOutOfRange { .. } => ErrorSeverity::Validation,
            Self::NotReady { .. } | Self::MissingTarget(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotOutOfRange { .. } => "CAST_SLOT_OUT_OF_RANGE",
            Self::NotReady { .. } => "CAST_NOT_READY",
            Self::MissingTarget(_) => "CAST_MISSING_TARGET",
        }
    }
}
