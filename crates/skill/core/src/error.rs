//! Common error infrastructure for skill-core.
//!
//! Domain-specific errors (e.g. [`crate::owner::LoadoutError`],
//! [`crate::ability::CatalogError`]) live next to the operations that produce
//! them. Nothing in this crate is fatal to the host loop: most edge cases
//! degrade to documented defaults, and the errors that do surface are reported
//! to the caller without mutating state.

/// How a caller should treat a failed combat operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later or with another choice: full slots, a cooldown still
    /// running, a collaborator missing this frame.
    Recoverable,

    /// Bad input such as an unknown ability or a malformed definition.
    Validation,
}

impl ErrorSeverity {
    /// Lowercase label for log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Implemented by every error enum in this crate.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, e.g. `LOADOUT_CAPACITY_EXCEEDED`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels() {
        assert_eq!(ErrorSeverity::Recoverable.as_str(), "recoverable");
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
    }
}
