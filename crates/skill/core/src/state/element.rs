//! Element and on-hit passive descriptors supplied by the loadout provider.
//!
//! Both travel inside the execution context untouched; the core never
//! interprets them beyond forwarding them to the effect sink.

/// Elemental affinity of the caster's current loadout.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ElementTag {
    #[default]
    Neutral,
    Fire,
    Ice,
    Lightning,
    Poison,
    Holy,
}

/// Kind of status effect a passive applies on hit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PassiveKind {
    /// No on-hit effect.
    #[default]
    None,
    /// Damage over time scaled from the source hit.
    Burn,
    /// Damage over time, independent stacks are not tracked.
    Poison,
    /// Movement speed multiplier below 1.0.
    Slow,
    /// Movement fully halted, breaks nothing.
    Freeze,
    /// Movement and actions halted.
    Stun,
}

/// On-hit effect forwarded to [`crate::env::EffectSink::apply_passive`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDescriptor {
    pub kind: PassiveKind,
    /// Meaning depends on `kind`:
    /// - Burn/Poison: fraction of source damage dealt per second
    /// - Slow: movement multiplier (0.7 = 30% slow)
    /// - Freeze/Stun: unused
    pub magnitude: f32,
    /// Duration in seconds.
    pub duration: f32,
}

impl PassiveDescriptor {
    /// Passive that does nothing; the documented fallback when no loadout is available.
    pub const NONE: Self = Self {
        kind: PassiveKind::None,
        magnitude: 0.0,
        duration: 0.0,
    };

    pub const fn new(kind: PassiveKind, magnitude: f32, duration: f32) -> Self {
        Self {
            kind,
            magnitude,
            duration,
        }
    }

    /// A descriptor with no kind or no duration applies nothing.
    pub fn is_none(&self) -> bool {
        self.kind == PassiveKind::None || self.duration <= 0.0
    }
}

impl Default for PassiveDescriptor {
    fn default() -> Self {
        Self::NONE
    }
}
