//! Behavior-specific tuning authored alongside each definition.

/// Where an area effect is centred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// On the current target; the cast needs a target.
    #[default]
    Target,
    /// On the caster.
    Caster,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectileParams {
    /// Units per second before the speed multiplier.
    pub speed: f32,
    /// Seconds before the projectile expires, before the duration multiplier.
    pub lifetime: f32,
    /// Maximum heading change per second for homing projectiles.
    pub turn_rate_degrees: f32,
    /// Extra targets a piercing projectile passes through.
    pub pierce_depth: u32,
    /// Damage factor applied after each pierced hit.
    pub pierce_decay: f32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            speed: 12.0,
            lifetime: 2.0,
            turn_rate_degrees: 200.0,
            pierce_depth: 0,
            pierce_decay: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AreaParams {
    pub anchor: Anchor,
    /// Seconds the strike visual stays alive.
    pub visual_lifetime: f32,
}

impl Default for AreaParams {
    fn default() -> Self {
        Self {
            anchor: Anchor::Target,
            visual_lifetime: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DotParams {
    pub anchor: Anchor,
    pub tick_interval: f32,
    /// Zone lifetime in seconds, before the duration multiplier.
    pub duration: f32,
}

impl Default for DotParams {
    fn default() -> Self {
        Self {
            anchor: Anchor::Target,
            tick_interval: 0.5,
            duration: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AuraParams {
    pub tick_interval: f32,
    /// Permanent auras never expire; others live for `duration` seconds.
    pub permanent: bool,
    pub duration: f32,
}

impl Default for AuraParams {
    fn default() -> Self {
        Self {
            tick_interval: 0.5,
            permanent: true,
            duration: 0.0,
        }
    }
}
