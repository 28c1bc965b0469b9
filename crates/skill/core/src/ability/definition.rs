//! Immutable per-ability templates.
//!
//! Definitions are authored offline, loaded once at startup into an
//! [`super::AbilityCatalog`] and shared by every owner through `Arc`.

use crate::ability::{DeliveryTags, TraitTags};
use crate::behavior::Behavior;
use crate::modifiers::SpreadPattern;
use crate::state::{AbilityId, PrefabId};

fn default_max_level() -> u8 {
    5
}

fn default_base_count() -> u32 {
    1
}

/// Complete specification for one ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    /// Assigned by the catalog when left at 0 in authored data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: AbilityId,

    /// Authored name, used only for load-time resolution and logs.
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub delivery: DeliveryTags,

    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: TraitTags,

    // === Numeric curves ===
    pub base_damage: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_per_level: f32,
    pub base_cooldown: f32,
    /// Usually negative: cooldown shrinks as the ability levels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_per_level: f32,
    pub base_range: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range_per_level: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_max_level"))]
    pub max_level: u8,

    // === Multiplicity ===
    /// Projectiles or anchors produced per cast before count bonuses.
    #[cfg_attr(feature = "serde", serde(default = "default_base_count"))]
    pub base_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern: SpreadPattern,
    /// Per-ability replication delay; falls back to the config default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub multicast_delay: Option<f32>,

    // === Visuals ===
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefab: PrefabId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub impact_prefab: PrefabId,

    /// Effect strategy selected at load time.
    pub behavior: Behavior,
}

impl AbilityDefinition {
    /// Damage contributed by the definition at `level` (before owner attack and multipliers).
    pub fn damage_at(&self, level: u8) -> f32 {
        self.base_damage + self.damage_per_level * Self::steps(level)
    }

    /// Cooldown in seconds at `level`, never negative.
    pub fn cooldown_at(&self, level: u8) -> f32 {
        (self.base_cooldown + self.cooldown_per_level * Self::steps(level)).max(0.0)
    }

    /// Range at `level`, never negative.
    pub fn range_at(&self, level: u8) -> f32 {
        (self.base_range + self.range_per_level * Self::steps(level)).max(0.0)
    }

    fn steps(level: u8) -> f32 {
        level.saturating_sub(1) as f32
    }

    pub fn has_delivery(&self, tag: DeliveryTags) -> bool {
        self.delivery.contains(tag)
    }

    pub fn has_trait(&self, tag: TraitTags) -> bool {
        self.traits.contains(tag)
    }
}
