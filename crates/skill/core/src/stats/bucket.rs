//! Closed enumeration of stat bonus buckets.
//!
//! A bucket's scope and affected quantity are read from its key name: the
//! prefix names the scope (`Player`, `AllAbilities`, `Projectile`, `Area`,
//! `Dot`) and the suffix names the stat. Keys that fail to parse are ignored
//! by the aggregator.

use strum::IntoEnumIterator;

use crate::ability::DeliveryTags;

/// Ledger key for a percentage bonus.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatBucket {
    // ========================================================================
    // Per-player stats
    // ========================================================================
    PlayerHealth,
    PlayerSpeed,
    PlayerPower,
    PlayerHeal,
    PlayerRange,

    // ========================================================================
    // Every ability
    // ========================================================================
    AllAbilitiesDamage,
    AllAbilitiesCooldown,
    AllAbilitiesRange,
    AllAbilitiesSpeed,
    AllAbilitiesDuration,

    // ========================================================================
    // Projectile delivery
    // ========================================================================
    ProjectileDamage,
    ProjectileCooldown,
    ProjectileRange,
    ProjectileCount,
    ProjectileMultiCast,

    // ========================================================================
    // Area delivery
    // ========================================================================
    AreaDamage,
    AreaCooldown,
    AreaRange,
    AreaCount,
    AreaMultiCast,

    // ========================================================================
    // Damage-over-time delivery
    // ========================================================================
    DotDamage,
    DotCooldown,
    DotRange,
    DotCount,
    DotMultiCast,
}

/// Which owners/instances a bucket targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketScope {
    /// The owner itself, never an ability.
    Player,
    /// Every ability regardless of tags.
    AllAbilities,
    /// Abilities whose delivery tags contain this tag.
    Delivery(DeliveryTags),
}

/// Quantity a bucket modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum BucketStat {
    Health,
    Speed,
    Power,
    Heal,
    Range,
    Damage,
    Cooldown,
    Duration,
    Count,
    MultiCast,
}

impl BucketStat {
    fn suffix(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Speed => "Speed",
            Self::Power => "Power",
            Self::Heal => "Heal",
            Self::Range => "Range",
            Self::Damage => "Damage",
            Self::Cooldown => "Cooldown",
            Self::Duration => "Duration",
            Self::Count => "Count",
            Self::MultiCast => "MultiCast",
        }
    }
}

const SCOPE_PREFIXES: [(&str, BucketScope); 5] = [
    ("AllAbilities", BucketScope::AllAbilities),
    ("Player", BucketScope::Player),
    ("Projectile", BucketScope::Delivery(DeliveryTags::PROJECTILE)),
    ("Area", BucketScope::Delivery(DeliveryTags::AREA)),
    ("Dot", BucketScope::Delivery(DeliveryTags::DOT)),
];

impl StatBucket {
    /// Variant name, e.g. `"ProjectileDamage"`. Scope and stat are parsed
    /// from it.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Scope parsed from the key prefix.
    pub fn scope(self) -> Option<BucketScope> {
        let key = self.key();
        SCOPE_PREFIXES
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix))
            .map(|(_, scope)| *scope)
    }

    /// Stat parsed from the key suffix (whatever follows the scope prefix).
    pub fn stat(self) -> Option<BucketStat> {
        let key = self.key();
        let (prefix, _) = SCOPE_PREFIXES
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix))?;
        let rest = &key[prefix.len()..];
        BucketStat::iter().find(|stat| stat.suffix() == rest)
    }

    /// True for buckets that feed per-ability values rather than the owner.
    pub fn is_ability_scoped(self) -> bool {
        matches!(
            self.scope(),
            Some(BucketScope::AllAbilities | BucketScope::Delivery(_))
        )
    }
}

/// Whether a bucket applies to an ability carrying `delivery` tags.
///
/// `AllAbilities` buckets always apply; delivery-scoped buckets apply when the
/// tag set contains the bucket's tag. Tags are not exclusive, so an Area+DOT
/// ability matches both `Area*` and `Dot*` buckets.
pub fn applies_to(delivery: DeliveryTags, bucket: StatBucket) -> bool {
    match bucket.scope() {
        Some(BucketScope::AllAbilities) => true,
        Some(BucketScope::Delivery(tag)) => delivery.contains(tag),
        Some(BucketScope::Player) | None => false,
    }
}
