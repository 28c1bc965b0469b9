//! Deterministic combat-skill core for an action roguelite.
//!
//! `skill-core` classifies abilities along delivery and trait tags, folds
//! stacking percentage bonuses into per-ability multipliers, auto-casts ready
//! abilities at the nearest hostile, and replicates casts through a
//! recursion-guarded multi-cast roll. Everything the host world provides
//! (spatial queries, damage, visuals, loadout, attributes, randomness) is
//! reached through the oracle traits in [`env`], and all per-actor state lives
//! in an explicit [`owner::SkillOwner`].
pub mod ability;
pub mod behavior;
pub mod config;
pub mod env;
pub mod error;
pub mod modifiers;
pub mod owner;
pub mod scheduler;
pub mod state;
pub mod stats;

pub use ability::{
    AbilityCatalog, AbilityDefinition, AbilityInstance, CatalogError, DeliveryTags, Multipliers,
    ScopedExtras, TraitTags,
};
pub use behavior::{
    ActiveEffects, Anchor, AreaParams, AuraParams, Behavior, BehaviorScope, CastOutcome,
    Continuation, DotParams, ExecutionContext, LiveProjectile, ProjectileParams, Resumed,
    TimerQueue, Zone, ZoneKind,
};
pub use config::CombatConfig;
pub use env::{
    CombatEnv, EffectSink, LoadoutOracle, OracleError, OwnerOracle, PcgRng, PrefabSpawner,
    RngOracle, SpatialOracle, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use modifiers::{
    CountLedgerEntry, CountModifier, MultiCastLedger, MultiCastLedgerEntry, Replicator,
    SpreadPattern,
};
pub use owner::{
    CastError, CastReport, EquippedAbility, LoadoutError, OwnerSnapshot, SkillOwner, UpdateReport,
};
pub use scheduler::{AutoCaster, CastRequest, CastSlot};
pub use state::{
    AbilityId, ElementTag, EntityId, Faction, FactionFilter, PassiveDescriptor, PassiveKind,
    PrefabId, VisualHandle,
};
pub use stats::{BucketScope, BucketStat, StatAggregator, StatBucket, StatLedger, StatLedgerEntry};

pub use glam::Vec2;
