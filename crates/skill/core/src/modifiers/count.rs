//! Extra projectile/area count per ability.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::ability::{AbilityCatalog, AbilityInstance};
use crate::config::CombatConfig;
use crate::modifiers::SpreadPattern;
use crate::state::AbilityId;

/// Count used for abilities missing from both the ledger and the fallback table.
pub const DEFAULT_COUNT: u32 = 1;

/// One ledger row: base seeded from the definition plus granted extras.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountLedgerEntry {
    pub ability: AbilityId,
    pub base: u32,
    pub additional: u32,
}

impl CountLedgerEntry {
    /// Base plus additional units, before scoped bonuses and the cap.
    pub fn total(&self) -> u32 {
        self.base.saturating_add(self.additional)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fallback {
    count: u32,
    pattern: SpreadPattern,
}

/// Per-owner count ledger plus the built-in fallback table.
///
/// The fallback table is taken from the catalog so that `get_total_count`
/// answers sensibly for abilities that were never seeded, including ones
/// acquired after count bonuses were granted. Delivery-scoped Count buckets
/// reach the modifier through [`Self::sync_scoped`], so the total it reports
/// is the number of units a cast actually spawns.
#[derive(Clone, Debug)]
pub struct CountModifier {
    fallback: BTreeMap<AbilityId, Fallback>,
    ledger: BTreeMap<AbilityId, CountLedgerEntry>,
    /// Extra units from delivery-scoped buckets, per equipped ability.
    scoped: BTreeMap<AbilityId, u32>,
    max_count: u32,
}

impl Default for CountModifier {
    fn default() -> Self {
        Self {
            fallback: BTreeMap::new(),
            ledger: BTreeMap::new(),
            scoped: BTreeMap::new(),
            max_count: CombatConfig::DEFAULT_MAX_SPAWN_COUNT,
        }
    }
}

impl CountModifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps every total at `max_count` units (at least one).
    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count.max(DEFAULT_COUNT);
        self
    }

    /// Cap applied by [`Self::get_total_count`].
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Seeds the fallback table from every definition's base count and pattern.
    pub fn from_catalog(catalog: &AbilityCatalog) -> Self {
        let fallback = catalog
            .iter()
            .map(|def| {
                (
                    def.id,
                    Fallback {
                        count: def.base_count,
                        pattern: def.pattern,
                    },
                )
            })
            .collect();
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Built-in count for `ability`, [`DEFAULT_COUNT`] when unknown.
    pub fn fallback_count(&self, ability: AbilityId) -> u32 {
        self.fallback
            .get(&ability)
            .map_or(DEFAULT_COUNT, |row| row.count)
    }

    /// Layout flag for `ability`; unknown abilities use a default fan.
    pub fn pattern_of(&self, ability: AbilityId) -> SpreadPattern {
        self.fallback
            .get(&ability)
            .map_or_else(SpreadPattern::default, |row| row.pattern)
    }

    /// Adds `delta` extra units, seeding the row from the fallback first.
    pub fn add_count(&mut self, ability: AbilityId, delta: u32) {
        let base = self.fallback_count(ability);
        let entry = self.ledger.entry(ability).or_insert(CountLedgerEntry {
            ability,
            base,
            additional: 0,
        });
        entry.additional = entry.additional.saturating_add(delta);
        tracing::debug!(%ability, delta, total = entry.total(), "count bonus added");
    }

    /// Replaces the scoped extras with those of the currently equipped
    /// instances. Called after every recompute pass and loadout change.
    pub fn sync_scoped(&mut self, instances: &[AbilityInstance]) {
        self.scoped = instances
            .iter()
            .filter(|instance| instance.extras.count > 0)
            .map(|instance| (instance.id(), instance.extras.count))
            .collect();
    }

    /// Scoped extra units for `ability`, 0 when not equipped.
    pub fn scoped_count(&self, ability: AbilityId) -> u32 {
        self.scoped.get(&ability).copied().unwrap_or(0)
    }

    /// Units one cast of `ability` produces: ledger row (or fallback) plus
    /// scoped extras, capped at [`Self::max_count`].
    pub fn get_total_count(&self, ability: AbilityId) -> u32 {
        self.ledger
            .get(&ability)
            .map_or_else(|| self.fallback_count(ability), CountLedgerEntry::total)
            .saturating_add(self.scoped_count(ability))
            .min(self.max_count)
    }

    /// Unit directions for `ability` around `base`, one per counted unit.
    pub fn get_directions(&self, ability: AbilityId, base: Vec2) -> Vec<Vec2> {
        self.pattern_of(ability)
            .directions(self.get_total_count(ability), base)
    }

    /// Reinstates a previously recorded row, replacing any existing one.
    pub fn restore_entry(&mut self, entry: CountLedgerEntry) {
        self.ledger.insert(entry.ability, entry);
    }

    /// Ledger row for `ability`, `None` until a count was added.
    pub fn entry(&self, ability: AbilityId) -> Option<&CountLedgerEntry> {
        self.ledger.get(&ability)
    }

    /// Ledger rows in ability order.
    pub fn entries(&self) -> impl Iterator<Item = &CountLedgerEntry> {
        self.ledger.values()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ability::definition::fixtures;

    fn modifier() -> CountModifier {
        let catalog = AbilityCatalog::new([fixtures::arrow(), fixtures::explosion()])
            .expect("fixtures are valid");
        CountModifier::from_catalog(&catalog)
    }

    #[test]
    fn unseeded_ability_uses_fallback() {
        let counts = modifier();
        assert_eq!(counts.get_total_count(AbilityId(1)), 1);
        assert_eq!(counts.get_total_count(AbilityId(999)), DEFAULT_COUNT);
        assert!(counts.entry(AbilityId(1)).is_none());
    }

    #[test]
    fn add_count_seeds_then_accumulates() {
        let mut counts = modifier();
        counts.add_count(AbilityId(999), 2);
        assert_eq!(counts.get_total_count(AbilityId(999)), DEFAULT_COUNT + 2);

        counts.add_count(AbilityId(1), 1);
        counts.add_count(AbilityId(1), 1);
        let entry = counts.entry(AbilityId(1)).copied().unwrap();
        assert_eq!(entry.base, 1);
        assert_eq!(entry.additional, 2);
        assert_eq!(counts.entries().count(), 2);
    }

    #[test]
    fn scoped_extras_feed_total_and_directions() {
        let catalog = AbilityCatalog::new([fixtures::arrow(), fixtures::explosion()])
            .expect("fixtures are valid");
        let mut counts = CountModifier::from_catalog(&catalog);
        let mut arrow = AbilityInstance::new(Arc::clone(catalog.get(AbilityId(1)).unwrap()));
        arrow.extras.count = 2;
        counts.sync_scoped(core::slice::from_ref(&arrow));

        assert_eq!(counts.get_total_count(AbilityId(1)), 3);
        assert_eq!(counts.get_directions(AbilityId(1), Vec2::X).len(), 3);
        assert!(counts.entry(AbilityId(1)).is_none());

        counts.sync_scoped(&[]);
        assert_eq!(counts.get_total_count(AbilityId(1)), 1);
    }

    #[test]
    fn total_is_capped() {
        let mut counts = modifier().with_max_count(8);
        counts.add_count(AbilityId(1), u32::MAX);
        assert_eq!(counts.get_total_count(AbilityId(1)), 8);
        assert_eq!(counts.get_directions(AbilityId(1), Vec2::X).len(), 8);
        assert_eq!(counts.entry(AbilityId(1)).unwrap().additional, u32::MAX);
    }

    #[test]
    fn directions_follow_ability_pattern() {
        let mut counts = modifier();
        counts.add_count(AbilityId(2), 3);
        let dirs = counts.get_directions(AbilityId(2), Vec2::X);
        assert_eq!(dirs.len(), 4);
        // Explosion uses a ring: opposite units point away from each other.
        assert!(dirs[0].distance(-dirs[2]) < 1e-5);
    }
}
