//! Append-only record of granted percentage bonuses.

use crate::stats::StatBucket;

/// One granted bonus: `percent` points recorded under `bucket`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatLedgerEntry {
    pub bucket: StatBucket,
    pub percent: f32,
}

/// Bonuses in grant order. Entries are never removed during a session.
#[derive(Clone, Debug, Default)]
pub struct StatLedger {
    entries: Vec<StatLedgerEntry>,
}

impl StatLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bonus. Repeated buckets stack; nothing is merged.
    pub fn push(&mut self, bucket: StatBucket, percent: f32) {
        self.entries.push(StatLedgerEntry { bucket, percent });
    }

    /// Sum of every entry recorded under `bucket`.
    pub fn total(&self, bucket: StatBucket) -> f32 {
        self.entries
            .iter()
            .filter(|entry| entry.bucket == bucket)
            .map(|entry| entry.percent)
            .sum()
    }

    /// Every entry in grant order, the order recompute replays them in.
    pub fn entries(&self) -> &[StatLedgerEntry] {
        &self.entries
    }

    /// Number of contributions recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<StatLedgerEntry> for StatLedger {
    fn from_iter<I: IntoIterator<Item = StatLedgerEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_additive_per_bucket() {
        let mut ledger = StatLedger::new();
        ledger.push(StatBucket::AreaDamage, 10.0);
        ledger.push(StatBucket::AreaDamage, 15.0);
        ledger.push(StatBucket::DotDamage, 5.0);
        assert_eq!(ledger.total(StatBucket::AreaDamage), 25.0);
        assert_eq!(ledger.total(StatBucket::ProjectileDamage), 0.0);
        assert_eq!(ledger.len(), 3);
    }
}
