//! Stacking percentage bonuses and their application to ability instances.
mod aggregator;
mod bucket;
mod ledger;

pub use aggregator::StatAggregator;
pub use bucket::{BucketScope, BucketStat, StatBucket, applies_to};
pub use ledger::{StatLedger, StatLedgerEntry};
