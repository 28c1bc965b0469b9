//! Per-owner count and multi-cast ledgers, plus unit layout helpers.
mod count;
mod multicast;
pub mod pattern;

pub use count::{CountLedgerEntry, CountModifier, DEFAULT_COUNT};
pub use multicast::{MultiCastLedger, MultiCastLedgerEntry, Replicator};
pub use pattern::SpreadPattern;
