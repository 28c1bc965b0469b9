//! Owner state a persistence layer would need to restore a session.

use crate::modifiers::{CountLedgerEntry, MultiCastLedgerEntry};
use crate::state::{AbilityId, EntityId};
use crate::stats::StatLedgerEntry;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedAbility {
    pub ability: AbilityId,
    pub level: u8,
    pub last_cast: Option<f32>,
}

/// Ledgers plus per-instance level and last cast, in slot order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerSnapshot {
    pub owner: EntityId,
    pub equipped: Vec<EquippedAbility>,
    pub stat_ledger: Vec<StatLedgerEntry>,
    pub count_ledger: Vec<CountLedgerEntry>,
    pub multicast_ledger: Vec<MultiCastLedgerEntry>,
}

impl OwnerSnapshot {
    pub fn equipped_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.equipped.iter().map(|entry| entry.ability)
    }
}
