/// Allegiance used to filter spatial queries.
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
pub enum Faction {
    /// The player and player-owned summons.
    #[default]
    Player,
    /// Anything that fights the player.
    Enemy,
    /// Never targeted and never targets.
    Neutral,
}

impl Faction {
    /// Check if this faction is hostile to another faction.
    pub fn is_hostile_to(&self, other: &Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Player, Faction::Enemy) | (Faction::Enemy, Faction::Player)
        )
    }
}

/// Faction predicate passed to spatial queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactionFilter {
    /// Entities hostile to the given faction.
    HostileTo(Faction),
    /// Entities of the same faction.
    AlliedWith(Faction),
    /// Every entity.
    Any,
}

impl FactionFilter {
    /// Whether `faction` passes this filter.
    pub fn matches(&self, faction: Faction) -> bool {
        match self {
            FactionFilter::HostileTo(own) => own.is_hostile_to(&faction),
            FactionFilter::AlliedWith(own) => *own == faction,
            FactionFilter::Any => true,
        }
    }
}
