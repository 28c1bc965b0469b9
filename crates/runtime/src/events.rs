//! Record of everything observable that happened during a run.

use skill_core::{EntityId, Faction, PassiveKind};

/// What dealt a point of damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCause {
    /// A projectile, strike or zone tick from a skill owner.
    Ability,
    /// Burn or poison ticking on the victim.
    Status,
    /// A chasing enemy touching its target.
    Contact,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Damaged {
        at: f32,
        target: EntityId,
        faction: Faction,
        amount: f32,
        cause: DamageCause,
    },
    StatusApplied {
        at: f32,
        target: EntityId,
        kind: PassiveKind,
    },
    Killed {
        at: f32,
        entity: EntityId,
        name: String,
        faction: Faction,
    },
    WaveSpawned {
        at: f32,
        name: String,
        count: u32,
    },
    BonusGranted {
        at: f32,
        description: String,
    },
    GrantRefused {
        at: f32,
        description: String,
        reason: String,
    },
}

impl CombatEvent {
    pub fn at(&self) -> f32 {
        match self {
            Self::Damaged { at, .. }
            | Self::StatusApplied { at, .. }
            | Self::Killed { at, .. }
            | Self::WaveSpawned { at, .. }
            | Self::BonusGranted { at, .. }
            | Self::GrantRefused { at, .. } => *at,
        }
    }
}

/// Append-only event history.
#[derive(Clone, Debug, Default)]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = CombatEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Damage dealt to members of `faction` by `cause`.
    pub fn damage_to(&self, faction: Faction, cause: DamageCause) -> f32 {
        self.events
            .iter()
            .filter_map(|event| match event {
                CombatEvent::Damaged {
                    faction: f,
                    amount,
                    cause: c,
                    ..
                } if *f == faction && *c == cause => Some(*amount),
                _ => None,
            })
            .sum()
    }

    pub fn kills(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, CombatEvent::Killed { .. }))
    }
}
