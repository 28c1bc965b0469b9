//! Headless scenario format.
//!
//! A scenario describes one fight: the player's loadout and attributes, the
//! enemy waves placed around them, and bonuses granted at fixed times. Ability
//! references are authored by name and resolved by the runtime against the
//! loaded catalog.

use skill_core::{ElementTag, PassiveDescriptor, StatBucket};

fn default_duration() -> f32 {
    30.0
}

fn default_timestep() -> f32 {
    0.05
}

fn default_health() -> f32 {
    100.0
}

fn default_player_speed() -> f32 {
    4.0
}

fn default_attack_range() -> f32 {
    10.0
}

fn default_wave_count() -> u32 {
    1
}

fn default_enemy_speed() -> f32 {
    1.5
}

fn default_spacing() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Simulated seconds.
    #[cfg_attr(feature = "serde", serde(default = "default_duration"))]
    pub duration: f32,
    /// Fixed step in seconds.
    #[cfg_attr(feature = "serde", serde(default = "default_timestep"))]
    pub timestep: f32,
    /// Overrides the config seed when set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    pub player: PlayerSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<EnemyWave>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Vec<TimedBonus>,
}

/// Player attributes and starting loadout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSpec {
    #[cfg_attr(feature = "serde", serde(default = "default_health"))]
    pub health: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_player_speed"))]
    pub speed: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_power: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_attack_range"))]
    pub attack_range: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: ElementTag,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveDescriptor>,
    /// Ability names, equipped in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
}

/// A group of identical enemies placed in a row centred on `position`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyWave {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_wave_count"))]
    pub count: u32,
    pub position: [f32; 2],
    /// Distance between neighbours along the y axis.
    #[cfg_attr(feature = "serde", serde(default = "default_spacing"))]
    pub spacing: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_health"))]
    pub health: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_enemy_speed"))]
    pub speed: f32,
    /// Damage per second dealt while touching a hostile.
    #[cfg_attr(feature = "serde", serde(default))]
    pub contact_damage: f32,
    /// Seconds into the fight before the wave appears.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawn_at: f32,
}

/// A bonus granted to the player at a fixed simulation time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedBonus {
    pub at: f32,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub grant: BonusGrant,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BonusGrant {
    /// Percentage bonus into a stat bucket.
    Stat { bucket: StatBucket, percent: f32 },
    /// Extra projectiles or anchors for one ability.
    Count { ability: String, amount: u32 },
    /// Multi-cast chance in percentage points for one ability.
    MultiCast { ability: String, percent: f32 },
    /// One level on an equipped ability.
    LevelUp { ability: String },
    /// Equip another ability mid-fight.
    Equip { ability: String },
}

impl BonusGrant {
    /// Ability name the grant refers to, if any.
    pub fn ability(&self) -> Option<&str> {
        match self {
            Self::Stat { .. } => None,
            Self::Count { ability, .. }
            | Self::MultiCast { ability, .. }
            | Self::LevelUp { ability }
            | Self::Equip { ability } => Some(ability),
        }
    }
}

impl Scenario {
    /// Every ability name the scenario mentions, loadout first.
    pub fn referenced_abilities(&self) -> impl Iterator<Item = &str> {
        self.player
            .abilities
            .iter()
            .map(String::as_str)
            .chain(self.bonuses.iter().filter_map(|bonus| bonus.grant.ability()))
    }

    /// Total enemies across all waves.
    pub fn enemy_count(&self) -> u32 {
        self.enemies.iter().map(|wave| wave.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario {
            name: "test".into(),
            description: String::new(),
            duration: 10.0,
            timestep: 0.1,
            seed: None,
            player: PlayerSpec {
                health: 100.0,
                speed: 4.0,
                attack_power: 0.0,
                attack_range: 10.0,
                element: ElementTag::Neutral,
                passive: None,
                abilities: vec!["Arrow".into()],
            },
            enemies: vec![
                EnemyWave {
                    name: "goblin".into(),
                    count: 3,
                    position: [5.0, 0.0],
                    spacing: 1.0,
                    health: 20.0,
                    speed: 1.0,
                    contact_damage: 0.0,
                    spawn_at: 0.0,
                },
                EnemyWave {
                    name: "ogre".into(),
                    count: 1,
                    position: [-5.0, 0.0],
                    spacing: 1.0,
                    health: 80.0,
                    speed: 0.5,
                    contact_damage: 5.0,
                    spawn_at: 4.0,
                },
            ],
            bonuses: vec![
                TimedBonus {
                    at: 1.0,
                    grant: BonusGrant::Stat {
                        bucket: StatBucket::AllAbilitiesDamage,
                        percent: 10.0,
                    },
                },
                TimedBonus {
                    at: 2.0,
                    grant: BonusGrant::Equip {
                        ability: "Fireball".into(),
                    },
                },
            ],
        }
    }

    #[test]
    fn referenced_abilities_lists_loadout_then_grants() {
        let scenario = scenario();
        let names: Vec<_> = scenario.referenced_abilities().collect();
        assert_eq!(names, ["Arrow", "Fireball"]);
    }

    #[test]
    fn enemy_count_sums_waves() {
        assert_eq!(scenario().enemy_count(), 4);
    }
}
