//! Totals accumulated over a run.

use skill_core::SkillOwner;

/// Per-ability state at the end of a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AbilitySummary {
    pub name: String,
    pub level: u8,
    pub damage_multiplier: f32,
    /// Resolved cooldown in seconds, floor applied.
    pub cooldown: f32,
    pub count: u32,
    pub multicast_chance: f32,
}

impl AbilitySummary {
    pub(crate) fn collect(owner: &SkillOwner) -> Vec<Self> {
        owner
            .instances()
            .iter()
            .map(|instance| Self {
                name: instance.definition().name.clone(),
                level: instance.level(),
                damage_multiplier: instance.multipliers.damage,
                cooldown: instance.effective_cooldown(owner.config()),
                count: owner.total_count(instance.id()),
                multicast_chance: owner.multicast_chance(instance.id()),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SimulationReport {
    pub scenario: String,
    /// Simulated seconds.
    pub elapsed: f32,
    pub steps: u64,
    pub casts: u32,
    pub replicas_scheduled: u32,
    pub replicas_fired: u32,
    pub replicas_dropped: u32,
    pub hits: u32,
    /// Ability damage dealt to enemies.
    pub damage_dealt: f32,
    /// Burn and poison damage dealt to enemies.
    pub status_damage: f32,
    /// Damage the player took from every cause.
    pub damage_taken: f32,
    pub kills: u32,
    pub enemies_remaining: usize,
    pub bonuses_granted: u32,
    pub player_alive: bool,
    pub player_health: f32,
    pub visuals_spawned: u64,
    pub abilities: Vec<AbilitySummary>,
}
