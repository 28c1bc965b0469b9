//! Per-owner store of live projectiles and zones.

use crate::behavior::{LiveProjectile, Zone, ZoneKind};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, PrefabSpawner};
use crate::state::{AbilityId, EntityId};

/// Explicit per-owner effect slot, created with the owner.
#[derive(Clone, Debug, Default)]
pub struct ActiveEffects {
    projectiles: Vec<LiveProjectile>,
    zones: Vec<Zone>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_projectile(&mut self, projectile: LiveProjectile) {
        self.projectiles.push(projectile);
    }

    pub(crate) fn push_zone(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    /// The live aura `caster` holds for `ability`, if any.
    pub fn aura(&self, caster: EntityId, ability: AbilityId) -> Option<&Zone> {
        self.zones
            .iter()
            .find(|zone| zone.kind == ZoneKind::Aura && zone.caster == caster && zone.ability == ability)
    }

    pub(crate) fn aura_mut(&mut self, caster: EntityId, ability: AbilityId) -> Option<&mut Zone> {
        self.zones
            .iter_mut()
            .find(|zone| zone.kind == ZoneKind::Aura && zone.caster == caster && zone.ability == ability)
    }

    /// Advances every effect by `dt` and retires the expired ones.
    ///
    /// Returns the number of hits landed. Without a spatial oracle effects
    /// stay frozen until one is available.
    pub fn update(&mut self, dt: f32, env: CombatEnv<'_>, config: &CombatConfig) -> u32 {
        let Ok(spatial) = env.spatial() else {
            return 0;
        };
        let sink = env.effects().ok();
        let spawner = env.spawner().ok();

        let mut hits = 0;
        for projectile in &mut self.projectiles {
            hits += projectile.advance(dt, spatial, sink, spawner, config.projectile_hit_radius);
        }
        for zone in &mut self.zones {
            hits += zone.advance(dt, spatial, sink, spawner);
        }

        self.projectiles.retain(|projectile| {
            if projectile.is_expired() {
                projectile.retire(spawner);
            }
            !projectile.is_expired()
        });
        self.zones.retain(|zone| {
            if zone.is_expired() {
                tracing::trace!(ability = %zone.ability, kind = ?zone.kind, "zone expired");
                zone.retire(spawner);
            }
            !zone.is_expired()
        });
        hits
    }

    /// Removes every effect produced by `ability`, e.g. when it is unequipped.
    pub fn retire_ability(&mut self, ability: AbilityId, spawner: Option<&dyn PrefabSpawner>) {
        self.projectiles.retain(|projectile| {
            let keep = projectile.ability != ability;
            if !keep {
                projectile.retire(spawner);
            }
            keep
        });
        self.zones.retain(|zone| {
            let keep = zone.ability != ability;
            if !keep {
                zone.retire(spawner);
            }
            keep
        });
    }

    pub fn projectiles(&self) -> &[LiveProjectile] {
        &self.projectiles
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.zones.is_empty()
    }
}
