//! Per-entity status effect slot.
//!
//! Every body is created with an empty slot. A new passive replaces whatever
//! occupies it; the slot never holds more than one effect.

use skill_core::{PassiveDescriptor, PassiveKind};

/// The effect currently occupying a [`StatusSlot`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveStatus {
    pub kind: PassiveKind,
    /// Damage per second for burn and poison, movement factor for slow.
    pub magnitude: f32,
    pub remaining: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusSlot {
    active: Option<ActiveStatus>,
}

impl StatusSlot {
    /// Installs `passive`, replacing the current effect.
    ///
    /// Burn and poison convert their magnitude into damage per second using
    /// the hit that applied them.
    pub fn apply(&mut self, passive: &PassiveDescriptor, source_damage: f32) {
        if passive.is_none() {
            return;
        }
        let magnitude = match passive.kind {
            PassiveKind::Burn | PassiveKind::Poison => passive.magnitude * source_damage,
            PassiveKind::Slow => passive.magnitude.clamp(0.0, 1.0),
            PassiveKind::Freeze | PassiveKind::Stun | PassiveKind::None => 0.0,
        };
        self.active = Some(ActiveStatus {
            kind: passive.kind,
            magnitude,
            remaining: passive.duration,
        });
    }

    /// Advances the effect by `dt` and returns damage it dealt.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let Some(active) = self.active.as_mut() else {
            return 0.0;
        };
        let step = dt.min(active.remaining);
        let damage = match active.kind {
            PassiveKind::Burn | PassiveKind::Poison => active.magnitude * step,
            _ => 0.0,
        };
        active.remaining -= dt;
        if active.remaining <= 0.0 {
            self.active = None;
        }
        damage
    }

    /// Multiplier on movement speed.
    pub fn movement_factor(&self) -> f32 {
        match self.active {
            Some(ActiveStatus {
                kind: PassiveKind::Slow,
                magnitude,
                ..
            }) => magnitude,
            Some(ActiveStatus {
                kind: PassiveKind::Freeze | PassiveKind::Stun,
                ..
            }) => 0.0,
            _ => 1.0,
        }
    }

    /// Stunned entities neither move nor deal contact damage.
    pub fn is_stunned(&self) -> bool {
        self.kind() == Some(PassiveKind::Stun)
    }

    pub fn kind(&self) -> Option<PassiveKind> {
        self.active.map(|active| active.kind)
    }

    pub fn active(&self) -> Option<&ActiveStatus> {
        self.active.as_ref()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burn_deals_its_fraction_of_the_source_hit_per_second() {
        let mut slot = StatusSlot::default();
        slot.apply(&PassiveDescriptor::new(PassiveKind::Burn, 0.5, 2.0), 10.0);

        let mut total = 0.0;
        for _ in 0..4 {
            total += slot.tick(0.5);
        }
        assert!((total - 10.0).abs() < 1e-5);
        assert_eq!(slot.kind(), None);
    }

    #[test]
    fn newer_passive_replaces_the_old_one() {
        let mut slot = StatusSlot::default();
        slot.apply(&PassiveDescriptor::new(PassiveKind::Slow, 0.5, 3.0), 1.0);
        assert_eq!(slot.movement_factor(), 0.5);

        slot.apply(&PassiveDescriptor::new(PassiveKind::Stun, 0.0, 1.0), 1.0);
        assert!(slot.is_stunned());
        assert_eq!(slot.movement_factor(), 0.0);
        assert_eq!(slot.tick(1.0), 0.0);
        assert_eq!(slot.movement_factor(), 1.0);
    }

    #[test]
    fn empty_passive_leaves_the_slot_alone() {
        let mut slot = StatusSlot::default();
        slot.apply(&PassiveDescriptor::new(PassiveKind::Freeze, 0.0, 1.0), 1.0);
        slot.apply(&PassiveDescriptor::NONE, 5.0);
        assert_eq!(slot.kind(), Some(PassiveKind::Freeze));
    }
}
