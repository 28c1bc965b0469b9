//! Bookkeeping for visuals spawned through the prefab spawner.

use std::collections::BTreeMap;

use glam::Vec2;
use skill_core::{PrefabId, VisualHandle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub prefab: PrefabId,
    pub position: Vec2,
    pub rotation: f32,
    /// Simulation time at which the visual disappears, if scheduled.
    pub expires_at: Option<f32>,
}

#[derive(Debug, Default)]
pub(crate) struct Visuals {
    live: BTreeMap<VisualHandle, Visual>,
    next: u64,
    spawned_total: u64,
}

impl Visuals {
    pub(crate) fn spawn(&mut self, visual: Visual) -> VisualHandle {
        self.next += 1;
        self.spawned_total += 1;
        let handle = VisualHandle(self.next);
        self.live.insert(handle, visual);
        handle
    }

    pub(crate) fn expire_at(&mut self, handle: VisualHandle, at: f32) {
        if let Some(visual) = self.live.get_mut(&handle) {
            visual.expires_at = Some(at);
        }
    }

    pub(crate) fn move_to(&mut self, handle: VisualHandle, position: Vec2, rotation: f32) {
        if let Some(visual) = self.live.get_mut(&handle) {
            visual.position = position;
            visual.rotation = rotation;
        }
    }

    /// Drops every visual whose expiry has passed; returns how many.
    pub(crate) fn sweep(&mut self, now: f32) -> usize {
        let before = self.live.len();
        self.live
            .retain(|_, visual| visual.expires_at.is_none_or(|at| at > now));
        before - self.live.len()
    }

    pub(crate) fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.live.get(&handle)
    }

    pub(crate) fn live(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn spawned_total(&self) -> u64 {
        self.spawned_total
    }
}
