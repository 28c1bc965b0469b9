//! Scheduled continuations for delayed multi-cast replicas and staggered anchors.
//!
//! Nothing here blocks: continuations sit in the queue until the owner's
//! update reaches their due time. A continuation whose caster no longer has a
//! position when it fires is dropped by the owner.

use std::sync::Arc;

use glam::Vec2;

use crate::ability::AbilityDefinition;
use crate::behavior::ExecutionContext;
use crate::state::EntityId;

/// Deferred piece of a cast.
#[derive(Clone, Debug)]
pub enum Continuation {
    /// Re-invoke the behavior with a replica context.
    Replicate {
        definition: Arc<AbilityDefinition>,
        context: ExecutionContext,
    },
    /// Strike one additional area anchor.
    AreaStrike {
        definition: Arc<AbilityDefinition>,
        context: ExecutionContext,
        anchor: Vec2,
    },
}

impl Continuation {
    pub fn caster(&self) -> EntityId {
        self.context().caster
    }

    pub fn context(&self) -> &ExecutionContext {
        match self {
            Self::Replicate { context, .. } | Self::AreaStrike { context, .. } => context,
        }
    }

    /// Stable label used in trace output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Replicate { .. } => "replicate",
            Self::AreaStrike { .. } => "area_strike",
        }
    }
}

#[derive(Clone, Debug)]
struct Timer {
    due: f32,
    seq: u64,
    continuation: Continuation,
}

/// Pending continuations ordered by due time, then scheduling order.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `continuation` at absolute time `due`. Ties fire in insertion order.
    pub fn schedule(&mut self, due: f32, continuation: Continuation) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due,
            seq,
            continuation,
        });
    }

    /// Removes and returns every continuation due at or before `now`, in
    /// `(due, seq)` order.
    pub fn drain_due(&mut self, now: f32) -> Vec<Continuation> {
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|timer| timer.due <= now);
        self.timers = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|timer| timer.continuation).collect()
    }

    /// Earliest due time among pending continuations.
    pub fn next_due(&self) -> Option<f32> {
        self.timers
            .iter()
            .map(|timer| timer.due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Drops every continuation scheduled by `caster`.
    pub fn abandon_caster(&mut self, caster: EntityId) {
        self.timers
            .retain(|timer| timer.continuation.caster() != caster);
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
