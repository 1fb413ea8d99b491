//! Simulation clock resource.
//!
//! [`WorldTime`] holds the tick count every animator is measured against.
//! The game loop advances it once per frame through
//! [`update_world_time`](crate::systems::time::update_world_time).
//!
//! Pausing does not stop the clock. Instead the paused span is accumulated
//! and handed to the animation system on resume, which shifts every animator
//! by that amount so no skipped steps are replayed.

use bevy_ecs::prelude::Resource;

use crate::animation::Timestamp;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Ticks since the world started.
    pub now: Timestamp,
    /// Ticks added by the last frame.
    pub delta: Timestamp,
    /// Frames processed so far.
    pub frame_count: u64,
    /// Set while paused, holding the tick the pause began at.
    pub paused_since: Option<Timestamp>,
    /// Paused ticks not yet applied to the animators.
    pub pending_shift: Timestamp,
}

impl WorldTime {
    pub fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }

    /// Start a pause. Ignored when already paused.
    pub fn pause(&mut self) {
        if self.paused_since.is_none() {
            self.paused_since = Some(self.now);
        }
    }

    /// End a pause, queueing its length as a pending shift.
    pub fn resume(&mut self) {
        if let Some(since) = self.paused_since.take() {
            self.pending_shift += self.now.saturating_sub(since);
        }
    }

    /// Hand over the accumulated shift, leaving zero behind.
    pub fn take_pending_shift(&mut self) -> Timestamp {
        std::mem::take(&mut self.pending_shift)
    }
}
