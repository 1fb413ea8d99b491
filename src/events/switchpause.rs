//! Event and observer to pause and resume the simulation clock.
//!
//! Emitting a [`SwitchPauseEvent`] flips [`WorldTime`] between paused and
//! running. While paused,
//! [`progress_animators`](crate::systems::animation::progress_animators)
//! does nothing; on resume the paused span is shifted out of every animator.
use crate::resources::worldtime::WorldTime;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Event used to toggle the pause state of [`WorldTime`].
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchPauseEvent {}

/// Observer that pauses or resumes [`WorldTime`].
pub fn switch_pause_observer(_trigger: On<SwitchPauseEvent>, mut time: ResMut<WorldTime>) {
    if time.is_paused() {
        time.resume();
        info!(
            "Resumed at tick {} ({} ticks pending shift)",
            time.now, time.pending_shift
        );
    } else {
        time.pause();
        info!("Paused at tick {}", time.now);
    }
}
