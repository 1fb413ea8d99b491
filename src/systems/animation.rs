//! Animation system.
//!
//! [`progress_animators`] is the per-frame entry point into the animation
//! core. It reads [`WorldTime`] and advances the shared
//! [`AnimatorManager`], which fires animator callbacks; those callbacks queue
//! [`SpriteCmd`](crate::events::sprite::SpriteCmd)s that
//! [`apply_sprite_commands`](crate::systems::sprite::apply_sprite_commands)
//! applies afterwards.
//!
//! # Related
//!
//! - [`crate::animation::AnimatorManager`] – running/suspended registry
//! - [`crate::resources::worldtime::WorldTime`] – clock and pause bookkeeping
//! - [`crate::events::switchpause`] – pause/resume toggle

use bevy_ecs::prelude::*;
use log::debug;

use crate::animation::AnimatorManager;
use crate::resources::worldtime::WorldTime;

/// Advance every running animator to the current tick.
///
/// Contract
/// - Does nothing while [`WorldTime`] is paused.
/// - Applies any pending pause span through [`AnimatorManager::time_shift`]
///   before progressing, so resumed animators continue where they stopped.
/// - Requires [`AnimatorManager`] as a non-send resource.
pub fn progress_animators(mut time: ResMut<WorldTime>, manager: NonSend<AnimatorManager>) {
    if time.is_paused() {
        return;
    }
    let shift = time.take_pending_shift();
    if shift > 0 {
        debug!("Shifting animators by {} paused ticks", shift);
        manager.time_shift(shift);
    }
    manager.progress(time.now);
}
