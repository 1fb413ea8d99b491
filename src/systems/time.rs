//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame.
use bevy_ecs::prelude::*;

use crate::animation::Timestamp;
use crate::resources::worldtime::WorldTime;

/// Advance the world clock by `dt` ticks.
///
/// The clock keeps running while paused; the animation system is what
/// stands still.
pub fn update_world_time(world: &mut World, dt: Timestamp) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.now += dt;
    wt.delta = dt;
    wt.frame_count += 1;
}
