//! Channel between animator callbacks and the ECS world.
//!
//! Animator callbacks run inside
//! [`AnimatorManager::progress`](crate::animation::AnimatorManager::progress)
//! and have no access to the world. They push [`SpriteCmd`]s through the
//! [`SpriteBridge`] instead, and
//! [`apply_sprite_commands`](crate::systems::sprite::apply_sprite_commands)
//! applies them to the entities later in the same frame.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::sprite::SpriteCmd;

#[derive(Resource)]
pub struct SpriteBridge {
    /// Sender cloned into animator callbacks.
    pub tx_cmd: Sender<SpriteCmd>,
    /// Drained once per frame by the sprite system.
    pub rx_cmd: Receiver<SpriteCmd>,
}

impl Default for SpriteBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteBridge {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<SpriteCmd>();
        Self { tx_cmd, rx_cmd }
    }

    pub fn sender(&self) -> Sender<SpriteCmd> {
        self.tx_cmd.clone()
    }
}
