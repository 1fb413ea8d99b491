//! Sprite command system.
//!
//! Drains the [`SpriteBridge`] filled by animator callbacks and applies each
//! [`SpriteCmd`] to its entity. Commands for entities that no longer exist,
//! or lack the targeted component, are dropped.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::events::sprite::SpriteCmd;
use crate::resources::spritebridge::SpriteBridge;

/// Apply queued sprite moves and frame changes.
pub fn apply_sprite_commands(
    bridge: Res<SpriteBridge>,
    mut positions: Query<&mut MapPosition>,
    mut sprites: Query<&mut Sprite>,
) {
    for cmd in bridge.rx_cmd.try_iter() {
        match cmd {
            SpriteCmd::Move { entity, dx, dy } => {
                if let Ok(mut pos) = positions.get_mut(entity) {
                    pos.translate(dx, dy);
                } else {
                    debug!("Dropping move for {:?}: no MapPosition", entity);
                }
            }
            SpriteCmd::SetFrame { entity, frame } => {
                if let Ok(mut sprite) = sprites.get_mut(entity) {
                    sprite.frame = frame;
                } else {
                    debug!("Dropping frame {} for {:?}: no Sprite", frame, entity);
                }
            }
        }
    }
}
