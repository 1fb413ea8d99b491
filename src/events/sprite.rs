use bevy_ecs::prelude::Entity;

/// Sprite changes requested by animator callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteCmd {
    /// Displace the entity's [`MapPosition`](crate::components::mapposition::MapPosition).
    Move { entity: Entity, dx: i32, dy: i32 },
    /// Show another frame of the entity's [`Sprite`](crate::components::sprite::Sprite).
    SetFrame { entity: Entity, frame: u32 },
}
