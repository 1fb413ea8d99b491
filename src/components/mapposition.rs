use bevy_ecs::prelude::Component;

/// World-space position of an entity, in pixels.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Shift by a whole-pixel displacement.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx as f32;
        self.y += dy as f32;
    }
}
