use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key, its size in world units and the
/// frame currently shown from a horizontal spritesheet.
/// Drawing is left to the host; the engine only keeps the frame index current.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub frame: u32,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            frame: 0,
        }
    }

    /// Offset of the current frame inside the spritesheet.
    pub fn frame_offset(&self) -> (f32, f32) {
        (self.frame as f32 * self.width, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_offset_walks_the_sheet() {
        let mut sprite = Sprite::new("mario", 16.0, 32.0);
        assert_eq!(sprite.frame_offset(), (0.0, 0.0));
        sprite.frame = 3;
        assert_eq!(sprite.frame_offset(), (48.0, 0.0));
    }
}
