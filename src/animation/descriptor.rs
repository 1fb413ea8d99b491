//! Animation descriptors.
//!
//! An [`Animation`] describes *what* an animation does: how long to wait
//! between steps, how many times to repeat, and the strategy-specific payload.
//! Descriptors are validated on construction and never change afterwards, so
//! any number of animators can share one through an `Arc`.

use serde::{Deserialize, Serialize};

use crate::animation::Timestamp;
use crate::animation::error::AnimationError;

/// How many full cycles an animation runs before it completes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Complete after this many cycles. Always greater than zero.
    Times(u32),
    /// Never complete; only an explicit stop ends the animation.
    Forever,
}

/// Strategy payload carried by an [`Animation`].
///
/// Callbacks pattern-match on this instead of downcasting the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationKind {
    /// Apply `(dx, dy)` once per step.
    Moving {
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
    },
    /// Cycle the frame index through `start_frame..=end_frame`, optionally
    /// moving by `(dx, dy)` on every step but the first.
    FrameRange {
        start_frame: u32,
        end_frame: u32,
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
    },
}

/// Immutable parameter set describing one animation's timing and effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    id: String,
    delay: Timestamp,
    repeat: Repeat,
    kind: AnimationKind,
}

impl Animation {
    /// Build a descriptor, rejecting values that would break an animator.
    pub fn new(
        id: impl Into<String>,
        delay: Timestamp,
        repeat: Repeat,
        kind: AnimationKind,
    ) -> Result<Self, AnimationError> {
        let id = id.into();
        if delay == 0 {
            return Err(AnimationError::ZeroDelay { id });
        }
        if repeat == Repeat::Times(0) {
            return Err(AnimationError::ZeroRepeats { id });
        }
        if let AnimationKind::FrameRange {
            start_frame,
            end_frame,
            ..
        } = kind
        {
            if start_frame > end_frame {
                return Err(AnimationError::InvalidFrameRange {
                    id,
                    start: start_frame,
                    end: end_frame,
                });
            }
        }
        Ok(Self {
            id,
            delay,
            repeat,
            kind,
        })
    }

    /// Linear displacement descriptor.
    pub fn moving(
        id: impl Into<String>,
        dx: i32,
        dy: i32,
        delay: Timestamp,
        repeat: Repeat,
    ) -> Result<Self, AnimationError> {
        Self::new(id, delay, repeat, AnimationKind::Moving { dx, dy })
    }

    /// Frame-range cycling descriptor.
    pub fn frame_range(
        id: impl Into<String>,
        start_frame: u32,
        end_frame: u32,
        dx: i32,
        dy: i32,
        delay: Timestamp,
        repeat: Repeat,
    ) -> Result<Self, AnimationError> {
        Self::new(
            id,
            delay,
            repeat,
            AnimationKind::FrameRange {
                start_frame,
                end_frame,
                dx,
                dy,
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Ticks between two successive steps. Never zero.
    pub fn delay(&self) -> Timestamp {
        self.delay
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn is_forever(&self) -> bool {
        self.repeat == Repeat::Forever
    }

    /// Number of cycles before completion, `None` for forever animations.
    pub fn repeat_count(&self) -> Option<u32> {
        match self.repeat {
            Repeat::Times(n) => Some(n),
            Repeat::Forever => None,
        }
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    /// Per-step displacement. Both strategies carry one.
    pub fn displacement(&self) -> (i32, i32) {
        match self.kind {
            AnimationKind::Moving { dx, dy } | AnimationKind::FrameRange { dx, dy, .. } => {
                (dx, dy)
            }
        }
    }

    /// Inclusive `(start_frame, end_frame)` for frame-range descriptors.
    pub fn frames(&self) -> Option<(u32, u32)> {
        match self.kind {
            AnimationKind::FrameRange {
                start_frame,
                end_frame,
                ..
            } => Some((start_frame, end_frame)),
            AnimationKind::Moving { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_descriptor_accessors() {
        let anim = Animation::moving("walk", 2, -1, 10, Repeat::Times(3)).unwrap();
        assert_eq!(anim.id(), "walk");
        assert_eq!(anim.delay(), 10);
        assert_eq!(anim.repeat_count(), Some(3));
        assert!(!anim.is_forever());
        assert_eq!(anim.displacement(), (2, -1));
        assert_eq!(anim.frames(), None);
    }

    #[test]
    fn test_frame_range_descriptor_accessors() {
        let anim = Animation::frame_range("coin", 4, 7, 0, 0, 5, Repeat::Forever).unwrap();
        assert!(anim.is_forever());
        assert_eq!(anim.repeat_count(), None);
        assert_eq!(anim.frames(), Some((4, 7)));
    }

    #[test]
    fn test_single_frame_range_is_valid() {
        assert!(Animation::frame_range("blink", 2, 2, 0, 0, 1, Repeat::Times(1)).is_ok());
    }

    #[test]
    fn test_zero_delay_rejected() {
        let err = Animation::moving("walk", 1, 0, 0, Repeat::Times(1)).unwrap_err();
        assert_eq!(
            err,
            AnimationError::ZeroDelay {
                id: "walk".to_string()
            }
        );
    }

    #[test]
    fn test_inverted_frame_range_rejected() {
        let err = Animation::frame_range("run", 5, 2, 0, 0, 10, Repeat::Forever).unwrap_err();
        assert_eq!(
            err,
            AnimationError::InvalidFrameRange {
                id: "run".to_string(),
                start: 5,
                end: 2
            }
        );
    }

    #[test]
    fn test_zero_repeats_rejected() {
        let err = Animation::moving("walk", 1, 0, 10, Repeat::Times(0)).unwrap_err();
        assert!(matches!(err, AnimationError::ZeroRepeats { .. }));
    }

    #[test]
    fn test_error_message_names_animation() {
        let err = Animation::moving("jump", 0, 1, 0, Repeat::Forever).unwrap_err();
        assert_eq!(
            err.to_string(),
            "animation 'jump': delay must be greater than zero"
        );
    }
}
