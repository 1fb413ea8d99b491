//! Error types for animation descriptors.

use thiserror::Error;

/// Reasons an [`Animation`](crate::animation::Animation) descriptor is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A zero delay would make every call to `progress` loop forever.
    #[error("animation '{id}': delay must be greater than zero")]
    ZeroDelay { id: String },

    /// Frame-range descriptors need `start_frame <= end_frame`.
    #[error("animation '{id}': start frame {start} is after end frame {end}")]
    InvalidFrameRange { id: String, start: u32, end: u32 },

    /// A finite animation must repeat at least once.
    #[error("animation '{id}': repeat count must be greater than zero")]
    ZeroRepeats { id: String },
}
