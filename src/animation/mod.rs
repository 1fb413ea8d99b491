//! Animation scheduling core.
//!
//! This module holds the part of the engine that decides *when* an animated
//! entity takes its next discrete step. It knows nothing about sprites,
//! rendering or the ECS world; consumers observe progress through the
//! callbacks stored on each [`Animator`].
//!
//! Submodules overview:
//! - [`descriptor`] – immutable animation descriptors (delay, repeat policy, strategy payload)
//! - [`animator`] – timed state machine that steps through one descriptor
//! - [`manager`] – registry of running/suspended animators advanced once per tick
//! - [`error`] – validation errors raised while building descriptors
//!
//! # Tick Flow
//!
//! 1. The game loop advances its clock and calls [`AnimatorManager::progress`]
//! 2. The manager snapshots its running set and progresses each animator
//! 3. Each animator emits one `on_action` per due step and `on_finish` on completion
//! 4. Callbacks may start, stop, suspend or resume any animator; membership
//!    changes are seen by the manager on the next tick

pub mod animator;
pub mod descriptor;
pub mod error;
pub mod manager;

pub use animator::{Animator, AnimatorId, AnimatorKind, AnimatorState};
pub use descriptor::{Animation, AnimationKind, Repeat};
pub use error::AnimationError;
pub use manager::AnimatorManager;

/// Monotonic tick count supplied by the game loop's clock.
pub type Timestamp = u64;
