//! Animator Engine library.
//!
//! The [`animation`] module is the scheduling core: animation descriptors,
//! timed animators and the registry that advances them once per tick. The
//! remaining modules host that core in a small ECS world (components,
//! resources, systems and events) and wire it to sprites in [`game`].

pub mod animation;
pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
