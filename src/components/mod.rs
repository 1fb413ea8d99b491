//! ECS components for entities.
//!
//! Submodules overview:
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`sprite`] – spritesheet reference and the frame currently shown

pub mod mapposition;
pub mod sprite;
