//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – advance the animator registry to the current tick
//! - [`sprite`] – apply sprite commands queued by animator callbacks
//! - [`time`] – update simulation time

pub mod animation;
pub mod sprite;
pub mod time;
