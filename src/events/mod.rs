//! Event types and observers used by the engine.
//!
//! Submodules:
//! - [`sprite`] – sprite changes queued by animator callbacks
//! - [`switchpause`] – pause and resume the simulation clock
pub mod sprite;
pub mod switchpause;
