//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – validated animation descriptors shared across entities
//! - `gameconfig` – INI-backed settings for the clock and demo
//! - `sceneanimators` – owner of the animators attached to scene entities (non-send)
//! - `spritebridge` – channel carrying sprite commands out of animator callbacks
//! - `worldtime` – simulation tick count and pause bookkeeping
pub mod animationstore;
pub mod gameconfig;
pub mod sceneanimators;
pub mod spritebridge;
pub mod worldtime;
