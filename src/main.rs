//! Animator Engine main entry point.
//!
//! Runs the demo scene headless: a fixed-step clock drives the animation
//! core for a number of frames, and the resulting sprite states are logged.
//! Built on:
//! - **bevy_ecs** for the entity-component-system host
//! - **configparser** for `config.ini`
//! - **serde_json** for animation descriptor files
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults on failure) and apply CLI overrides
//! 2. Load the animation descriptors and build the ECS world
//! 3. Spawn the demo scene ([`game::setup`])
//! 4. For each frame: advance [`WorldTime`], progress animators, apply sprite commands
//! 5. Log the final sprite positions and frames
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 300 --pause-at 100 --pause-for 50
//! ```

use animatorengine::animation::{AnimatorManager, Timestamp};
use animatorengine::components::mapposition::MapPosition;
use animatorengine::components::sprite::Sprite;
use animatorengine::events::switchpause::{SwitchPauseEvent, switch_pause_observer};
use animatorengine::game;
use animatorengine::resources::animationstore::AnimationStore;
use animatorengine::resources::gameconfig::GameConfig;
use animatorengine::resources::sceneanimators::SceneAnimators;
use animatorengine::resources::spritebridge::SpriteBridge;
use animatorengine::resources::worldtime::WorldTime;
use animatorengine::systems::animation::progress_animators;
use animatorengine::systems::sprite::apply_sprite_commands;
use animatorengine::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Animator Engine headless demo
#[derive(Parser)]
#[command(version, about = "Drives sprite animators against a fixed-step clock")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Animation descriptor file, overriding the config value.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Number of frames to simulate, overriding the config value.
    #[arg(long)]
    frames: Option<u32>,

    /// Ticks per frame, overriding the config value.
    #[arg(long, value_name = "TICKS")]
    step: Option<Timestamp>,

    /// Frame at which to pause the animations.
    #[arg(long, value_name = "FRAME")]
    pause_at: Option<u32>,

    /// How many frames the pause lasts.
    #[arg(long, value_name = "FRAMES", default_value_t = 60)]
    pause_for: u32,
}

/// Frame at which a pause started at `pause_at` ends. A window running past
/// the last representable frame never ends.
fn resume_frame(pause_at: Option<u32>, pause_for: u32) -> Option<u32> {
    pause_at.and_then(|frame| frame.checked_add(pause_for))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(path) = cli.animations {
        config.animations_path = path;
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(step) = cli.step.filter(|s| *s > 0) {
        config.step = step;
    }

    let store = match AnimationStore::load_from_file(&config.animations_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!(
                "Failed to load animations from {}: {}",
                config.animations_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    log::info!("Hello, world! This is the Animator Engine!");
    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(SpriteBridge::new());
    world.insert_resource(store);
    world.insert_resource(config.clone());
    world.insert_non_send_resource(AnimatorManager::new());
    world.insert_non_send_resource(SceneAnimators::new());

    world.spawn(Observer::new(switch_pause_observer));
    world.flush();

    if let Err(e) = game::setup(&mut world) {
        log::error!("Scene setup failed: {}", e);
        std::process::exit(1);
    }

    let mut update = Schedule::default();
    update.add_systems(progress_animators);
    update.add_systems(apply_sprite_commands.after(progress_animators));

    // --------------- Main loop ---------------
    let resume_at = resume_frame(cli.pause_at, cli.pause_for);
    for frame in 0..config.frames {
        if cli.pause_at == Some(frame) || resume_at == Some(frame) {
            world.trigger(SwitchPauseEvent {});
        }
        update_world_time(&mut world, config.step);
        update.run(&mut world);
        world.clear_trackers();
    }

    let now = world.resource::<WorldTime>().now;
    let mut query = world.query::<(Entity, &MapPosition, &Sprite)>();
    for (entity, pos, sprite) in query.iter(&world) {
        log::info!(
            "t={} {:?} '{}' at ({}, {}) frame {}",
            now,
            entity,
            sprite.tex_key,
            pos.x,
            pos.y,
            sprite.frame
        );
    }
    let manager = world.non_send_resource::<AnimatorManager>();
    log::info!(
        "{} animator(s) running, {} suspended",
        manager.running_len(),
        manager.suspended_len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_frame() {
        assert_eq!(resume_frame(None, 60), None);
        assert_eq!(resume_frame(Some(100), 60), Some(160));
        assert_eq!(resume_frame(Some(u32::MAX - 1), 60), None);
    }
}
