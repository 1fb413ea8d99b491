//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [clock]
//! step = 16
//!
//! [demo]
//! frames = 600
//!
//! [assets]
//! animations = ./assets/animations.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::animation::Timestamp;

/// Default safe values for startup
const DEFAULT_STEP: Timestamp = 16;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_ANIMATIONS_PATH: &str = "./assets/animations.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Ticks added to the world clock per frame.
    pub step: Timestamp,
    /// Number of frames the headless demo runs for.
    pub frames: u32,
    /// Path to the animation descriptor file.
    pub animations_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            step: DEFAULT_STEP,
            frames: DEFAULT_FRAMES,
            animations_path: PathBuf::from(DEFAULT_ANIMATIONS_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [clock] section
        if let Some(step) = config.getuint("clock", "step").ok().flatten() {
            if step > 0 {
                self.step = step;
            }
        }

        // [demo] section
        if let Some(frames) = config.getuint("demo", "frames").ok().flatten() {
            if let Ok(frames) = u32::try_from(frames) {
                self.frames = frames;
            }
        }

        // [assets] section
        if let Some(path) = config.get("assets", "animations") {
            self.animations_path = PathBuf::from(path);
        }

        info!(
            "Loaded config: step={}, frames={}, animations={}",
            self.step,
            self.frames,
            self.animations_path.display()
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("clock", "step", Some(self.step.to_string()));
        config.set("demo", "frames", Some(self.frames.to_string()));
        config.set(
            "assets",
            "animations",
            Some(self.animations_path.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("animatorengine_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let mut config = GameConfig::with_path(temp_config_path("missing"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.step, DEFAULT_STEP);
        assert_eq!(config.frames, DEFAULT_FRAMES);
    }

    #[test]
    fn test_partial_file_overrides_present_keys() {
        let path = temp_config_path("partial");
        std::fs::write(&path, "[clock]\nstep = 5\n").unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.step, 5);
        assert_eq!(config.frames, DEFAULT_FRAMES);
        assert_eq!(config.animations_path, PathBuf::from(DEFAULT_ANIMATIONS_PATH));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_zero_step_is_ignored() {
        let path = temp_config_path("zerostep");
        std::fs::write(&path, "[clock]\nstep = 0\n").unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.step, DEFAULT_STEP);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_out_of_range_frames_is_ignored() {
        let path = temp_config_path("bigframes");
        std::fs::write(&path, "[demo]\nframes = 4294967296\n").unwrap();
        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.frames, DEFAULT_FRAMES);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path("saved");
        let mut saved = GameConfig::with_path(&path);
        saved.step = 10;
        saved.frames = 42;
        saved.animations_path = PathBuf::from("anims.json");
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);
        let _ = std::fs::remove_file(path);
    }
}
