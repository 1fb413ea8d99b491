//! Animation descriptor registry.
//!
//! This module provides a store of validated [`Animation`] descriptors that
//! can be shared by any number of animators. Descriptors are looked up by
//! their string id and handed out as `Arc`s, so the store can be dropped or
//! reloaded without invalidating animators that are still playing.
//!
//! # File Format
//!
//! ```json
//! {
//!   "animations": [
//!     { "id": "walk", "kind": "moving", "delay": 100, "repeat": 4, "dx": 2 },
//!     { "id": "coin", "kind": "frame_range", "delay": 80, "forever": true,
//!       "start_frame": 0, "end_frame": 3 }
//!   ]
//! }
//! ```
//!
//! `repeat` defaults to 1, `forever` to false and `dx`/`dy` to 0.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationError, AnimationKind, Repeat, Timestamp};

/// Central registry of reusable animation descriptors keyed by id.
#[derive(Resource, Debug, Default, Clone)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, Arc<Animation>>,
}

/// One entry of the descriptor file, before validation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnimationDef {
    pub id: String,
    pub delay: Timestamp,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub forever: bool,
    #[serde(flatten)]
    pub kind: AnimationKind,
}

fn default_repeat() -> u32 {
    1
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct AnimationFile {
    animations: Vec<AnimationDef>,
}

impl TryFrom<AnimationDef> for Animation {
    type Error = AnimationError;

    fn try_from(def: AnimationDef) -> Result<Self, Self::Error> {
        let repeat = if def.forever {
            Repeat::Forever
        } else {
            Repeat::Times(def.repeat)
        };
        Animation::new(def.id, def.delay, repeat, def.kind)
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates every descriptor in a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)?;
        info!(
            "Loaded {} animation(s) from {}",
            store.animations.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parses descriptors from JSON text. The first invalid entry aborts the load.
    pub fn from_json_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file: AnimationFile = serde_json::from_str(content)?;
        let mut store = Self::new();
        for def in file.animations {
            store.insert(Animation::try_from(def)?);
        }
        Ok(store)
    }

    /// Adds a descriptor, replacing any previous one with the same id.
    pub fn insert(&mut self, animation: Animation) -> Arc<Animation> {
        let animation = Arc::new(animation);
        self.animations
            .insert(animation.id().to_string(), Arc::clone(&animation));
        animation
    }

    pub fn get(&self, id: &str) -> Option<Arc<Animation>> {
        self.animations.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_both_kinds_with_defaults() {
        let store = AnimationStore::from_json_str(
            r#"{
                "animations": [
                    { "id": "walk", "kind": "moving", "delay": 100, "dx": 2 },
                    { "id": "coin", "kind": "frame_range", "delay": 80, "forever": true,
                      "start_frame": 0, "end_frame": 3 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(store.len(), 2);

        let walk = store.get("walk").unwrap();
        assert_eq!(walk.delay(), 100);
        assert_eq!(walk.repeat(), Repeat::Times(1));
        assert_eq!(walk.displacement(), (2, 0));

        let coin = store.get("coin").unwrap();
        assert!(coin.is_forever());
        assert_eq!(coin.frames(), Some((0, 3)));
    }

    #[test]
    fn test_invalid_entry_aborts_load() {
        let err = AnimationStore::from_json_str(
            r#"{ "animations": [
                { "id": "bad", "kind": "frame_range", "delay": 10, "start_frame": 4, "end_frame": 1 }
            ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("start frame 4 is after end frame 1"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(
            AnimationStore::from_json_str(
                r#"{ "animations": [ { "id": "x", "kind": "spin", "delay": 10 } ] }"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut store = AnimationStore::new();
        store.insert(Animation::moving("walk", 1, 0, 10, Repeat::Forever).unwrap());
        store.insert(Animation::moving("walk", 3, 0, 10, Repeat::Forever).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("walk").unwrap().displacement(), (3, 0));
        assert!(store.get("run").is_none());
    }
}
