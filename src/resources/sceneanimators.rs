//! Ownership of the animators belonging to scene entities.
//!
//! The [`AnimatorManager`](crate::animation::AnimatorManager) only keeps weak
//! references, so something has to own each animator. For entities spawned by
//! the scene that owner is [`SceneAnimators`]. Removing an entity's entry
//! drops its animator, and the manager forgets it on its next tick.
//!
//! Animators are `!Send`; insert this resource with
//! `World::insert_non_send_resource`.

use std::rc::Rc;

use bevy_ecs::prelude::Entity;
use rustc_hash::FxHashMap;

use crate::animation::Animator;

#[derive(Default)]
pub struct SceneAnimators {
    pub owned: FxHashMap<Entity, Rc<Animator>>,
}

impl SceneAnimators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, animator: Rc<Animator>) {
        self.owned.insert(entity, animator);
    }

    pub fn get(&self, entity: Entity) -> Option<&Rc<Animator>> {
        self.owned.get(&entity)
    }

    /// Give up ownership of an entity's animator.
    pub fn remove(&mut self, entity: Entity) -> Option<Rc<Animator>> {
        self.owned.remove(&entity)
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }
}
