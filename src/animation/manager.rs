//! Registry of known animators.
//!
//! The [`AnimatorManager`] partitions every registered [`Animator`] into a
//! *running* set, advanced on each tick, and a *suspended* set. It never owns
//! an animator: entries are weak references that disappear once the owning
//! game object drops its animator.
//!
//! # Snapshot Isolation
//!
//! [`AnimatorManager::progress`] copies the running set before advancing
//! anything. Callbacks fired during the tick may freely call
//! [`AnimatorManager::mark_as_running`] or [`AnimatorManager::mark_as_suspended`]
//! on any animator; those changes apply from the next tick and never cause an
//! animator in the current snapshot to be skipped or advanced twice.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::animation::Timestamp;
use crate::animation::animator::{Animator, AnimatorId};

type Members = FxHashMap<AnimatorId, Weak<Animator>>;

#[derive(Default)]
struct Registry {
    running: Members,
    suspended: Members,
}

impl Registry {
    fn take(&mut self, id: AnimatorId) -> Option<Weak<Animator>> {
        self.running
            .remove(&id)
            .or_else(|| self.suspended.remove(&id))
    }

    fn prune(&mut self) {
        let before = self.running.len() + self.suspended.len();
        self.running.retain(|_, a| a.strong_count() > 0);
        self.suspended.retain(|_, a| a.strong_count() > 0);
        let dropped = before - (self.running.len() + self.suspended.len());
        if dropped > 0 {
            debug!("pruned {} dropped animator(s) from the registry", dropped);
        }
    }
}

/// Explicitly constructed animator registry.
///
/// Cloning yields another handle to the same registry, so callbacks can
/// capture a clone and change membership from inside a tick.
#[derive(Clone, Default)]
pub struct AnimatorManager {
    registry: Rc<RefCell<Registry>>,
}

impl AnimatorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished animator to the suspended set.
    ///
    /// # Panics
    ///
    /// If the animator is running.
    pub fn register(&self, animator: &Rc<Animator>) {
        assert!(
            animator.has_finished(),
            "cannot register running animator {}",
            animator.id()
        );
        let mut registry = self.registry.borrow_mut();
        registry.running.remove(&animator.id());
        registry
            .suspended
            .insert(animator.id(), Rc::downgrade(animator));
    }

    /// Forget a finished animator.
    ///
    /// # Panics
    ///
    /// If the animator is running.
    pub fn cancel(&self, animator: &Animator) {
        assert!(
            animator.has_finished(),
            "cannot cancel running animator {}",
            animator.id()
        );
        self.registry.borrow_mut().take(animator.id());
    }

    /// Move a started animator into the running set, adding it if the
    /// manager has not seen it yet.
    ///
    /// # Panics
    ///
    /// If the animator is not running.
    pub fn mark_as_running(&self, animator: &Rc<Animator>) {
        assert!(
            !animator.has_finished(),
            "animator {} marked as running but it is not running",
            animator.id()
        );
        let mut registry = self.registry.borrow_mut();
        let entry = registry
            .take(animator.id())
            .unwrap_or_else(|| Rc::downgrade(animator));
        registry.running.insert(animator.id(), entry);
    }

    /// Move a finished animator into the suspended set.
    ///
    /// Finish callbacks only hold a borrow, so an animator the manager has
    /// never seen is left alone; [`AnimatorManager::register`] adds it.
    ///
    /// # Panics
    ///
    /// If the animator is still running.
    pub fn mark_as_suspended(&self, animator: &Animator) {
        assert!(
            animator.has_finished(),
            "animator {} marked as suspended while running",
            animator.id()
        );
        let mut registry = self.registry.borrow_mut();
        match registry.take(animator.id()) {
            Some(entry) => {
                registry.suspended.insert(animator.id(), entry);
            }
            None => debug!("animator {} suspended before registration", animator.id()),
        }
    }

    /// Advance every animator that is running at the start of the call.
    pub fn progress(&self, now: Timestamp) {
        let snapshot = self.snapshot(|registry| &registry.running);
        for animator in &snapshot {
            animator.progress(now);
        }
    }

    /// Shift the step baseline of every registered animator.
    pub fn time_shift(&self, offset: Timestamp) {
        let running = self.snapshot(|registry| &registry.running);
        let suspended = self.snapshot(|registry| &registry.suspended);
        for animator in running.iter().chain(suspended.iter()) {
            animator.time_shift(offset);
        }
        debug!(
            "time shifted {} animator(s) by {}",
            running.len() + suspended.len(),
            offset
        );
    }

    pub fn is_running(&self, animator: &Animator) -> bool {
        self.registry.borrow().running.contains_key(&animator.id())
    }

    pub fn is_suspended(&self, animator: &Animator) -> bool {
        self.registry
            .borrow()
            .suspended
            .contains_key(&animator.id())
    }

    pub fn is_registered(&self, animator: &Animator) -> bool {
        self.is_running(animator) || self.is_suspended(animator)
    }

    pub fn running_len(&self) -> usize {
        self.registry.borrow().running.len()
    }

    pub fn suspended_len(&self) -> usize {
        self.registry.borrow().suspended.len()
    }

    // Live members of one set, in creation order. The registry borrow ends
    // before any animator is touched.
    fn snapshot(
        &self,
        set: impl Fn(&Registry) -> &Members,
    ) -> SmallVec<[Rc<Animator>; 16]> {
        let mut registry = self.registry.borrow_mut();
        registry.prune();
        let mut members: SmallVec<[Rc<Animator>; 16]> =
            set(&*registry).values().filter_map(Weak::upgrade).collect();
        members.sort_by_key(|a| a.id());
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::descriptor::{Animation, Repeat};
    use std::cell::Cell;
    use std::sync::Arc;

    fn walk_forever() -> Arc<Animation> {
        Arc::new(Animation::moving("walk", 1, 0, 10, Repeat::Forever).unwrap())
    }

    fn started(manager: &AnimatorManager, now: Timestamp) -> Rc<Animator> {
        let animator = Animator::moving();
        manager.register(&animator);
        animator.start(walk_forever(), now);
        manager.mark_as_running(&animator);
        animator
    }

    fn assert_partitioned(manager: &AnimatorManager, animator: &Animator) {
        assert!(
            !(manager.is_running(animator) && manager.is_suspended(animator)),
            "animator {} is in both sets",
            animator.id()
        );
    }

    #[test]
    fn test_register_adds_to_suspended() {
        let manager = AnimatorManager::new();
        let animator = Animator::moving();
        manager.register(&animator);
        assert!(manager.is_suspended(&animator));
        assert!(!manager.is_running(&animator));
        assert_eq!(manager.suspended_len(), 1);
        assert_eq!(manager.running_len(), 0);
    }

    #[test]
    #[should_panic(expected = "cannot register running animator")]
    fn test_register_running_panics() {
        let manager = AnimatorManager::new();
        let animator = Animator::moving();
        animator.start(walk_forever(), 0);
        manager.register(&animator);
    }

    #[test]
    fn test_mark_unregistered_as_running_adds_it() {
        let manager = AnimatorManager::new();
        let animator = Animator::moving();
        animator.start(walk_forever(), 0);
        manager.mark_as_running(&animator);
        assert!(manager.is_running(&animator));
        assert_eq!(manager.running_len(), 1);

        manager.progress(20);
        assert_eq!(animator.last_time(), 20);
    }

    #[test]
    fn test_suspend_unregistered_is_ignored() {
        let manager = AnimatorManager::new();
        let animator = Animator::moving();
        manager.mark_as_suspended(&animator);
        assert!(!manager.is_registered(&animator));

        manager.register(&animator);
        assert!(manager.is_suspended(&animator));
    }

    #[test]
    #[should_panic(expected = "marked as suspended while running")]
    fn test_suspend_running_panics() {
        let manager = AnimatorManager::new();
        let animator = started(&manager, 0);
        manager.mark_as_suspended(&animator);
    }

    #[test]
    fn test_membership_lifecycle_keeps_partition() {
        let manager = AnimatorManager::new();
        let animator = started(&manager, 0);
        assert!(manager.is_running(&animator));
        assert_partitioned(&manager, &animator);

        animator.stop();
        manager.mark_as_suspended(&animator);
        assert!(manager.is_suspended(&animator));
        assert_partitioned(&manager, &animator);

        // Suspending twice is harmless.
        manager.mark_as_suspended(&animator);
        assert_eq!(manager.suspended_len(), 1);

        manager.cancel(&animator);
        assert!(!manager.is_registered(&animator));
        assert_eq!(manager.suspended_len() + manager.running_len(), 0);
    }

    #[test]
    fn test_progress_only_advances_running_set() {
        let manager = AnimatorManager::new();
        let running = started(&manager, 0);
        let idle = Animator::moving();
        manager.register(&idle);

        manager.progress(25);
        assert_eq!(running.last_time(), 20);
        assert_eq!(idle.last_time(), 0);
    }

    #[test]
    fn test_self_suspension_inside_tick_does_not_skip_siblings() {
        let manager = AnimatorManager::new();
        let steps = Rc::new(Cell::new(0));

        let animators: Vec<Rc<Animator>> = (0..4)
            .map(|i| {
                let animator = Animator::moving();
                manager.register(&animator);
                let m = manager.clone();
                let s = Rc::clone(&steps);
                animator.set_on_action(move |this, _| {
                    s.set(s.get() + 1);
                    if i % 2 == 0 {
                        this.stop();
                        m.mark_as_suspended(this);
                    }
                });
                animator.start(walk_forever(), 0);
                manager.mark_as_running(&animator);
                animator
            })
            .collect();

        manager.progress(10);
        assert_eq!(steps.get(), 4);
        assert_eq!(manager.running_len(), 2);
        assert_eq!(manager.suspended_len(), 2);
        for animator in &animators {
            assert_partitioned(&manager, animator);
        }

        manager.progress(20);
        assert_eq!(steps.get(), 6);
    }

    #[test]
    fn test_resuming_sibling_inside_tick_applies_next_tick() {
        let manager = AnimatorManager::new();
        let sibling = Animator::moving();
        manager.register(&sibling);
        let sibling_steps = Rc::new(Cell::new(0));
        let s = Rc::clone(&sibling_steps);
        sibling.set_on_action(move |_, _| s.set(s.get() + 1));

        let trigger = Animator::moving();
        manager.register(&trigger);
        let m = manager.clone();
        let target = Rc::clone(&sibling);
        trigger.set_on_action(move |_, _| {
            if target.has_finished() {
                target.start(walk_forever(), 0);
                m.mark_as_running(&target);
            }
        });
        trigger.start(walk_forever(), 0);
        manager.mark_as_running(&trigger);

        manager.progress(10);
        assert!(manager.is_running(&sibling));
        assert_eq!(sibling_steps.get(), 0);

        manager.progress(20);
        assert_eq!(sibling_steps.get(), 2);
    }

    #[test]
    fn test_dropped_animator_is_pruned() {
        let manager = AnimatorManager::new();
        let animator = started(&manager, 0);
        assert_eq!(manager.running_len(), 1);
        drop(animator);
        manager.progress(100);
        assert_eq!(manager.running_len(), 0);
    }

    #[test]
    fn test_time_shift_reaches_every_registered_animator() {
        let manager = AnimatorManager::new();
        let a = started(&manager, 0);
        let b = started(&manager, 5);
        manager.time_shift(30);
        assert_eq!(a.last_time(), 30);
        assert_eq!(b.last_time(), 35);

        manager.progress(40);
        assert_eq!(a.last_time(), 40);
        assert_eq!(b.last_time(), 35);
    }

    #[test]
    fn test_clones_share_registry() {
        let manager = AnimatorManager::new();
        let other = manager.clone();
        let animator = Animator::moving();
        other.register(&animator);
        assert!(manager.is_suspended(&animator));
    }
}
