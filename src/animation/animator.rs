//! Timed animation state machine.
//!
//! An [`Animator`] steps through one bound [`Animation`] descriptor as the
//! clock advances. Every due step fires `on_action`; natural completion and
//! explicit stops both fire `on_finish`, and callers tell them apart by
//! reading [`Animator::state`] inside the callback.
//!
//! # State Machine
//!
//! ```text
//! Finished --start--> Running --all repetitions done--> Finished
//!                        \------------stop------------> Stopped
//! ```
//!
//! `Finished` and `Stopped` stay put until [`Animator::start`] is called again.
//!
//! # Reentrancy
//!
//! All operations take `&self`. Callbacks receive the notifying animator and
//! may start, stop or time-shift it (or any other animator) while it is in
//! the middle of [`Animator::progress`]. A callback slot is emptied while its
//! closure runs, so a closure never re-enters itself; replacing a slot from
//! inside its own callback keeps the replacement.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::animation::Timestamp;
use crate::animation::descriptor::{Animation, AnimationKind};

static NEXT_ANIMATOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`Animator`], ordered by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimatorId(u64);

impl AnimatorId {
    fn next() -> Self {
        AnimatorId(NEXT_ANIMATOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AnimatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorState {
    /// Completed all repetitions, or never started.
    #[default]
    Finished,
    Running,
    /// Ended early by [`Animator::stop`].
    Stopped,
}

/// Progression strategy, fixed when the animator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorKind {
    /// Linear displacement: one `on_action` per due step.
    Moving,
    /// Frame-index cycling over the descriptor's frame range.
    FrameRange,
}

impl AnimatorKind {
    /// Whether a descriptor carries the payload this strategy needs.
    pub fn accepts(self, kind: &AnimationKind) -> bool {
        self == AnimatorKind::from(kind)
    }
}

impl From<&AnimationKind> for AnimatorKind {
    fn from(kind: &AnimationKind) -> Self {
        match kind {
            AnimationKind::Moving { .. } => AnimatorKind::Moving,
            AnimationKind::FrameRange { .. } => AnimatorKind::FrameRange,
        }
    }
}

pub type OnStart = Box<dyn FnMut(&Animator)>;
pub type OnAction = Box<dyn FnMut(&Animator, &Animation)>;
pub type OnFinish = Box<dyn FnMut(&Animator)>;

/// Timed state machine driving one animated entity.
///
/// Owned by the game object it animates (usually through an `Rc`); an
/// [`AnimatorManager`](crate::animation::AnimatorManager) only keeps a weak
/// membership reference.
pub struct Animator {
    id: AnimatorId,
    kind: AnimatorKind,
    anim: RefCell<Option<Arc<Animation>>>,
    last_time: Cell<Timestamp>,
    state: Cell<AnimatorState>,
    current_rep: Cell<u32>,
    current_frame: Cell<u32>,
    steps: Cell<u32>,
    // Bumped by every start; a restart from a callback ends the older run.
    run: Cell<u64>,
    on_start: RefCell<Option<OnStart>>,
    on_action: RefCell<Option<OnAction>>,
    on_finish: RefCell<Option<OnFinish>>,
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.state.get())
            .field("last_time", &self.last_time.get())
            .field("current_rep", &self.current_rep.get())
            .field("current_frame", &self.current_frame.get())
            .field("steps", &self.steps.get())
            .field("animation", &self.anim.borrow().as_ref().map(|a| a.id().to_string()))
            .finish()
    }
}

impl Animator {
    pub fn new(kind: AnimatorKind) -> Self {
        Self {
            id: AnimatorId::next(),
            kind,
            anim: RefCell::new(None),
            last_time: Cell::new(0),
            state: Cell::new(AnimatorState::Finished),
            current_rep: Cell::new(0),
            current_frame: Cell::new(0),
            steps: Cell::new(0),
            run: Cell::new(0),
            on_start: RefCell::new(None),
            on_action: RefCell::new(None),
            on_finish: RefCell::new(None),
        }
    }

    /// Shared linear-displacement animator with no callbacks.
    pub fn moving() -> Rc<Self> {
        Rc::new(Self::new(AnimatorKind::Moving))
    }

    /// Shared frame-range animator with no callbacks.
    pub fn frame_range() -> Rc<Self> {
        Rc::new(Self::new(AnimatorKind::FrameRange))
    }

    pub fn with_on_start(self, f: impl FnMut(&Animator) + 'static) -> Self {
        self.set_on_start(f);
        self
    }

    pub fn with_on_action(self, f: impl FnMut(&Animator, &Animation) + 'static) -> Self {
        self.set_on_action(f);
        self
    }

    pub fn with_on_finish(self, f: impl FnMut(&Animator) + 'static) -> Self {
        self.set_on_finish(f);
        self
    }

    pub fn set_on_start(&self, f: impl FnMut(&Animator) + 'static) {
        *self.on_start.borrow_mut() = Some(Box::new(f));
    }

    pub fn set_on_action(&self, f: impl FnMut(&Animator, &Animation) + 'static) {
        *self.on_action.borrow_mut() = Some(Box::new(f));
    }

    pub fn set_on_finish(&self, f: impl FnMut(&Animator) + 'static) {
        *self.on_finish.borrow_mut() = Some(Box::new(f));
    }

    pub fn id(&self) -> AnimatorId {
        self.id
    }

    pub fn kind(&self) -> AnimatorKind {
        self.kind
    }

    pub fn state(&self) -> AnimatorState {
        self.state.get()
    }

    /// True unless the animator is running.
    pub fn has_finished(&self) -> bool {
        self.state.get() != AnimatorState::Running
    }

    /// Timestamp of the last processed step boundary.
    pub fn last_time(&self) -> Timestamp {
        self.last_time.get()
    }

    /// Completed repetitions in the current run. Stays at zero for forever animations.
    pub fn current_rep(&self) -> u32 {
        self.current_rep.get()
    }

    /// Current frame index; only meaningful for [`AnimatorKind::FrameRange`].
    pub fn current_frame(&self) -> u32 {
        self.current_frame.get()
    }

    /// Steps taken since the last [`Animator::start`]. The frame shown by
    /// `start` itself is step zero.
    pub fn steps(&self) -> u32 {
        self.steps.get()
    }

    /// The descriptor bound by the last [`Animator::start`], if any.
    pub fn animation(&self) -> Option<Arc<Animation>> {
        self.anim.borrow().clone()
    }

    /// Bind `anim` and begin running from `now`.
    ///
    /// Resets progress counters and fires `on_start`. Frame-range animators
    /// also fire `on_action` once at the start frame so the sprite shows the
    /// first frame immediately.
    ///
    /// # Panics
    ///
    /// If the animator is already running, or if the descriptor's strategy
    /// does not match [`Animator::kind`].
    pub fn start(&self, anim: Arc<Animation>, now: Timestamp) {
        assert!(
            !self.is_running(),
            "animator {} started while already running",
            self.id
        );
        assert!(
            self.kind.accepts(anim.kind()),
            "animator {} ({:?}) cannot play animation '{}'",
            self.id,
            self.kind,
            anim.id()
        );

        self.last_time.set(now);
        self.current_rep.set(0);
        self.steps.set(0);
        self.current_frame
            .set(anim.frames().map_or(0, |(start_frame, _)| start_frame));
        *self.anim.borrow_mut() = Some(Arc::clone(&anim));
        self.run.set(self.run.get().wrapping_add(1));
        self.state.set(AnimatorState::Running);
        debug!("animator {} started '{}' at {}", self.id, anim.id(), now);

        let run = self.run.get();
        self.notify_started();
        if self.kind == AnimatorKind::FrameRange && self.is_current(run) {
            self.notify_action(&anim);
        }
    }

    /// End the animation early. No-op unless running.
    pub fn stop(&self) {
        self.finish(AnimatorState::Stopped);
    }

    /// Shift the step baseline forward without firing anything.
    ///
    /// Used after a pause so resuming does not replay every skipped step.
    pub fn time_shift(&self, offset: Timestamp) {
        self.last_time
            .set(self.last_time.get().saturating_add(offset));
    }

    /// Process every step that became due up to `now`.
    ///
    /// Does nothing when the animator is not running or when `now` has not
    /// moved past the last step boundary.
    pub fn progress(&self, now: Timestamp) {
        if !self.is_running() {
            return;
        }
        let Some(anim) = self.animation() else {
            return;
        };
        let run = self.run.get();
        match self.kind {
            AnimatorKind::Moving => self.progress_moving(&anim, now, run),
            AnimatorKind::FrameRange => self.progress_frame_range(&anim, now, run),
        }
    }

    fn progress_moving(&self, anim: &Animation, now: Timestamp, run: u64) {
        while self.is_due(anim, now, run) {
            self.advance(anim);
            trace!("animator {} moving step at {}", self.id, self.last_time.get());
            self.notify_action(anim);
            if !self.is_current(run) || self.complete_repetition(anim) {
                return;
            }
        }
    }

    fn progress_frame_range(&self, anim: &Animation, now: Timestamp, run: u64) {
        let Some((start_frame, end_frame)) = anim.frames() else {
            return;
        };
        while self.is_due(anim, now, run) {
            let frame = self.current_frame.get();
            self.current_frame.set(if frame == end_frame {
                start_frame
            } else {
                frame + 1
            });
            self.advance(anim);
            trace!(
                "animator {} frame {} at {}",
                self.id,
                self.current_frame.get(),
                self.last_time.get()
            );
            self.notify_action(anim);
            if !self.is_current(run) {
                return;
            }
            if self.current_frame.get() == end_frame && self.complete_repetition(anim) {
                return;
            }
        }
    }

    fn is_running(&self) -> bool {
        self.state.get() == AnimatorState::Running
    }

    /// Still running the same start that `run` was taken from.
    fn is_current(&self, run: u64) -> bool {
        self.is_running() && self.run.get() == run
    }

    fn is_due(&self, anim: &Animation, now: Timestamp, run: u64) -> bool {
        let last = self.last_time.get();
        self.is_current(run) && now > last && now - last >= anim.delay()
    }

    fn advance(&self, anim: &Animation) {
        self.last_time.set(self.last_time.get() + anim.delay());
        self.steps.set(self.steps.get().saturating_add(1));
    }

    /// Count one finished cycle; finishes the animator on the last one.
    fn complete_repetition(&self, anim: &Animation) -> bool {
        let Some(reps) = anim.repeat_count() else {
            return false;
        };
        let rep = self.current_rep.get() + 1;
        self.current_rep.set(rep);
        if rep >= reps {
            self.finish(AnimatorState::Finished);
            true
        } else {
            false
        }
    }

    fn finish(&self, state: AnimatorState) {
        if self.is_running() {
            self.state.set(state);
            debug!("animator {} ended as {:?}", self.id, state);
            self.notify_finished();
        }
    }

    fn notify_started(&self) {
        let taken = self.on_start.borrow_mut().take();
        if let Some(mut f) = taken {
            f(self);
            restore(&self.on_start, f);
        }
    }

    fn notify_action(&self, anim: &Animation) {
        let taken = self.on_action.borrow_mut().take();
        if let Some(mut f) = taken {
            f(self, anim);
            restore(&self.on_action, f);
        }
    }

    fn notify_finished(&self) {
        let taken = self.on_finish.borrow_mut().take();
        if let Some(mut f) = taken {
            f(self);
            restore(&self.on_finish, f);
        }
    }
}

// Put a callback back unless it was replaced while running.
fn restore<F>(slot: &RefCell<Option<F>>, f: F) {
    let mut slot = slot.borrow_mut();
    if slot.is_none() {
        *slot = Some(f);
    }
}
