//! Demo scene and the glue between animators and sprites.
//!
//! The animation core only fires callbacks. This module supplies the
//! callbacks a sprite-based game object needs:
//!
//! - [`sprite_action`] – turn each step into [`SpriteCmd`]s (move, set frame)
//! - [`suspend_on_finish`] – park the animator in the suspended set when it ends
//! - [`ping_pong_on_finish`] – alternate between two descriptors forever
//!
//! [`setup`] spawns the demo entities using descriptors from the
//! [`AnimationStore`], and [`despawn_animated`] tears one down again.

use std::rc::Rc;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use crossbeam_channel::Sender;
use log::{debug, info};

use crate::animation::{
    Animation, AnimationKind, Animator, AnimatorKind, AnimatorManager, AnimatorState,
};
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::events::sprite::SpriteCmd;
use crate::resources::animationstore::AnimationStore;
use crate::resources::sceneanimators::SceneAnimators;
use crate::resources::spritebridge::SpriteBridge;
use crate::resources::worldtime::WorldTime;

fn send(tx: &Sender<SpriteCmd>, cmd: SpriteCmd) {
    if tx.send(cmd).is_err() {
        debug!("Sprite bridge closed, dropping {:?}", cmd);
    }
}

/// Step callback that moves and re-frames `entity`'s sprite.
///
/// Moving animations displace the sprite once per step. Frame-range
/// animations show the current frame and also displace the sprite, except for
/// the start frame shown when the animator starts. Later wraps back to the
/// start frame move as usual.
pub fn sprite_action(
    tx: Sender<SpriteCmd>,
    entity: Entity,
) -> impl FnMut(&Animator, &Animation) + 'static {
    move |animator, anim| {
        let (dx, dy) = anim.displacement();
        let moves = (dx, dy) != (0, 0);
        match anim.kind() {
            AnimationKind::Moving { .. } => {
                if moves {
                    send(&tx, SpriteCmd::Move { entity, dx, dy });
                }
            }
            AnimationKind::FrameRange { .. } => {
                if moves && animator.steps() > 0 {
                    send(&tx, SpriteCmd::Move { entity, dx, dy });
                }
                send(
                    &tx,
                    SpriteCmd::SetFrame {
                        entity,
                        frame: animator.current_frame(),
                    },
                );
            }
        }
    }
}

/// Finish callback that moves the animator to the suspended set.
pub fn suspend_on_finish(manager: AnimatorManager) -> impl FnMut(&Animator) + 'static {
    move |animator| manager.mark_as_suspended(animator)
}

/// Finish callback that restarts with the other descriptor on natural completion.
///
/// The restart is anchored at the last step boundary so the new run keeps
/// the cadence. An explicit stop suspends the animator instead.
pub fn ping_pong_on_finish(
    manager: AnimatorManager,
    there: Arc<Animation>,
    back: Arc<Animation>,
) -> impl FnMut(&Animator) + 'static {
    move |animator| {
        if animator.state() == AnimatorState::Stopped {
            manager.mark_as_suspended(animator);
            return;
        }
        let next = match animator.animation() {
            Some(current) if Arc::ptr_eq(&current, &there) => Arc::clone(&back),
            _ => Arc::clone(&there),
        };
        debug!("Animator {} turning to '{}'", animator.id(), next.id());
        animator.start(next, animator.last_time());
    }
}

/// Spawn an entity whose sprite is driven by a freshly started animator.
///
/// The animator is owned by [`SceneAnimators`], registered with the
/// [`AnimatorManager`] and started at the current [`WorldTime`].
pub fn spawn_animated(
    world: &mut World,
    sprite: Sprite,
    position: MapPosition,
    anim: Arc<Animation>,
    on_finish: impl FnMut(&Animator) + 'static,
) -> Entity {
    let entity = world.spawn((position, sprite)).id();
    let tx = world.resource::<SpriteBridge>().sender();
    let now = world.resource::<WorldTime>().now;
    let manager = world.non_send_resource::<AnimatorManager>().clone();

    let animator = Rc::new(
        Animator::new(AnimatorKind::from(anim.kind()))
            .with_on_action(sprite_action(tx, entity))
            .with_on_finish(on_finish),
    );
    manager.register(&animator);
    animator.start(anim, now);
    manager.mark_as_running(&animator);

    world
        .non_send_resource_mut::<SceneAnimators>()
        .insert(entity, animator);
    entity
}

/// Stop and forget an entity's animator, then despawn the entity.
pub fn despawn_animated(world: &mut World, entity: Entity) {
    let owned = world
        .non_send_resource_mut::<SceneAnimators>()
        .remove(entity);
    if let Some(animator) = owned {
        animator.stop();
        let manager = world.non_send_resource::<AnimatorManager>();
        if manager.is_running(&animator) {
            manager.mark_as_suspended(&animator);
        }
        manager.cancel(&animator);
    }
    world.despawn(entity);
}

fn lookup(store: &AnimationStore, id: &str) -> Result<Arc<Animation>, String> {
    store
        .get(id)
        .ok_or_else(|| format!("Animation '{}' not found in store", id))
}

/// Spawn the demo scene.
///
/// Expects the `walk_right`, `walk_left`, `coin_spin` and `mario_run`
/// descriptors in the [`AnimationStore`].
pub fn setup(world: &mut World) -> Result<(), String> {
    let (walk_right, walk_left, coin_spin, mario_run) = {
        let store = world
            .get_resource::<AnimationStore>()
            .ok_or("AnimationStore resource missing")?;
        (
            lookup(store, "walk_right")?,
            lookup(store, "walk_left")?,
            lookup(store, "coin_spin")?,
            lookup(store, "mario_run")?,
        )
    };
    let manager = world.non_send_resource::<AnimatorManager>().clone();

    let goomba = spawn_animated(
        world,
        Sprite::new("goomba", 16.0, 16.0),
        MapPosition::new(160.0, 208.0),
        Arc::clone(&walk_right),
        ping_pong_on_finish(manager.clone(), walk_right, walk_left),
    );
    let coin = spawn_animated(
        world,
        Sprite::new("coin", 16.0, 16.0),
        MapPosition::new(96.0, 128.0),
        coin_spin,
        suspend_on_finish(manager.clone()),
    );
    let mario = spawn_animated(
        world,
        Sprite::new("mario", 16.0, 32.0),
        MapPosition::new(32.0, 192.0),
        mario_run,
        suspend_on_finish(manager.clone()),
    );

    info!(
        "Scene ready: goomba={:?} coin={:?} mario={:?}, {} animator(s) running",
        goomba,
        coin,
        mario,
        manager.running_len()
    );
    Ok(())
}
