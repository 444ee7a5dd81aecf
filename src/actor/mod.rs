//! Actors: Scriptable entities that stay in step with the render loop.
//!
//! An [`Actor`] is a cheap, cloneable handle to shared state: its role
//! (sprite or stage), its [`ActionScheduler`] and its connection to a render
//! loop. Scripts hold handles and `await` the [`NextTick`] every command
//! returns.
//!
//! # Connection
//!
//! ```text
//!            connect(render)                   disconnect()
//!  Detached ─────────────────▶ Connected ─────────────────────▶ Detached
//!      ▲                          │   ▲     (waiters stay pending)
//!      │                          │   │
//!      │                          └───┘ connect(other): unsubscribe first
//!      └──── last handle dropped: unsubscribe ───┘
//! ```
//!
//! While connected the actor owns exactly one tick subscription. On every
//! tick it resolves the continuations queued before the tick, advances its
//! glide, and publishes changed props.

mod appearance;
mod sprite;
mod stage;
mod traits;

pub use appearance::{Effect, Effects, RotationStyle};
pub use sprite::{Sprite, SpriteConfig, SpriteState};
pub use stage::{Stage, StageState, DEFAULT_POLL_INTERVAL};
pub use traits::{Backdrops, Control, Looks, Motion, Sensing, Sound, Target};

use crate::render::{dispatch_all, CallbackId, KeyCode, RenderCommand, RenderLoop};
use crate::scheduler::{ActionScheduler, NextTick, Resolver};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique actor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw id. Ids made this way are not guaranteed unique.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role-specific state and per-tick behaviour plugged into an [`Actor`].
pub trait Role: 'static {
    /// The actor has just subscribed to a render loop.
    fn on_connect(&mut self, _render: &mut Vec<RenderCommand>) {}

    /// The actor has just unsubscribed from its render loop.
    fn on_disconnect(&mut self, _render: &mut Vec<RenderCommand>) {}

    /// Run one tick of the scheduler and return the resolvers that are due,
    /// in resolution order.
    fn on_tick(
        &mut self,
        scheduler: &mut ActionScheduler,
        _render: &mut Vec<RenderCommand>,
    ) -> Vec<Resolver> {
        scheduler.tick(None)
    }
}

/// A live subscription to a render loop.
struct Link {
    render: Rc<dyn RenderLoop>,
    callback: CallbackId,
}

pub(crate) struct ActorInner<R: Role> {
    pub(crate) id: ActorId,
    link: Option<Link>,
    pub(crate) scheduler: ActionScheduler,
    screen_refresh: bool,
    pub(crate) role: R,
}

impl<R: Role> ActorInner<R> {
    /// Wait for the next tick if screen refresh is on.
    fn refresh(&mut self) -> NextTick {
        if self.screen_refresh {
            self.scheduler.await_next_tick()
        } else {
            NextTick::ready()
        }
    }

    pub(crate) fn render(&self) -> Option<Rc<dyn RenderLoop>> {
        self.link.as_ref().map(|link| Rc::clone(&link.render))
    }
}

impl<R: Role> Drop for ActorInner<R> {
    fn drop(&mut self) {
        if let Some(link) = self.link.take() {
            let mut commands = Vec::new();
            self.role.on_disconnect(&mut commands);
            link.render.remove_callback(link.callback);
            dispatch_all(&commands, self.id, link.render.as_ref());
            tracing::debug!(actor = %self.id, "dropped while connected; unsubscribed");
        }
    }
}

/// Handle to an actor. Clones share the same actor.
pub struct Actor<R: Role> {
    inner: Rc<RefCell<ActorInner<R>>>,
}

impl<R: Role> Clone for Actor<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: Role> fmt::Debug for Actor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Actor")
            .field("id", &inner.id)
            .field("connected", &inner.link.is_some())
            .field("pending", &inner.scheduler.pending())
            .finish_non_exhaustive()
    }
}

impl<R: Role> Actor<R> {
    /// Wrap a role in a fresh, detached actor with screen refresh on.
    pub fn from_role(role: R) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ActorInner {
                id: ActorId::next(),
                link: None,
                scheduler: ActionScheduler::new(),
                screen_refresh: true,
                role,
            })),
        }
    }

    /// The actor's identity.
    pub fn id(&self) -> ActorId {
        self.inner.borrow().id
    }

    /// Check whether two handles refer to the same actor.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Subscribe to a render loop's ticks.
    ///
    /// An existing connection is dropped first, so connecting twice never
    /// leaves two subscriptions behind.
    pub fn connect(&self, render: Rc<dyn RenderLoop>) {
        self.disconnect();

        let weak = Rc::downgrade(&self.inner);
        let callback = render.add_callback(Box::new(move || Self::on_tick(&weak)));

        let mut commands = Vec::new();
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.link = Some(Link {
                render: Rc::clone(&render),
                callback,
            });
            inner.role.on_connect(&mut commands);
            inner.id
        };

        tracing::debug!(actor = %id, %callback, fps = render.fps(), "connected");
        dispatch_all(&commands, id, render.as_ref());
    }

    /// Unsubscribe from the render loop, if connected.
    ///
    /// Continuations still queued are left alone: scripts awaiting them stay
    /// suspended until the actor is connected again and ticks.
    pub fn disconnect(&self) {
        let mut commands = Vec::new();
        let (id, link, pending) = {
            let mut inner = self.inner.borrow_mut();
            let link = inner.link.take();
            if link.is_some() {
                inner.role.on_disconnect(&mut commands);
            }
            (inner.id, link, inner.scheduler.pending())
        };

        if let Some(link) = link {
            link.render.remove_callback(link.callback);
            dispatch_all(&commands, id, link.render.as_ref());
            tracing::debug!(actor = %id, callback = %link.callback, pending, "disconnected");
        }
    }

    /// Check whether the actor is subscribed to a render loop.
    pub fn is_connected(&self) -> bool {
        self.inner.borrow().link.is_some()
    }

    /// The render loop the actor is connected to.
    pub fn render_loop(&self) -> Option<Rc<dyn RenderLoop>> {
        self.inner.borrow().render()
    }

    /// Suspend the calling script until the next tick.
    pub fn await_next_tick(&self) -> NextTick {
        self.inner.borrow_mut().scheduler.await_next_tick()
    }

    /// Number of continuations waiting for the next tick.
    pub fn pending_continuations(&self) -> usize {
        self.inner.borrow().scheduler.pending()
    }

    /// Whether mutating commands wait for the next tick.
    pub fn screen_refresh(&self) -> bool {
        self.inner.borrow().screen_refresh
    }

    /// Turn the per-command tick wait on or off.
    ///
    /// With screen refresh off, commands apply and return at once, so any
    /// number of them land in the same frame. Turning it back on waits one
    /// tick so the script rejoins the frame cadence.
    pub fn set_screen_refresh(&self, enabled: bool) -> NextTick {
        let mut inner = self.inner.borrow_mut();
        let was_enabled = std::mem::replace(&mut inner.screen_refresh, enabled);
        if enabled && !was_enabled {
            inner.scheduler.await_next_tick()
        } else {
            NextTick::ready()
        }
    }

    /// Apply a mutating command, then wait for the next tick if screen
    /// refresh is on.
    ///
    /// `mutate` returns `false` when it rejected its input; nothing is
    /// awaited then.
    pub(crate) fn command<F>(&self, mutate: F) -> NextTick
    where
        F: FnOnce(&mut R, &mut Vec<RenderCommand>) -> bool,
    {
        self.apply(mutate, true)
    }

    /// Apply a command that never waits.
    pub(crate) fn instant<F>(&self, mutate: F)
    where
        F: FnOnce(&mut R, &mut Vec<RenderCommand>) -> bool,
    {
        let _ = self.apply(mutate, false);
    }

    fn apply<F>(&self, mutate: F, gated: bool) -> NextTick
    where
        F: FnOnce(&mut R, &mut Vec<RenderCommand>) -> bool,
    {
        let mut commands = Vec::new();
        let (wait, id, render) = {
            let mut inner = self.inner.borrow_mut();
            let applied = mutate(&mut inner.role, &mut commands);
            let wait = if applied && gated {
                inner.refresh()
            } else {
                NextTick::ready()
            };
            (wait, inner.id, inner.render())
        };
        if let Some(render) = render {
            dispatch_all(&commands, id, render.as_ref());
        }
        wait
    }

    /// Read role state.
    pub(crate) fn read<T>(&self, read: impl FnOnce(&R) -> T) -> T {
        read(&self.inner.borrow().role)
    }

    /// Full mutable access to the actor's state.
    pub(crate) fn with_inner<T>(&self, f: impl FnOnce(&mut ActorInner<R>) -> T) -> T {
        f(&mut self.inner.borrow_mut())
    }

    /// Tick handler subscribed to the render loop. Never panics.
    fn on_tick(weak: &Weak<RefCell<ActorInner<R>>>) {
        let Some(cell) = weak.upgrade() else {
            return;
        };
        let mut commands = Vec::new();
        let (due, id, render) = {
            let Ok(mut guard) = cell.try_borrow_mut() else {
                tracing::error!("actor state busy during tick; tick skipped");
                return;
            };
            let inner = &mut *guard;
            let due = inner.role.on_tick(&mut inner.scheduler, &mut commands);
            (due, inner.id, inner.render())
        };

        if !due.is_empty() {
            tracing::trace!(actor = %id, resolved = due.len(), "tick");
        }
        if let Some(render) = render {
            dispatch_all(&commands, id, render.as_ref());
        }
        for resolver in due {
            resolver.resolve();
        }
    }
}

impl<R: Role> Sensing for Actor<R> {
    fn key_pressed(&self, key: KeyCode) -> bool {
        self.render_loop().is_some_and(|render| render.key_pressed(key))
    }

    fn mouse_down(&self) -> bool {
        self.render_loop().is_some_and(|render| render.mouse().is_down())
    }

    fn mouse_x(&self) -> f64 {
        self.render_loop().map_or(0.0, |render| render.mouse().x)
    }

    fn mouse_y(&self) -> f64 {
        self.render_loop().map_or(0.0, |render| render.mouse().y)
    }
}
