//! Render module: The contract between actors and the render loop.
//!
//! The render loop is an external collaborator. Actors only need two things
//! from it:
//! - **Ticks**: a fixed-rate callback list ([`TickSource`])
//! - **Hooks**: fire-and-forget calls that publish state to the renderer and
//!   read back input ([`RenderLoop`])
//!
//! [`FrameLoop`] is a headless implementation that records every hook call.
//! It drives the tests and the demos, and serves as a reference for real
//! backends.

mod command;
mod frame_loop;
mod input;
mod props;

pub use command::{dispatch_all, RenderCommand};
pub use frame_loop::FrameLoop;
pub use input::{KeyCode, MouseButton, MouseState};
pub use props::{Backdrop, Costume, CostumeKind, DirtyFlags, RendererProps, SoundRequest};

use crate::actor::ActorId;
use std::fmt;

/// Callback run once per tick.
pub type TickCallback = Box<dyn FnMut()>;

/// Handle identifying one tick subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

impl CallbackId {
    /// Wrap a raw subscription number.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw subscription number.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cb{}", self.0)
    }
}

/// A fixed-rate tick generator.
///
/// Implementations must run every subscribed callback at most once per tick,
/// in subscription order, and never re-entrantly.
pub trait TickSource {
    /// Subscribe a callback. It runs on every tick until removed.
    fn add_callback(&self, callback: TickCallback) -> CallbackId;

    /// Unsubscribe a callback. Returns `false` if it was not subscribed.
    fn remove_callback(&self, id: CallbackId) -> bool;

    /// Ticks per second. Always positive.
    fn fps(&self) -> f64;
}

/// A tick source that also accepts render hooks.
///
/// Every hook has a no-op default so that a bare tick source can stand in
/// for a full renderer. Actors never call a hook while holding a borrow of
/// their own state.
pub trait RenderLoop: TickSource {
    /// Replace the stage backdrop.
    fn set_stage(&self, _backdrop: &Backdrop) {}

    /// Publish a sprite's props for the frame being drawn.
    fn draw_sprite(&self, _id: ActorId, _props: &RendererProps, _changed: DirtyFlags) {}

    /// Reload a sprite's skin after a costume change.
    fn update_skin(&self, _id: ActorId, _costume: &Costume) {}

    /// Forget everything drawn for a sprite.
    fn remove_sprite(&self, _id: ActorId) {}

    /// Start playing a sound.
    fn play_sound(&self, _sound: &SoundRequest) {}

    /// Collision query between two sprites.
    fn touching(&self, _a: ActorId, _b: ActorId) -> bool {
        false
    }

    /// Whether a key is currently held.
    fn key_pressed(&self, _key: KeyCode) -> bool {
        false
    }

    /// Current mouse state.
    fn mouse(&self) -> MouseState {
        MouseState::default()
    }
}
