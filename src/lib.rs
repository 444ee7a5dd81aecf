//! # Cadence
//!
//! A frame-synchronized action scheduler for scripted sprite and stage actors.
//!
//! Scripts are plain `async` blocks. Every command an actor runs applies at
//! once and hands back a future that completes on the next rendered frame, so
//! scripts advance at the display's cadence without knowing about it.
//!
//! ## Core Concepts
//!
//! - **Continuations**: one-shot [`Resolver`]/[`NextTick`] pairs queued per
//!   actor and resolved in FIFO order on each tick
//! - **Glides**: multi-frame motion that moves exactly one step per tick
//! - **Screen refresh**: a per-actor gate that lets commands skip the wait
//! - **Render loop**: an injected [`RenderLoop`] providing ticks and hooks
//! - **Runtime**: scripts run on a tokio `LocalSet`, frames on an interval
//!
//! ## Example
//!
//! ```rust,ignore
//! use cadence::prelude::*;
//!
//! let runtime = Runtime::new(RuntimeConfig::default())?;
//! let cat = runtime.sprite();
//! runtime.spawn(async move {
//!     cat.move_steps(10.0).await;
//!     if let Ok(glide) = cat.glide(100.0, 50.0, 1.0) {
//!         glide.await;
//!     }
//! });
//! let report = runtime.run();
//! assert!(report.finished);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod geometry;
pub mod render;
pub mod runtime;
pub mod scheduler;

// Re-exports for convenience
pub use actor::{
    ActorId, Effect, Effects, RotationStyle, Sprite, SpriteConfig, Stage, Target,
};
pub use error::{StageError, StageResult};
pub use geometry::{Bounds, Point};
pub use render::{
    Backdrop, CallbackId, Costume, CostumeKind, FrameLoop, KeyCode, MouseState, RenderLoop,
    SoundRequest, TickSource,
};
pub use runtime::{RunReport, Runtime, RuntimeConfig};
pub use scheduler::{GlideReplacement, NextTick, Resolver};

/// Everything a script needs in scope.
pub mod prelude {
    pub use crate::actor::{Backdrops, Control, Looks, Motion, Sensing, Sound, Target};
    pub use crate::geometry::Point;
    pub use crate::render::{Costume, KeyCode, SoundRequest};
    pub use crate::runtime::{Runtime, RuntimeConfig};
    pub use crate::{Sprite, Stage, StageResult};
}
