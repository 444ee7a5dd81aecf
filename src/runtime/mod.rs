//! Runtime module: Driving scripts against the render loop.
//!
//! Everything runs on one thread, inside a current-thread tokio runtime:
//!
//! ```text
//!  ┌────────────────────────── block_on(LocalSet::run_until) ──────────────────────────┐
//!  │ interval.tick() ─▶ FrameLoop::tick ─▶ actors resolve ─▶ wakers ─┐                  │
//!  │                                                                 ▼                  │
//!  │ tokio timers (Sleep, WaitUntil) ──────────────────────▶ wakers ─▶ LocalSet polls   │
//!  └────────────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **LocalSet**: runs `!Send` scripts in wake order
//! - **Timers**: wall-clock sleeps and polling waits on tokio's clock
//! - **Interval**: paces frames for [`Runtime::run`]

mod engine;
mod timer;

pub use engine::{RunReport, Runtime, RuntimeConfig};
pub use timer::{Sleep, WaitUntil, MIN_POLL_INTERVAL};
