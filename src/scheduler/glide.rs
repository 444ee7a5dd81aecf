//! Glide: Linear motion spread over a whole number of ticks.
//!
//! ```text
//!            arm (steps > 0)              step == total
//!   Idle ─────────────────────▶ Gliding ─────────────────▶ Idle
//!    │                            │   ▲                  (resolver fires)
//!    │ steps == 0                 │   │ step < total
//!    ▼                            │   └──── advance ────┘
//!  jump to target                 │
//!  (no tick needed)               └── arm again ──▶ Replaced
//! ```

use super::continuation::Resolver;
use crate::geometry::Point;

/// What a glide command should do, computed before any state is touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlidePlan {
    /// The duration rounds to zero ticks: move straight to the target.
    Immediate(Point),
    /// Spread the motion across `total` ticks of `delta` each.
    Steps {
        /// Number of ticks the glide lasts.
        total: u32,
        /// Offset added on every tick.
        delta: Point,
        /// Exact end position.
        target: Point,
    },
}

impl GlidePlan {
    /// Plan a glide from `from` to `to` lasting `seconds` at `fps` ticks
    /// per second.
    ///
    /// The tick count is `ceil(seconds * fps)`. Zero, negative and
    /// non-finite durations all plan an immediate move.
    pub fn new(from: Point, to: Point, seconds: f64, fps: f64) -> Self {
        let frames = (seconds * fps).ceil();
        if !frames.is_finite() || frames < 1.0 {
            return Self::Immediate(to);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total = frames.min(f64::from(u32::MAX)) as u32;
        let steps = f64::from(total);
        Self::Steps {
            total,
            delta: Point::new((to.x - from.x) / steps, (to.y - from.y) / steps),
            target: to,
        }
    }
}

/// An armed glide occupying an actor's interpolation slot.
#[derive(Debug)]
pub struct Interpolation {
    step: u32,
    total: u32,
    delta: Point,
    target: Point,
    resolver: Resolver,
}

impl Interpolation {
    /// Arm a glide from a `Steps` plan. An `Immediate` plan never arms and
    /// gives the resolver back.
    pub fn arm(plan: GlidePlan, resolver: Resolver) -> Result<Self, Resolver> {
        match plan {
            GlidePlan::Steps {
                total,
                delta,
                target,
            } => Ok(Self {
                step: 0,
                total,
                delta,
                target,
                resolver,
            }),
            GlidePlan::Immediate(_) => Err(resolver),
        }
    }

    /// Ticks taken so far.
    #[inline]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Total ticks the glide lasts.
    #[inline]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Per-tick offset.
    #[inline]
    pub const fn delta(&self) -> Point {
        self.delta
    }

    /// Final position.
    #[inline]
    pub const fn target(&self) -> Point {
        self.target
    }

    /// Advance by one tick, moving `position`. Returns the glide while steps
    /// remain and its resolver once the last one is taken.
    ///
    /// The last step snaps to the exact target so accumulated rounding never
    /// leaves the sprite short of it.
    pub fn advance(self, position: &mut Point) -> Result<Self, Resolver> {
        let mut this = self;
        this.step += 1;
        if this.step >= this.total {
            *position = this.target;
            Err(this.resolver)
        } else {
            *position = position.offset(this.delta.x, this.delta.y);
            Ok(this)
        }
    }

    /// Give up the glide, handing back its resolver.
    pub fn into_resolver(self) -> Resolver {
        self.resolver
    }
}
