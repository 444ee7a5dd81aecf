//! Capability traits grouping the commands scripts can issue.
//!
//! Mutating commands apply at once and return a [`NextTick`]; awaiting it
//! keeps the script in step with the frame. Queries return plain values.

use super::appearance::{Effect, RotationStyle};
use super::sprite::Sprite;
use crate::error::StageResult;
use crate::geometry::Point;
use crate::render::{Backdrop, KeyCode, SoundRequest};
use crate::runtime::{Sleep, WaitUntil};
use crate::scheduler::NextTick;

/// Where a `go to` / `glide to` / `point towards` command aims.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// A uniformly random whole-number point on the stage.
    Random,
    /// The mouse pointer.
    Mouse,
    /// A fixed point.
    Point(Point),
}

impl From<Point> for Target {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl From<(f64, f64)> for Target {
    fn from(point: (f64, f64)) -> Self {
        Self::Point(point.into())
    }
}

impl From<&Sprite> for Target {
    /// Aim at where the sprite is right now.
    fn from(sprite: &Sprite) -> Self {
        Self::Point(sprite.position())
    }
}

/// Movement commands.
pub trait Motion {
    /// Move along the current direction.
    fn move_steps(&self, steps: f64) -> NextTick;
    /// Jump to a point.
    fn go_to_xy(&self, x: f64, y: f64) -> NextTick;
    /// Jump to a target.
    fn go_to(&self, target: Target) -> NextTick;
    /// Turn clockwise.
    fn turn_right(&self, degrees: f64) -> NextTick;
    /// Turn counter-clockwise.
    fn turn_left(&self, degrees: f64) -> NextTick;
    /// Face a direction.
    fn point_in_direction(&self, direction: f64) -> NextTick;
    /// Face a target. `Target::Random` picks a random direction.
    fn point_towards(&self, target: Target) -> NextTick;
    /// Glide to a point over `seconds`, one step per tick.
    ///
    /// Fails with `NotConnected` before touching any state when the actor
    /// has no render loop to take its tick rate from.
    fn glide(&self, x: f64, y: f64, seconds: f64) -> StageResult<NextTick>;
    /// Glide to a target over `seconds`.
    fn glide_to(&self, target: Target, seconds: f64) -> StageResult<NextTick>;
    /// Change how the direction is applied to the costume.
    fn set_rotation_style(&self, style: RotationStyle) -> NextTick;
    /// Move horizontally.
    fn change_x(&self, dx: f64) -> NextTick;
    /// Set the horizontal position.
    fn set_x(&self, x: f64) -> NextTick;
    /// Move vertically.
    fn change_y(&self, dy: f64) -> NextTick;
    /// Set the vertical position.
    fn set_y(&self, y: f64) -> NextTick;
    /// Horizontal position.
    fn x(&self) -> f64;
    /// Vertical position.
    fn y(&self) -> f64;
    /// Direction in degrees.
    fn direction(&self) -> f64;
}

/// Appearance commands.
pub trait Looks {
    /// Switch to a costume by index (wraps around).
    fn set_costume(&self, index: usize) -> NextTick;
    /// Switch to a costume by name. Unknown names are ignored with a warning.
    fn set_costume_named(&self, name: &str) -> NextTick;
    /// Switch to the following costume (wraps around).
    fn next_costume(&self) -> NextTick;
    /// Set the size in percent.
    fn set_size(&self, size: f64) -> NextTick;
    /// Grow (or shrink) by a number of percent.
    fn change_size(&self, delta: f64) -> NextTick;
    /// Set a graphic effect. Unknown names are ignored with a warning.
    fn set_effect(&self, effect: &str, value: f64) -> NextTick;
    /// Add to a graphic effect. Unknown names are ignored with a warning.
    fn change_effect(&self, effect: &str, delta: f64) -> NextTick;
    /// Reset every graphic effect.
    fn clear_effects(&self) -> NextTick;
    /// Make the sprite visible.
    fn show(&self) -> NextTick;
    /// Make the sprite invisible.
    fn hide(&self) -> NextTick;
    /// Size in percent.
    fn size(&self) -> f64;
    /// Index of the current costume.
    fn costume_number(&self) -> usize;
    /// Whether the sprite is shown.
    fn is_visible(&self) -> bool;
    /// Current value of an effect.
    fn effect(&self, effect: Effect) -> f64;
}

/// Input queries. They read whatever the render loop last saw and return
/// neutral values (`false`, `0`) while disconnected.
pub trait Sensing {
    /// Whether a key is held.
    fn key_pressed(&self, key: KeyCode) -> bool;
    /// Whether a mouse button is held.
    fn mouse_down(&self) -> bool;
    /// Mouse pointer x.
    fn mouse_x(&self) -> f64;
    /// Mouse pointer y.
    fn mouse_y(&self) -> f64;
}

/// Stage backdrop commands.
pub trait Backdrops {
    /// Replace the backdrop.
    fn set_backdrop(&self, backdrop: Backdrop) -> NextTick;
    /// The current backdrop.
    fn backdrop(&self) -> Option<Backdrop>;
}

/// Sound commands. Sounds never wait for a tick.
pub trait Sound {
    /// Start playing a sound.
    fn play_sound(&self, sound: SoundRequest);
}

/// Real-time waits. These run on wall-clock timers, not on ticks.
pub trait Control {
    /// Wait for a number of seconds.
    fn wait_seconds(&self, seconds: f64) -> Sleep;
    /// Wait until `predicate` returns `true`, checking it now and then once
    /// per poll interval.
    fn wait_until(&self, predicate: impl FnMut() -> bool + 'static) -> WaitUntil;
}
