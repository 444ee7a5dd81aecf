//! Stage: The backdrop actor that also owns real-time waits and sound.

use super::traits::{Backdrops, Control, Sound};
use super::{Actor, Role};
use crate::render::{Backdrop, RenderCommand, SoundRequest};
use crate::runtime::{Sleep, WaitUntil};
use crate::scheduler::NextTick;
use std::time::Duration;

/// Default interval between `wait_until` checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A stage handle.
pub type Stage = Actor<StageState>;

/// State of the stage.
#[derive(Debug)]
pub struct StageState {
    poll_interval: Duration,
    backdrop: Option<Backdrop>,
}

impl Role for StageState {
    fn on_connect(&mut self, render: &mut Vec<RenderCommand>) {
        if let Some(backdrop) = &self.backdrop {
            render.push(RenderCommand::SetStage(backdrop.clone()));
        }
    }
}

impl Stage {
    /// Create a detached stage.
    pub fn new() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }

    /// Create a detached stage with a custom `wait_until` interval.
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self::from_role(StageState {
            poll_interval,
            backdrop: None,
        })
    }

    /// Interval between `wait_until` checks.
    pub fn poll_interval(&self) -> Duration {
        self.read(|state| state.poll_interval)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Backdrops for Stage {
    fn set_backdrop(&self, backdrop: Backdrop) -> NextTick {
        self.command(|state, render| {
            render.push(RenderCommand::SetStage(backdrop.clone()));
            state.backdrop = Some(backdrop);
            true
        })
    }

    fn backdrop(&self) -> Option<Backdrop> {
        self.read(|state| state.backdrop.clone())
    }
}

impl Sound for Stage {
    fn play_sound(&self, sound: SoundRequest) {
        self.instant(|_, render| {
            render.push(RenderCommand::PlaySound(sound.clamped()));
            true
        });
    }
}

impl Control for Stage {
    fn wait_seconds(&self, seconds: f64) -> Sleep {
        // Negative and NaN durations finish at once; huge ones never do.
        let duration = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX);
        Sleep::new(duration)
    }

    fn wait_until(&self, predicate: impl FnMut() -> bool + 'static) -> WaitUntil {
        WaitUntil::new(self.poll_interval(), predicate)
    }
}
