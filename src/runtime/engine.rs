//! Runtime: Wires the render loop and scripts together on tokio.
//!
//! Scripts hold `Rc` handles, so they are `!Send` and run on a
//! [`LocalSet`] inside a current-thread runtime. [`Runtime::step`] drives
//! one frame by hand, which is what tests use. [`Runtime::run`] paces
//! frames with a [`tokio::time::Interval`] until every script is done.

use crate::actor::{Sprite, SpriteConfig, Stage, DEFAULT_POLL_INTERVAL};
use crate::error::{StageError, StageResult};
use crate::geometry::Bounds;
use crate::render::FrameLoop;
use std::cell::{Cell, RefCell};
use std::future::{self, Future};
use std::rc::Rc;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::task::{self, AbortHandle, JoinHandle, LocalSet};
use tokio::time::{self, MissedTickBehavior};

/// Configuration for the Runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Ticks per second.
    pub fps: u32,
    /// Interval between `wait_until` checks.
    pub poll_interval: Duration,
    /// Area random targets are drawn from.
    pub bounds: Bounds,
    /// Stop `run` after this many frames.
    pub max_frames: Option<u64>,
    /// Seed for sprites' random targets. Each sprite derives its own.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            poll_interval: DEFAULT_POLL_INTERVAL,
            bounds: Bounds::STAGE,
            max_frames: None,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Check that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::InvalidTickRate`] if `fps` is zero and
    /// [`StageError::InvalidBounds`] if a half extent is negative.
    pub fn validate(&self) -> StageResult<()> {
        if self.fps == 0 {
            return Err(StageError::InvalidTickRate(self.fps));
        }
        if !self.bounds.is_valid() {
            return Err(StageError::InvalidBounds {
                half_width: self.bounds.half_width,
                half_height: self.bounds.half_height,
            });
        }
        Ok(())
    }

    /// Time between two ticks.
    pub fn frame_interval(&self) -> Duration {
        (Duration::from_secs(1) / self.fps.max(1)).max(Duration::from_nanos(1))
    }
}

/// Outcome of [`Runtime::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Frames ticked.
    pub frames: u64,
    /// Whether every script ran to completion.
    pub finished: bool,
    /// Ticks skipped because a frame ran long.
    pub dropped_ticks: u64,
}

/// Owns a headless render loop and the tokio runtime scripts run on.
#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    render: Rc<FrameLoop>,
    // Dropped before `driver` so pending scripts release their timers first.
    local: LocalSet,
    driver: tokio::runtime::Runtime,
    tasks: RefCell<Vec<AbortHandle>>,
    polls: Rc<Cell<u64>>,
    sprites: Cell<u64>,
}

impl Runtime {
    /// Create a runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate or the
    /// tokio runtime cannot be built.
    pub fn new(config: RuntimeConfig) -> StageResult<Self> {
        config.validate()?;
        let driver = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| StageError::AsyncRuntime(err.to_string()))?;
        Ok(Self {
            render: Rc::new(FrameLoop::new(config.fps)),
            local: LocalSet::new(),
            driver,
            tasks: RefCell::new(Vec::new()),
            polls: Rc::new(Cell::new(0)),
            sprites: Cell::new(0),
            config,
        })
    }

    /// The runtime's configuration.
    #[inline]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The render loop actors connect to.
    pub fn render_loop(&self) -> Rc<FrameLoop> {
        Rc::clone(&self.render)
    }

    /// Spawn a script. It first runs on the next [`step`](Self::step) or
    /// [`run`](Self::run).
    ///
    /// Scripts resume in the order they are woken, so scripts waiting on
    /// the same tick resume in the order they issued their commands.
    pub fn spawn(&self, script: impl Future<Output = ()> + 'static) -> JoinHandle<()> {
        let polls = Rc::clone(&self.polls);
        let mut script = Box::pin(script);
        let handle = self.local.spawn_local(future::poll_fn(move |cx| {
            polls.set(polls.get() + 1);
            script.as_mut().poll(cx)
        }));

        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle.abort_handle());
        tracing::debug!(live = tasks.len(), "script spawned");
        handle
    }

    /// Scripts spawned through [`spawn`](Self::spawn) that have not
    /// finished. Scripts stuck on an abandoned glide count as live.
    pub fn live_tasks(&self) -> usize {
        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|task| !task.is_finished());
        tasks.len()
    }

    /// Create a sprite connected to this runtime's render loop.
    pub fn sprite(&self) -> Sprite {
        self.sprite_with(SpriteConfig::default())
    }

    /// Create a connected sprite from explicit settings.
    ///
    /// The runtime's bounds apply, and its seed when `config` has none.
    pub fn sprite_with(&self, config: SpriteConfig) -> Sprite {
        let index = self.sprites.get();
        self.sprites.set(index + 1);

        let sprite = Sprite::with_config(SpriteConfig {
            bounds: self.config.bounds,
            seed: config
                .seed
                .or_else(|| self.config.seed.map(|seed| seed.wrapping_add(index))),
            ..config
        });
        sprite.connect(self.render.clone());
        sprite
    }

    /// Create a stage connected to this runtime's render loop.
    pub fn stage(&self) -> Stage {
        let stage = Stage::with_poll_interval(self.config.poll_interval);
        stage.connect(self.render.clone());
        stage
    }

    /// Drive one frame by hand: let scripts run, tick, and let the resumed
    /// scripts run. Returns the number of script polls made.
    ///
    /// Must not be called from inside another tokio runtime.
    pub fn step(&self) -> u64 {
        let before = self.polls.get();
        self.driver.block_on(self.local.run_until(async {
            settle(&self.polls).await;
            self.render.tick();
            settle(&self.polls).await;
        }));
        self.polls.get() - before
    }

    /// Run in real time until every script has finished or
    /// `max_frames` is reached.
    ///
    /// Must not be called from inside another tokio runtime.
    pub fn run(&self) -> RunReport {
        tracing::info!(fps = self.config.fps, "runtime started");
        let period = self.config.frame_interval();

        let (frames, finished, dropped_ticks) = self.driver.block_on(self.local.run_until(async {
            let mut ticks = time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last = ticks.tick().await;
            let mut frames = 0u64;
            let mut dropped = 0u64;

            let finished = loop {
                settle(&self.polls).await;
                if self.live_tasks() == 0 {
                    break true;
                }
                if self.config.max_frames.is_some_and(|max| frames >= max) {
                    break false;
                }

                let scheduled = ticks.tick().await;
                dropped += skipped_ticks(scheduled.duration_since(last), period);
                last = scheduled;
                tracing::trace!(frame = frames, "tick");
                self.render.tick();
                frames += 1;
            };
            (frames, finished, dropped)
        }));

        if dropped_ticks > 0 {
            tracing::warn!(dropped_ticks, "frames ran long; ticks were skipped");
        }
        tracing::info!(frames, finished, "runtime stopped");
        RunReport {
            frames,
            finished,
            dropped_ticks,
        }
    }
}

/// Yield to the local set until a full pass polls no script.
async fn settle(polls: &Cell<u64>) {
    loop {
        let before = polls.get();
        task::yield_now().await;
        if polls.get() == before {
            break;
        }
    }
}

/// Whole periods between two consecutive ticks, minus the one expected.
fn skipped_ticks(gap: Duration, period: Duration) -> u64 {
    let periods = gap.as_nanos() / period.as_nanos().max(1);
    u64::try_from(periods.saturating_sub(1)).unwrap_or(u64::MAX)
}
