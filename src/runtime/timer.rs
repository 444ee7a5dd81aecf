//! Timers: Wall-clock waits for scripts, on tokio's timer wheel.
//!
//! Both futures capture what they need when they are created and only touch
//! tokio when first polled, so building a wait outside a runtime is fine.
//! Polling one that is not already complete needs a tokio runtime with the
//! time driver enabled.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest interval a polling wait re-checks at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Future returned by `wait_seconds`.
///
/// The clock starts when the sleep is created, not at the first poll.
#[derive(Debug)]
pub struct Sleep {
    /// `None` when the deadline does not fit in an `Instant`; such sleeps
    /// never complete.
    deadline: Option<Instant>,
    timer: Option<Pin<Box<time::Sleep>>>,
}

impl Sleep {
    /// A sleep that completes once `duration` has passed.
    pub fn new(duration: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(duration),
            timer: None,
        }
    }

    /// When the sleep completes, if ever.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(deadline) = this.deadline else {
            return Poll::Pending;
        };
        if this.timer.is_none() && deadline <= Instant::now() {
            return Poll::Ready(());
        }
        this.timer
            .get_or_insert_with(|| Box::pin(time::sleep_until(deadline)))
            .as_mut()
            .poll(cx)
    }
}

/// Future returned by `wait_until`: checks a predicate at once, then on
/// every tick of a [`tokio::time::Interval`].
pub struct WaitUntil {
    done: bool,
    checks: Pin<Box<dyn Future<Output = ()>>>,
}

impl WaitUntil {
    /// Build the wait. `predicate` runs once right here.
    ///
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it. Late checks
    /// are delayed rather than bunched up.
    pub fn new(interval: Duration, mut predicate: impl FnMut() -> bool + 'static) -> Self {
        let done = predicate();
        let period = interval.max(MIN_POLL_INTERVAL);
        let checks = Box::pin(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if predicate() {
                    break;
                }
            }
        });
        Self { done, checks }
    }

    /// Whether the predicate has returned `true`.
    pub const fn is_done(&self) -> bool {
        self.done
    }
}

impl fmt::Debug for WaitUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitUntil").field("done", &self.done).finish_non_exhaustive()
    }
}

impl Future for WaitUntil {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.done {
            return Poll::Ready(());
        }
        let poll = self.checks.as_mut().poll(cx);
        if poll.is_ready() {
            self.done = true;
        }
        poll
    }
}
