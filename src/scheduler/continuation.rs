//! Continuations: one-shot resume handles for suspended scripts.
//!
//! A continuation is split in two halves sharing a single slot:
//!
//! ```text
//! ┌──────────────┐   resolve(self)   ┌──────────┐   poll   ┌──────────────┐
//! │   Resolver   │ ────────────────▶ │   Slot   │ ◀─────── │   NextTick   │
//! │ (scheduler)  │                   │ resolved │          │  (script)    │
//! └──────────────┘                   │  waker   │          └──────────────┘
//!                                    └──────────┘
//! ```
//!
//! `Resolver::resolve` consumes the resolver, so a continuation resolves at
//! most once. Dropping a resolver without resolving it abandons the waiting
//! script: its `NextTick` stays pending forever.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct Slot {
    resolved: bool,
    waker: Option<Waker>,
}

/// Create a linked resolver / future pair.
pub fn continuation() -> (Resolver, NextTick) {
    let slot = Rc::new(RefCell::new(Slot::default()));
    (
        Resolver {
            slot: Rc::clone(&slot),
        },
        NextTick {
            state: State::Waiting(slot),
        },
    )
}

/// The scheduler-side half of a continuation.
pub struct Resolver {
    slot: Rc<RefCell<Slot>>,
}

impl Resolver {
    /// Mark the continuation as resolved and wake the waiting script.
    pub fn resolve(self) {
        let waker = {
            let mut slot = self.slot.borrow_mut();
            slot.resolved = true;
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// Check whether anyone is still holding the script-side half.
    pub fn is_observed(&self) -> bool {
        Rc::strong_count(&self.slot) > 1
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("observed", &self.is_observed())
            .finish()
    }
}

enum State {
    Ready,
    Waiting(Rc<RefCell<Slot>>),
}

/// A future that completes when its continuation is resolved.
///
/// Returned by every command that may suspend. Commands that do not need to
/// wait (screen refresh disabled, zero-length glides) hand out an already
/// completed `NextTick`.
#[must_use = "commands take effect immediately, but the script only stays in step with the frame if it awaits"]
pub struct NextTick {
    state: State,
}

impl NextTick {
    /// A `NextTick` that is already complete.
    pub const fn ready() -> Self {
        Self {
            state: State::Ready,
        }
    }

    /// Check whether awaiting this would complete without suspending.
    pub fn is_ready(&self) -> bool {
        match &self.state {
            State::Ready => true,
            State::Waiting(slot) => slot.borrow().resolved,
        }
    }
}

impl Future for NextTick {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let State::Waiting(slot) = &self.state else {
            return Poll::Ready(());
        };
        {
            let mut slot = slot.borrow_mut();
            if !slot.resolved {
                match &slot.waker {
                    Some(waker) if waker.will_wake(cx.waker()) => {}
                    _ => slot.waker = Some(cx.waker().clone()),
                }
                return Poll::Pending;
            }
        }
        self.state = State::Ready;
        Poll::Ready(())
    }
}

impl fmt::Debug for NextTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextTick")
            .field("ready", &self.is_ready())
            .finish()
    }
}
