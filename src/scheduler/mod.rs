//! Scheduler: The per-actor tick resolution protocol.
//!
//! Every actor embeds one `ActionScheduler`. Commands queue a continuation
//! with [`ActionScheduler::await_next_tick`]; the actor's tick handler drains
//! the queue once per tick and advances the single glide slot by one step.
//!
//! # Tick resolution
//!
//! ```text
//!  tick K fires
//!     │
//!     ├─ 1. take the pending queue (new waits land in tick K+1)
//!     ├─ 2. advance the glide slot by one step (maybe retiring it)
//!     └─ 3. resolve the taken continuations in FIFO order,
//!           then the retired glide's resolver
//! ```

mod continuation;
mod glide;

pub use continuation::{continuation, NextTick, Resolver};
pub use glide::{GlidePlan, Interpolation};

#[cfg(test)]
pub(crate) use continuation::test_support;

use crate::geometry::Point;
use std::mem;

/// What happens to a glide's waiting script when a newer glide replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlideReplacement {
    /// Drop the superseded glide's resolver. The script that started it
    /// never resumes.
    #[default]
    Abandon,
    /// Resolve the superseded glide at once, where it stopped.
    Resolve,
}

/// FIFO of waiting continuations plus the single interpolation slot.
#[derive(Debug, Default)]
pub struct ActionScheduler {
    /// Resolvers waiting for the next tick, in call order.
    pending: Vec<Resolver>,
    /// The glide in flight, if any.
    interpolation: Option<Interpolation>,
    /// Policy for glides that get replaced before finishing.
    replacement: GlideReplacement,
}

impl ActionScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a continuation for the next tick.
    pub fn await_next_tick(&mut self) -> NextTick {
        let (resolver, wait) = continuation();
        self.pending.push(resolver);
        wait
    }

    /// Number of continuations waiting for the next tick.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// The glide in flight, if any.
    #[inline]
    pub const fn interpolation(&self) -> Option<&Interpolation> {
        self.interpolation.as_ref()
    }

    /// Check whether a glide is in flight.
    #[inline]
    pub const fn is_gliding(&self) -> bool {
        self.interpolation.is_some()
    }

    /// Current replacement policy.
    #[inline]
    pub const fn replacement(&self) -> GlideReplacement {
        self.replacement
    }

    /// Change the replacement policy for future glides.
    pub fn set_replacement(&mut self, policy: GlideReplacement) {
        self.replacement = policy;
    }

    /// Put a glide into the slot.
    ///
    /// A glide already in flight is replaced. Depending on the policy its
    /// resolver is either dropped or returned so the caller can resolve it
    /// once no state is borrowed.
    pub fn arm(&mut self, glide: Interpolation) -> Option<Resolver> {
        let previous = self.interpolation.replace(glide)?;
        self.supersede(previous)
    }

    /// Empty the slot without arming a new glide, under the same policy
    /// as [`ActionScheduler::arm`].
    pub fn cancel(&mut self) -> Option<Resolver> {
        let previous = self.interpolation.take()?;
        self.supersede(previous)
    }

    fn supersede(&self, previous: Interpolation) -> Option<Resolver> {
        match self.replacement {
            GlideReplacement::Abandon => {
                tracing::trace!(
                    step = previous.step(),
                    total = previous.total(),
                    "glide replaced; its waiter is abandoned"
                );
                None
            }
            GlideReplacement::Resolve => Some(previous.into_resolver()),
        }
    }

    /// Run one tick of the protocol against `position`.
    ///
    /// Returns every resolver that is due, in the order it must be resolved.
    /// The caller resolves them after releasing its own borrows.
    pub fn tick(&mut self, position: Option<&mut Point>) -> Vec<Resolver> {
        let mut due = mem::take(&mut self.pending);

        if let Some(position) = position {
            if let Some(glide) = self.interpolation.take() {
                match glide.advance(position) {
                    Ok(glide) => self.interpolation = Some(glide),
                    Err(resolver) => due.push(resolver),
                }
            }
        }

        due
    }
}
