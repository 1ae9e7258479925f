//! Focus advancement: moving editing focus to a row that the presentation
//! may not have materialized yet.
//!
//! After a structural mutation the target row often needs a scroll or layout
//! pass before it can accept focus. The advancer tries once immediately,
//! asks the presentation to reveal the row, then retries on a fixed interval
//! until it succeeds or the attempts are exhausted. Only one retry sequence
//! is ever active; a new request supersedes any pending one
//! (last-request-wins), enforced by a generation counter rather than by
//! cancelling timers.
//!
//! The advancer never sleeps: the host drives it by polling
//! [`next_deadline`](FocusAdvancer::next_deadline) and calling
//! [`on_tick`](FocusAdvancer::on_tick) with its own clock, which keeps tests
//! deterministic.

use std::time::{Duration, Instant};

/// Interval between focus attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

/// The presentation-side receiver of focus requests.
pub trait FocusTarget {
    /// Attempt to give editing focus to the row at `position`.
    /// Returns false when the row is not materialized yet.
    fn try_focus(&mut self, position: usize) -> bool;

    /// Ask the presentation to scroll the row at `position` into view.
    fn reveal(&mut self, position: usize);
}

#[derive(Debug, Clone)]
struct Pending {
    position: usize,
    remaining: u32,
    generation: u64,
    due_at: Instant,
}

/// Bounded-retry focus scheduler.
#[derive(Debug)]
pub struct FocusAdvancer {
    interval: Duration,
    generation: u64,
    pending: Option<Pending>,
}

impl Default for FocusAdvancer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusAdvancer {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_RETRY_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            pending: None,
        }
    }

    /// Request focus on `position`, superseding any pending sequence.
    ///
    /// Returns true when focus landed immediately. Otherwise the target is
    /// revealed and up to `max(max_retries, 1)` retries are scheduled,
    /// starting one interval after `now`.
    pub fn request_focus(
        &mut self,
        position: usize,
        max_retries: u32,
        target: &mut dyn FocusTarget,
        now: Instant,
    ) -> bool {
        self.generation += 1;
        self.pending = None;

        if target.try_focus(position) {
            tracing::debug!(position, "focus landed immediately");
            return true;
        }

        target.reveal(position);
        self.pending = Some(Pending {
            position,
            remaining: max_retries.max(1),
            generation: self.generation,
            due_at: now + self.interval,
        });
        tracing::debug!(position, retries = max_retries.max(1), "focus retry scheduled");
        false
    }

    /// When the host should next call [`on_tick`], if a retry is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Invalidate any pending retry sequence.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Run one due retry. Returns true when focus landed on this tick.
    ///
    /// Ticks before the deadline are ignored, as is a pending entry whose
    /// generation no longer matches (superseded sequence).
    pub fn on_tick(&mut self, now: Instant, target: &mut dyn FocusTarget) -> bool {
        let Some(pending) = self.pending.clone() else {
            return false;
        };
        if pending.generation != self.generation {
            self.pending = None;
            return false;
        }
        if now < pending.due_at {
            return false;
        }

        if target.try_focus(pending.position) {
            tracing::debug!(position = pending.position, "focus landed on retry");
            self.pending = None;
            return true;
        }

        let remaining = pending.remaining - 1;
        if remaining == 0 {
            tracing::debug!(position = pending.position, "focus retries exhausted");
            self.pending = None;
        } else {
            self.pending = Some(Pending {
                remaining,
                due_at: now + self.interval,
                ..pending
            });
        }
        false
    }
}
