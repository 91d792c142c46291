//! Cooperative scheduling primitives shared by the grid and export passes.
//!
//! Passes are single-threaded. They never block or spawn; instead they call back into a
//! [`PassHost`] at fixed checkpoints: after a throttled progress update, and at row boundaries.
//! The host decides what "suspend" means (yield the thread, pump an event loop, resume a fiber).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::core::CapabilityTier;

/// Host-side hooks polled by long-running passes.
pub trait PassHost {
    /// Receive an overall progress fraction in `[0, 1]`. Non-decreasing within a pass.
    fn report_progress(&mut self, fraction: f64);

    /// Polled at row and block checkpoints.
    fn is_cancelled(&self) -> bool;

    /// Hand control back to the host before the pass continues.
    fn suspend(&mut self);
}

/// Host that ignores progress, never cancels and never yields.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl PassHost for NullHost {
    fn report_progress(&mut self, _fraction: f64) {}

    fn is_cancelled(&self) -> bool {
        false
    }

    fn suspend(&mut self) {}
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Host built from a progress closure, with an optional [`CancelToken`].
///
/// `suspend` yields the current OS thread and counts how often it was asked to.
pub struct CallbackHost<P: FnMut(f64)> {
    on_progress: P,
    cancel: Option<CancelToken>,
    suspends: u64,
}

impl<P: FnMut(f64)> CallbackHost<P> {
    pub fn new(on_progress: P) -> Self {
        Self {
            on_progress,
            cancel: None,
            suspends: 0,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn suspend_count(&self) -> u64 {
        self.suspends
    }
}

impl<P: FnMut(f64)> PassHost for CallbackHost<P> {
    fn report_progress(&mut self, fraction: f64) {
        (self.on_progress)(fraction);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    fn suspend(&mut self) {
        self.suspends += 1;
        std::thread::yield_now();
    }
}

/// Sub-range of the overall progress scale that one pass reports into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressRange {
    pub start: f64,
    pub end: f64,
}

impl ProgressRange {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };
    /// Grid build half of a combined "generate and export" run.
    pub const GRID_PHASE: Self = Self {
        start: 0.0,
        end: 0.5,
    };
    /// Export render half of a combined "generate and export" run.
    pub const EXPORT_PHASE: Self = Self {
        start: 0.5,
        end: 1.0,
    };

    /// Map `done / total` into the range. `done == total` yields exactly `end`.
    pub fn at(self, done: u64, total: u64) -> f64 {
        if total == 0 || done >= total {
            return self.end;
        }
        self.start + (self.end - self.start) * (done as f64 / total as f64)
    }
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// Limits how often a pass reports progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressThrottle {
    every: u64,
    total: u64,
}

impl ProgressThrottle {
    pub const CONSTRAINED_TARGET_UPDATES: u64 = 200;
    pub const UNCONSTRAINED_TARGET_UPDATES: u64 = 500;

    pub fn for_tier(total: u64, tier: CapabilityTier) -> Self {
        let target = if tier.is_constrained() {
            Self::CONSTRAINED_TARGET_UPDATES
        } else {
            Self::UNCONSTRAINED_TARGET_UPDATES
        };
        Self::with_target(total, target)
    }

    pub fn with_target(total: u64, target_updates: u64) -> Self {
        let every = (total / target_updates.max(1)).max(1);
        Self { every, total }
    }

    pub fn every(&self) -> u64 {
        self.every
    }

    /// Report on every `every`-th unit and always on the last one.
    pub fn should_report(&self, done: u64) -> bool {
        done == self.total || done.is_multiple_of(self.every)
    }
}

/// Couples a range and a throttle, keeps reported values monotonic, and suspends after every
/// report.
#[derive(Debug)]
pub(crate) struct ProgressReporter {
    range: ProgressRange,
    throttle: ProgressThrottle,
    total: u64,
    last: f64,
}

impl ProgressReporter {
    pub(crate) fn new(range: ProgressRange, throttle: ProgressThrottle, total: u64) -> Self {
        Self {
            range,
            throttle,
            total,
            last: range.start,
        }
    }

    pub(crate) fn begin(&mut self, host: &mut dyn PassHost) {
        host.report_progress(self.range.start);
    }

    /// Throttled report for `done` units. Returns whether the host was notified.
    pub(crate) fn step(&mut self, done: u64, host: &mut dyn PassHost) -> bool {
        if !self.throttle.should_report(done) {
            return false;
        }
        self.force(done, host);
        true
    }

    /// Unthrottled report for `done` units.
    pub(crate) fn force(&mut self, done: u64, host: &mut dyn PassHost) {
        let fraction = self.range.at(done, self.total).max(self.last);
        self.last = fraction;
        host.report_progress(fraction);
        host.suspend();
    }
}

#[cfg(test)]
#[path = "../tests/unit/schedule.rs"]
mod tests;
