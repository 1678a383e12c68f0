//! Cooperative cancellation for long-running comparisons.
//!
//! Every unbounded loop in the engine (line scanning, normalization,
//! equality, alignment, rendering) consults a [`CancelGuard`] that wraps a
//! caller-supplied [`CancelSignal`]. The guard samples the signal at a fixed
//! tick interval so cancellation latency stays bounded by the interval, not
//! by the input size. Cancellation is advisory: a stage observing it stops
//! emitting and returns [`Cancelled`]; output already written stays written.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

const CANCEL_CHECK_EVERY_TICKS: u64 = 256;

/// Externally driven abort signal, polled by the engine.
///
/// Implementations must be cheap to query; the guard already throttles how
/// often the query happens.
pub trait CancelSignal: Send {
    fn is_cancelled(&self) -> bool;
}

/// Signal that never fires. The default for callers without a deadline.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Wall-clock deadline signal.
#[derive(Debug, Clone, Copy)]
pub struct DeadlineCancel {
    deadline: Instant,
}

impl DeadlineCancel {
    pub fn after(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    pub fn at(deadline: Instant) -> Self {
        Self { deadline }
    }
}

impl CancelSignal for DeadlineCancel {
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Shared flag signal; clone the handle and call [`CancelFlag::cancel`] from
/// another thread to abort a running comparison.
#[derive(Debug, Default, Clone)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl CancelSignal for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Error value returned by a stage that observed cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Per-invocation polling state.
///
/// `check` is called once per loop iteration; the underlying signal is only
/// queried on the first tick and every [`CANCEL_CHECK_EVERY_TICKS`]th tick
/// after that. Once cancellation is observed the guard latches and every
/// later call fails immediately.
pub struct CancelGuard<'a> {
    signal: &'a dyn CancelSignal,
    tick: u64,
    cancelled: bool,
}

impl<'a> CancelGuard<'a> {
    pub fn new(signal: &'a dyn CancelSignal) -> Self {
        Self {
            signal,
            tick: 0,
            cancelled: false,
        }
    }

    pub fn check(&mut self) -> Result<(), Cancelled> {
        if self.cancelled {
            return Err(Cancelled);
        }

        self.tick = self.tick.saturating_add(1);
        let should_check = self.tick == 1 || self.tick % CANCEL_CHECK_EVERY_TICKS == 0;
        if !should_check {
            return Ok(());
        }

        self.poll()
    }

    /// Queries the signal immediately, bypassing tick sampling. Used between
    /// stages so a cancellation raised mid-stage is seen before the next one
    /// starts.
    pub fn poll(&mut self) -> Result<(), Cancelled> {
        if self.cancelled {
            return Err(Cancelled);
        }
        if self.signal.is_cancelled() {
            self.cancelled = true;
            return Err(Cancelled);
        }
        Ok(())
    }
}
