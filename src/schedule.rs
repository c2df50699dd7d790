//! Periodic trigger — invokes a callback once per calendar-unit boundary.
//!
//! One background thread per trigger. The wait is a channel
//! `recv_timeout`, so cancellation wakes a pending wait immediately, and
//! each cycle runs the callback to completion before computing the next
//! boundary: invocations of one trigger never overlap, and a slow
//! callback simply delays the following cycle.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Timelike};
use log::trace;

/// Calendar unit whose boundaries drive the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Second,
    Minute,
    Hour,
}

/// Time remaining until the next `unit` boundary after `now`.
///
/// Always positive: exactly on a boundary the result is one full unit.
pub fn delay_until_next(unit: Unit, now: DateTime<Local>) -> Duration {
    let (step, truncated) = match unit {
        Unit::Second => (TimeDelta::seconds(1), now.with_nanosecond(0)),
        Unit::Minute => (
            TimeDelta::minutes(1),
            now.with_nanosecond(0).and_then(|t| t.with_second(0)),
        ),
        Unit::Hour => (
            TimeDelta::hours(1),
            now.with_nanosecond(0)
                .and_then(|t| t.with_second(0))
                .and_then(|t| t.with_minute(0)),
        ),
    };
    // with_* fails only for out-of-range values; zero is always in range
    let start = truncated.unwrap_or(now);
    (start + step - now).to_std().unwrap_or(Duration::ZERO)
}

/// A cancellable once-per-boundary callback loop.
pub struct PeriodicTrigger {
    cancel_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTrigger {
    /// Spawn the trigger thread.
    ///
    /// When `immediate` is set the callback runs once before the first
    /// wait. Each subsequent invocation happens just after a `unit`
    /// boundary; the next boundary is computed only after the callback
    /// returns, so drift accumulates by callback execution time alone.
    pub fn start<F>(unit: Unit, immediate: bool, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            if immediate {
                callback();
            }
            loop {
                let delay = delay_until_next(unit, Local::now());
                trace!("schedule: next {unit:?} boundary in {delay:?}");
                match cancel_rx.recv_timeout(delay) {
                    Err(mpsc::RecvTimeoutError::Timeout) => callback(),
                    // Cancelled, or the trigger handle was leaked away
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self {
            cancel_tx,
            handle: Some(handle),
        }
    }

    /// Cancel the trigger and wait for the thread to finish.
    ///
    /// Idempotent: safe to call repeatedly, and safe while no wait is
    /// pending (the cancel message is consumed before the next wait
    /// could fire). No callback invocation happens after this returns.
    pub fn cancel(&mut self) {
        // send fails only when the thread already exited
        let _ = self.cancel_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PeriodicTrigger {
    fn drop(&mut self) {
        self.cancel();
    }
}
