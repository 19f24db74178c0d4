//! Simulated per-element processing cost.

use std::{thread, time::Duration};

/// Device that simulates the cost of processing one element.
///
/// Production code uses [`Sleep`], which blocks the calling thread. Tests can substitute an implementation
/// that records calls without sleeping, keeping timing-independent assertions free of wall-clock noise.
pub trait Delay {
    fn pause(&self, duration: Duration);
}

/// Blocks the current thread for the requested duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sleep;

impl Delay for Sleep {
    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn pause(&self, _duration: Duration) {}
}
