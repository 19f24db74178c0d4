//! Timing instrumentation for single computations and single-argument functions.

use std::time::{Duration, Instant};

/// Result of a timed computation: the computation's own value and the wall-clock time it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Splits `self` into the pair `(value, elapsed_seconds)`.
    pub fn into_parts(self) -> (T, f64) {
        let secs = self.elapsed_secs();
        (self.value, secs)
    }
}

impl<T> From<Timed<T>> for (T, f64) {
    fn from(timed: Timed<T>) -> Self {
        timed.into_parts()
    }
}

/// Executes `f` and returns its result together with the time elapsed from immediately before the call to
/// immediately after it returns, measured with the monotonic clock.
///
/// If `f` panics, the panic propagates and no timing is produced.
pub fn timed<R>(f: impl FnOnce() -> R) -> Timed<R> {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    log::trace!("timed computation completed in {:?}", elapsed);
    Timed { value, elapsed }
}

/// Wraps the single-argument function `f` so that invoking the wrapper returns `f`'s result along with
/// its elapsed time. See [`Fused`].
pub fn fuse<F>(f: F) -> Fused<F> {
    Fused(f)
}

/// Single-argument function wrapped with timing instrumentation. Created by [`fuse`].
///
/// The wrapped function receives exactly the argument passed to [`Fused::call`]; its behavior is not
/// altered in any way.
#[derive(Debug, Clone, Copy)]
pub struct Fused<F>(F);

impl<F> Fused<F> {
    /// Invokes the wrapped function with `arg`, timing the invocation.
    pub fn call<A, R>(&self, arg: A) -> Timed<R>
    where
        F: Fn(A) -> R,
    {
        timed(|| (self.0)(arg))
    }

    /// Invokes a wrapped fallible function with `arg`, timing the invocation.
    ///
    /// An `Err` returned by the wrapped function is passed through unchanged and no timing is produced.
    pub fn try_call<A, R, E>(&self, arg: A) -> Result<Timed<R>, E>
    where
        F: Fn(A) -> Result<R, E>,
    {
        let Timed { value, elapsed } = timed(|| (self.0)(arg));
        value.map(|value| Timed { value, elapsed })
    }
}
