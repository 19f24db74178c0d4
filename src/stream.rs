//! The two stream transformations being compared. Both double every element of the input; they differ only
//! in how they get there.

use crate::{delay::Delay, timed::fuse, Timed};
use std::{ops::Add, time::Duration};
use tracing::{instrument, trace_span};

/// Per-element delay used by [`process_stream`] unless configured otherwise.
pub const DEFAULT_PER_ELEMENT_DELAY: Duration = Duration::from_millis(10);

/// Doubles each element of `data`, pausing for `per_element` through `delay` before each element is
/// appended to the output.
#[instrument(level = "trace", skip_all, fields(len = data.len()))]
pub fn process_stream<T, D>(data: &[T], per_element: Duration, delay: &D) -> Vec<T>
where
    T: Copy + Add<Output = T>,
    D: Delay + ?Sized,
{
    let mut result = Vec::new();
    for &item in data {
        // Simulated work
        delay.pause(per_element);
        result.push(item + item);
    }
    result
}

fn double_all<T>(data: &[T]) -> Vec<T>
where
    T: Copy + Add<Output = T>,
{
    data.iter().map(|&item| item + item).collect()
}

/// Doubles each element of `data` in a single pass with no simulated cost, returning the output along with
/// the time it took.
pub fn process_stream_fused<T>(data: &[T]) -> Timed<Vec<T>>
where
    T: Copy + Add<Output = T>,
{
    let _span = trace_span!("process_stream_fused", len = data.len()).entered();
    fuse(double_all::<T>).call(data)
}
