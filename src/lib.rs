//! This library times two implementations of the same stream transformation, doubling every element of a
//! numeric sequence, and reports how they compare.
//!
//! - The *standard* transformation, [`process_stream`], pays a simulated cost for every element through an
//!   injectable [`Delay`].
//! - The *optimized* transformation, [`process_stream_fused`], maps the whole sequence in one pass and is
//!   wrapped with [`fuse`], so calling it returns the output together with its elapsed time.
//!
//! [`compare`] runs both over one [`SampleSequence`] and produces a [`Comparison`] holding both elapsed
//! times, the [`Speedup`], and a two-bar chart. [`run_trials`] repeats that and summarizes the elapsed times
//! with [hdrhistogram](https://crates.io/crates/hdrhistogram) histograms, while [`StageTimer`] collects the
//! same information from the [tracing](https://crates.io/crates/tracing) spans the transformations emit.
//! [`render_cycle`] lays the results out on a [`DemoHost`].
//!
//! ```rust
//! use stream_fusion::{compare, process_stream_fused, ComparisonCfg, NoDelay, SampleSequence, Speedup};
//!
//! let (doubled, secs) = process_stream_fused(&[1.0, 2.0, 3.0]).into_parts();
//! assert_eq!(doubled, vec![2.0, 4.0, 6.0]);
//! assert!(secs >= 0.0);
//!
//! let sample = SampleSequence::from_values(vec![1.0, 2.0, 3.0]);
//! let comparison = compare(&sample, &ComparisonCfg::default(), &NoDelay);
//! assert_eq!(comparison.len, 3);
//!
//! let empty = SampleSequence::from_values(vec![]);
//! let comparison = compare(&empty, &ComparisonCfg::default(), &NoDelay);
//! assert_eq!(comparison.speedup, Speedup::NotApplicable);
//! ```
#![deny(clippy::unwrap_used)]

mod error;
pub use error::*;

mod timed;
pub use timed::*;

mod delay;
pub use delay::*;

mod stream;
pub use stream::*;

mod sample;
pub use sample::*;

mod compare;
pub use compare::*;

mod summary_stats;
pub use summary_stats::{summary_stats, SummaryStats, Timing, Timings};

mod trials;
pub use trials::*;

mod stage_timer;
pub use stage_timer::*;

mod host;
pub use host::*;

mod wrapper;
pub use wrapper::*;
