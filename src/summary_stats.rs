use crate::Wrapper;
use hdrhistogram::Histogram;
use std::{collections::BTreeMap, time::Duration};

/// Alias of [`Histogram<u64>`] holding elapsed times in **microseconds**.
pub type Timing = Histogram<u64>;

/// Mapping of labels (stage names or transformation labels) to the [`Timing`]s recorded for them; inherits
/// all [`BTreeMap`] methods.
pub type Timings = Wrapper<BTreeMap<&'static str, Timing>>;

impl Timings {
    /// Summary statistics by label.
    pub fn summaries(&self) -> Wrapper<BTreeMap<&'static str, SummaryStats>> {
        self.map_values(summary_stats)
    }
}

/// Constructs an auto-resizable [`Timing`]. The arguments correspond to [Histogram::high] and
/// [Histogram::sigfig], which the caller must have validated.
pub(crate) fn new_timing(hist_high: u64, hist_sigfig: u8) -> Timing {
    let mut hist = Histogram::<u64>::new_with_bounds(1, hist_high, hist_sigfig)
        .expect("histogram bounds validated before construction");
    hist.auto(true);
    hist
}

/// Whole microseconds in `elapsed`, saturating at [`u64::MAX`].
pub(crate) fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Common summary statistics of elapsed times, in microseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: u64,
    pub mean: f64,
    pub stdev: f64,
    pub min: u64,
    pub p5: u64,
    pub p25: u64,
    pub median: u64,
    pub p75: u64,
    pub p95: u64,
    pub max: u64,
}

impl SummaryStats {
    /// Computes summary statistics from the given histogram.
    pub fn new(hist: &Timing) -> Self {
        Self {
            count: hist.len(),
            mean: hist.mean(),
            stdev: hist.stdev(),
            min: hist.min(),
            p5: hist.value_at_quantile(0.05),
            p25: hist.value_at_quantile(0.25),
            median: hist.value_at_quantile(0.50),
            p75: hist.value_at_quantile(0.75),
            p95: hist.value_at_quantile(0.95),
            max: hist.max(),
        }
    }
}

/// Computes a [`SummaryStats`] from a [`Timing`].
pub fn summary_stats(hist: &Timing) -> SummaryStats {
    SummaryStats::new(hist)
}
