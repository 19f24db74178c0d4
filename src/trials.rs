//! Repeated comparisons, with elapsed times collected in histograms.

use crate::{
    compare::{compare, validate_trials, OPTIMIZED_LABEL, STANDARD_LABEL},
    delay::Delay,
    summary_stats::{micros, new_timing, summary_stats},
    ComparisonCfg, DataSize, FusionError, SampleSequence, Speedup, SummaryStats, Timing, Timings,
};
use std::{collections::BTreeMap, time::Duration};

/// Outcome of [`run_trials`].
#[derive(Debug, Clone)]
pub struct TrialReport {
    /// Elapsed-time histograms keyed by [`STANDARD_LABEL`] and [`OPTIMIZED_LABEL`].
    pub timings: Timings,
    /// Speedup computed from the mean elapsed times.
    pub speedup: Speedup,
}

impl TrialReport {
    pub fn standard(&self) -> SummaryStats {
        summary_stats(&self.timings[STANDARD_LABEL])
    }

    pub fn optimized(&self) -> SummaryStats {
        summary_stats(&self.timings[OPTIMIZED_LABEL])
    }
}

fn record(hist: &mut Timing, elapsed: Duration) {
    hist.record(micros(elapsed))
        .expect("should not happen given auto-resizing histogram");
}

/// Runs `cfg.trials()` comparisons, each over a freshly generated sample of `size` values. When `cfg` has a
/// seed `s`, trial `i` uses seed `s + i`.
///
/// # Errors
/// - [`FusionError::InvalidArgument`] if `cfg.trials()` is zero.
/// - [`FusionError::HistogramConfig`] if the histogram settings in `cfg` are unusable.
pub fn run_trials<D>(
    size: DataSize,
    cfg: &ComparisonCfg,
    delay: &D,
) -> Result<TrialReport, FusionError>
where
    D: Delay + ?Sized,
{
    validate_trials(cfg)?;
    cfg.validate_hist_high_sigfig()?;

    let mut standard = new_timing(cfg.hist_high, cfg.hist_sigfig);
    let mut optimized = new_timing(cfg.hist_high, cfg.hist_sigfig);

    for i in 0..cfg.trials {
        let seed = cfg.seed.map(|s| s.wrapping_add(i as u64));
        let sample = SampleSequence::generate(size, seed);
        let comparison = compare(&sample, cfg, delay);
        log::trace!("trial {i}: {:?}", comparison);
        record(&mut standard, comparison.standard);
        record(&mut optimized, comparison.optimized);
    }

    let speedup = Speedup::between_secs(standard.mean(), optimized.mean());
    let timings: Timings =
        BTreeMap::from([(STANDARD_LABEL, standard), (OPTIMIZED_LABEL, optimized)]).into();

    log::debug!("completed {} trials, speedup {}", cfg.trials, speedup);
    Ok(TrialReport { timings, speedup })
}
