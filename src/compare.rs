//! Measurement orchestration: runs both stream transformations over the same sample and reports how they
//! compare.

use crate::{
    delay::{Delay, Sleep},
    stream::{process_stream, process_stream_fused, DEFAULT_PER_ELEMENT_DELAY},
    timed::timed,
    FusionError, SampleSequence,
};
use hdrhistogram::CreationError;
use std::{fmt::Display, time::Duration};

//==============
// ComparisonCfg

/// Configuration for [`compare`] and [`run_trials`](crate::run_trials). It is instantiated with its
/// [`ComparisonCfg::default`] method and can be customized with its other methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonCfg {
    pub(crate) per_element_delay: Duration,
    pub(crate) seed: Option<u64>,
    pub(crate) trials: usize,
    pub(crate) hist_high: u64,
    pub(crate) hist_sigfig: u8,
}

impl Default for ComparisonCfg {
    /// Instantiates a default [`ComparisonCfg`]. The defaults are:
    /// - a per-element delay of 10 milliseconds;
    /// - no seed, so samples differ from run to run;
    /// - a single trial;
    /// - `hist_high` of `20,000,000` (20 seconds) and `hist_sigfig` of 2 for trial histograms, which are
    ///   auto-resizable.
    fn default() -> Self {
        Self {
            per_element_delay: DEFAULT_PER_ELEMENT_DELAY,
            seed: None,
            trials: 1,
            hist_high: 20 * 1000 * 1000,
            hist_sigfig: 2,
        }
    }
}

impl ComparisonCfg {
    /// Creates a new [`ComparisonCfg`] the same as `self` but with the given per-element delay for the
    /// unoptimized transformation.
    pub fn with_per_element_delay(&self, per_element_delay: Duration) -> Self {
        Self {
            per_element_delay,
            ..self.clone()
        }
    }

    /// Creates a new [`ComparisonCfg`] the same as `self` but with the given sample seed.
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Creates a new [`ComparisonCfg`] the same as `self` but with the given number of trials.
    pub fn with_trials(&self, trials: usize) -> Self {
        Self {
            trials,
            ..self.clone()
        }
    }

    /// Creates a new [`ComparisonCfg`] the same as `self` but with the given `hist_high`
    /// (see [hdrhistogram::Histogram::high]).
    pub fn with_hist_high(&self, hist_high: u64) -> Self {
        Self {
            hist_high,
            ..self.clone()
        }
    }

    /// Creates a new [`ComparisonCfg`] the same as `self` but with the given `hist_sigfig`
    /// (see [hdrhistogram::Histogram::sigfig]).
    pub fn with_hist_sigfig(&self, hist_sigfig: u8) -> Self {
        Self {
            hist_sigfig,
            ..self.clone()
        }
    }

    pub fn per_element_delay(&self) -> Duration {
        self.per_element_delay
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Validates that the histogram settings can be used to construct `u64` histograms with a low of `1`.
    pub(crate) fn validate_hist_high_sigfig(&self) -> Result<(), CreationError> {
        let _ = hdrhistogram::Histogram::<u64>::new_with_bounds(1, self.hist_high, self.hist_sigfig)?;
        Ok(())
    }
}

//==============
// Speedup

/// Relative reduction in elapsed time of the optimized transformation versus the unoptimized one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speedup {
    /// `(standard - optimized) / standard * 100`.
    Percent(f64),
    /// The standard elapsed time was zero, so no ratio exists.
    NotApplicable,
}

impl Speedup {
    /// Computes the speedup of `optimized` relative to `standard`.
    pub fn between(standard: Duration, optimized: Duration) -> Self {
        Self::between_secs(standard.as_secs_f64(), optimized.as_secs_f64())
    }

    pub fn between_secs(standard: f64, optimized: f64) -> Self {
        if standard == 0.0 {
            return Self::NotApplicable;
        }
        Self::Percent((standard - optimized) / standard * 100.0)
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::Percent(p) => Some(*p),
            Self::NotApplicable => None,
        }
    }
}

impl Display for Speedup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p:.2}%"),
            Self::NotApplicable => f.write_str("n/a"),
        }
    }
}

//==============
// Comparison

/// One bar of a magnitude chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
}

/// Label of the unoptimized transformation in reports and charts.
pub const STANDARD_LABEL: &str = "Standard";

/// Label of the optimized transformation in reports and charts.
pub const OPTIMIZED_LABEL: &str = "Optimized";

/// Outcome of one [`compare`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub standard: Duration,
    pub optimized: Duration,
    pub speedup: Speedup,
    /// Number of elements each transformation produced.
    pub len: usize,
}

impl Comparison {
    pub fn standard_secs(&self) -> f64 {
        self.standard.as_secs_f64()
    }

    pub fn optimized_secs(&self) -> f64 {
        self.optimized.as_secs_f64()
    }

    /// The report's text lines: standard time, optimized time, and speedup.
    pub fn lines(&self) -> [String; 3] {
        [
            format!(
                "{STANDARD_LABEL} processing time: {:.4} seconds",
                self.standard_secs()
            ),
            format!(
                "{OPTIMIZED_LABEL} processing time: {:.4} seconds",
                self.optimized_secs()
            ),
            format!("Speedup: {}", self.speedup),
        ]
    }

    /// Two-category chart of elapsed seconds, standard first.
    pub fn chart(&self) -> [Bar; 2] {
        [
            Bar {
                label: STANDARD_LABEL,
                value: self.standard_secs(),
            },
            Bar {
                label: OPTIMIZED_LABEL,
                value: self.optimized_secs(),
            },
        ]
    }
}

/// Runs the unoptimized transformation (timed from outside) and the self-timing optimized transformation
/// over `sample`, pausing through `delay` for each element of the unoptimized run.
///
/// The speedup is [`Speedup::NotApplicable`] when `sample` is empty or the unoptimized run took no
/// measurable time.
pub fn compare<D>(sample: &SampleSequence, cfg: &ComparisonCfg, delay: &D) -> Comparison
where
    D: Delay + ?Sized,
{
    log::debug!(
        "comparing over {} values with per-element delay {:?}",
        sample.len(),
        cfg.per_element_delay
    );

    let standard = timed(|| process_stream(sample.values(), cfg.per_element_delay, delay));
    let optimized = process_stream_fused(sample.values());

    debug_assert_eq!(standard.value.len(), optimized.value.len());

    // An empty sample only measures clock overhead, which is not a processing time.
    let speedup = if sample.is_empty() {
        Speedup::NotApplicable
    } else {
        Speedup::between(standard.elapsed, optimized.elapsed)
    };

    let comparison = Comparison {
        standard: standard.elapsed,
        optimized: optimized.elapsed,
        speedup,
        len: optimized.value.len(),
    };
    log::debug!("comparison result: {:?}", comparison);
    comparison
}

/// [`compare`] with the default configuration and a real sleeping delay.
pub fn compare_default(sample: &SampleSequence) -> Comparison {
    compare(sample, &ComparisonCfg::default(), &Sleep)
}

/// Validates that `trials` is usable.
pub(crate) fn validate_trials(cfg: &ComparisonCfg) -> Result<(), FusionError> {
    if cfg.trials == 0 {
        return Err(FusionError::InvalidArgument(
            "number of trials must be at least 1".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_guarded_against_zero() {
        assert_eq!(
            Speedup::between(Duration::ZERO, Duration::from_micros(3)),
            Speedup::NotApplicable
        );
        assert_eq!(Speedup::between_secs(0.0, 0.0).percent(), None);
        assert_eq!(Speedup::NotApplicable.to_string(), "n/a");
    }

    #[test]
    fn test_speedup_percent() {
        let s = Speedup::between(Duration::from_secs(4), Duration::from_secs(1));
        assert_eq!(s, Speedup::Percent(75.0));
        assert_eq!(s.to_string(), "75.00%");

        let slower = Speedup::between_secs(1.0, 1.5);
        assert_eq!(slower.percent(), Some(-50.0));
    }

    #[test]
    fn test_report_formatting() {
        let c = Comparison {
            standard: Duration::from_millis(5012),
            optimized: Duration::from_micros(41),
            speedup: Speedup::between(Duration::from_millis(5012), Duration::from_micros(41)),
            len: 500,
        };
        let [standard, optimized, speedup] = c.lines();
        assert_eq!(standard, "Standard processing time: 5.0120 seconds");
        assert_eq!(optimized, "Optimized processing time: 0.0000 seconds");
        assert_eq!(speedup, "Speedup: 100.00%");

        let [b0, b1] = c.chart();
        assert_eq!(b0.label, "Standard");
        assert_eq!(b1.label, "Optimized");
        assert!((b0.value - 5.012).abs() < 1e-12);
    }

    #[test]
    fn test_cfg_builders() {
        let cfg = ComparisonCfg::default()
            .with_per_element_delay(Duration::from_millis(1))
            .with_seed(Some(3))
            .with_trials(4);
        assert_eq!(cfg.per_element_delay(), Duration::from_millis(1));
        assert_eq!(cfg.seed(), Some(3));
        assert_eq!(cfg.trials(), 4);
        assert!(cfg.validate_hist_high_sigfig().is_ok());
        assert!(cfg.with_hist_sigfig(9).validate_hist_high_sigfig().is_err());
        assert!(validate_trials(&cfg.with_trials(0)).is_err());
    }
}
