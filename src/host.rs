//! The demo host: the surfaces a comparison is presented on, and the render cycle that lays out the page.

use crate::{
    compare::{compare, Bar},
    delay::Delay,
    trials::run_trials,
    Comparison, ComparisonCfg, DataSize, FusionError, SampleSequence, Timings, TrialReport,
};
use std::io::Write;

pub const TITLE: &str = "Stream Processing Demo";

pub const INTRO: &str = "This demo simulates the performance difference between standard stream \
processing, which pays a fixed cost for every element, and an optimized version that fuses the work \
into a single timed pass.";

pub const NOTE: &str = "Note: this is a simplified simulation. In a real system the optimization would \
happen at a lower level, for example by fusing the stream stages at compile time.";

/// Output surfaces of an interactive demo page.
pub trait DemoHost {
    fn title(&mut self, title: &str) -> Result<(), FusionError>;

    fn text(&mut self, text: &str) -> Result<(), FusionError>;

    /// Renders a magnitude chart, one bar per category, in the given order.
    fn bar_chart(&mut self, bars: &[Bar]) -> Result<(), FusionError>;
}

/// Values of the host's input controls for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostInput {
    pub data_size: DataSize,
    /// Whether the "run comparison" trigger is asserted.
    pub run: bool,
}

/// Renders one cycle of the demo page on `host`.
///
/// A fresh sample of `input.data_size` values is generated on every cycle. The comparison runs exactly once,
/// and only if `input.run` is asserted; its result is rendered between the introduction and the closing
/// note and is also returned. When `cfg` asks for more than one trial, the trials summary follows the
/// comparison, still ahead of the note.
pub fn render_cycle<H, D>(
    host: &mut H,
    input: HostInput,
    cfg: &ComparisonCfg,
    delay: &D,
) -> Result<Option<Comparison>, FusionError>
where
    H: DemoHost + ?Sized,
    D: Delay + ?Sized,
{
    log::debug!("render cycle: {:?}", input);

    host.title(TITLE)?;
    host.text(INTRO)?;

    let sample = SampleSequence::generate(input.data_size, cfg.seed());

    let comparison = if input.run {
        let comparison = compare(&sample, cfg, delay);
        present_comparison(host, &comparison)?;
        if cfg.trials() > 1 {
            let report = run_trials(input.data_size, cfg, delay)?;
            present_trials(host, &report)?;
        }
        Some(comparison)
    } else {
        None
    };

    host.text(NOTE)?;
    Ok(comparison)
}

/// Renders the text lines and the chart of `comparison`.
pub fn present_comparison<H>(host: &mut H, comparison: &Comparison) -> Result<(), FusionError>
where
    H: DemoHost + ?Sized,
{
    for line in comparison.lines() {
        host.text(&line)?;
    }
    host.bar_chart(&comparison.chart())
}

/// Renders the summary statistics of repeated trials.
pub fn present_trials<H>(host: &mut H, report: &TrialReport) -> Result<(), FusionError>
where
    H: DemoHost + ?Sized,
{
    let n = report.standard().count;
    host.text(&format!("Elapsed times over {n} trials, in microseconds:"))?;
    present_timings(host, &report.timings)?;
    host.text(&format!("Speedup of means: {}", report.speedup))
}

/// Renders one line of summary statistics per label in `timings`.
pub fn present_timings<H>(host: &mut H, timings: &Timings) -> Result<(), FusionError>
where
    H: DemoHost + ?Sized,
{
    for (label, stats) in timings.summaries() {
        host.text(&format!(
            "  * {label}: count={}, mean={:.1}, stdev={:.1}, min={}, median={}, p95={}, max={}",
            stats.count, stats.mean, stats.stdev, stats.min, stats.median, stats.p95, stats.max
        ))?;
    }
    Ok(())
}

//==============
// TerminalHost

/// Number of characters used by the longest bar in [`TerminalHost`] charts.
const CHART_WIDTH: usize = 40;

/// [`DemoHost`] that writes plain text to `W`, drawing charts as horizontal bars.
pub struct TerminalHost<W: Write> {
    out: W,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DemoHost for TerminalHost<W> {
    fn title(&mut self, title: &str) -> Result<(), FusionError> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), FusionError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn bar_chart(&mut self, bars: &[Bar]) -> Result<(), FusionError> {
        let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let chart_width = CHART_WIDTH;
        writeln!(self.out)?;
        for bar in bars {
            let len = bar_len(bar.value, max);
            writeln!(
                self.out,
                "{:<label_width$} |{:<chart_width$}| {:.4}",
                bar.label,
                "#".repeat(len),
                bar.value
            )?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

fn bar_len(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * CHART_WIDTH as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, io, time::Duration};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[derive(Default)]
    struct CountingDelay(Cell<usize>);

    impl Delay for CountingDelay {
        fn pause(&self, _duration: Duration) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_write_failure_surfaces_as_io_error() {
        let mut host = TerminalHost::new(BrokenPipe);
        let delay = CountingDelay::default();
        let input = HostInput {
            data_size: DataSize::default(),
            run: true,
        };

        let res = render_cycle(&mut host, input, &ComparisonCfg::default(), &delay);

        match res {
            Err(FusionError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected an I/O error, got {other:?}"),
        }
        assert_eq!(delay.0.get(), 0);
    }

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(0.0, 0.0), 0);
        assert_eq!(bar_len(5.0, 5.0), CHART_WIDTH);
        assert_eq!(bar_len(2.5, 5.0), CHART_WIDTH / 2);
        assert_eq!(bar_len(0.00001, 5.0), 0);
    }

    #[test]
    fn test_terminal_chart_layout() {
        let mut host = TerminalHost::new(Vec::new());
        host.bar_chart(&[
            Bar {
                label: "Standard",
                value: 2.0,
            },
            Bar {
                label: "Optimized",
                value: 1.0,
            },
        ])
        .expect("writing to a Vec does not fail");
        let out = String::from_utf8(host.into_inner()).expect("output is UTF-8");
        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Standard  |"));
        assert!(lines[0].ends_with("| 2.0000"));
        assert_eq!(lines[0].matches('#').count(), CHART_WIDTH);
        assert_eq!(lines[1].matches('#').count(), CHART_WIDTH / 2);
    }
}
