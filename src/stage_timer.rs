//! Collection of per-stage latencies from [tracing](https://crates.io/crates/tracing) spans.
//!
//! Each span is a stage; stages are grouped by span name. A span's latency is measured from its creation to
//! its close and recorded in **microseconds**.

use crate::{
    summary_stats::{micros, new_timing},
    ComparisonCfg, FusionError, Timing, Timings,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Instant,
};
use tracing::{span::Attributes, Id, Subscriber};
use tracing_subscriber::{layer::Context, layer::SubscriberExt, registry::LookupSpan, Layer, Registry};

/// Information about a span stored in the registry.
#[derive(Debug)]
struct SpanStart(Instant);

/// [`Layer`] that records stage latencies.
///
/// Rather than installing itself as the global default subscriber, a [`StageTimer`] is scoped to a single
/// closure by [`StageTimer::measure`], so independent measurements do not interfere with each other.
#[derive(Clone)]
pub struct StageTimer {
    timings: Arc<Mutex<BTreeMap<&'static str, Timing>>>,
    hist_high: u64,
    hist_sigfig: u8,
}

impl StageTimer {
    /// Creates a [`StageTimer`] whose histograms use the bounds configured in `cfg`.
    ///
    /// # Errors
    /// [`FusionError::HistogramConfig`] if the histogram settings in `cfg` are unusable.
    pub fn new(cfg: &ComparisonCfg) -> Result<Self, FusionError> {
        cfg.validate_hist_high_sigfig()?;
        Ok(Self {
            timings: Arc::new(Mutex::new(BTreeMap::new())),
            hist_high: cfg.hist_high,
            hist_sigfig: cfg.hist_sigfig,
        })
    }

    /// Executes `f` with `self` as the thread's default subscriber and, after `f` completes, returns `f`'s
    /// result and the stage latencies recorded while it ran.
    pub fn measure<R>(self, f: impl FnOnce() -> R) -> (R, Timings) {
        let subscriber = Registry::default().with(self.clone());
        let res = tracing::subscriber::with_default(subscriber, f);
        (res, self.take_timings())
    }

    /// Extracts the recorded latencies, leaving `self` empty.
    pub fn take_timings(&self) -> Timings {
        log::trace!("entering `take_timings`");
        let mut lock = self
            .timings
            .lock()
            .expect("StageTimer timings Mutex poisoned");
        std::mem::take(&mut *lock).into()
    }

    fn record(&self, name: &'static str, micros: u64) {
        let mut lock = self
            .timings
            .lock()
            .expect("StageTimer timings Mutex poisoned");
        let hist = lock
            .entry(name)
            .or_insert_with(|| new_timing(self.hist_high, self.hist_sigfig));
        hist.record(micros)
            .expect("should not happen given auto-resizing histogram");
    }
}

impl<S> Layer<S> for StageTimer
where
    S: Subscriber,
    S: for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, _attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let span = ctx
            .span(id)
            .expect("impossible: there is no span with the given id");
        log::trace!("`on_new_span`: name={}, id={:?}", span.name(), id);
        span.extensions_mut().insert(SpanStart(Instant::now()));
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let span = ctx
            .span(&id)
            .expect("impossible: there is no span with the given id");
        let ext = span.extensions();
        let start = ext
            .get::<SpanStart>()
            .expect("span extensions does not contain SpanStart record");
        let elapsed = micros(start.0.elapsed());
        log::trace!("`on_close`: name={}, id={:?}, micros={}", span.name(), id, elapsed);
        self.record(span.name(), elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tracing::trace_span;

    #[test]
    fn test_records_one_entry_per_closed_span() {
        let timer = StageTimer::new(&ComparisonCfg::default()).expect("default cfg is valid");
        let ((), timings) = timer.measure(|| {
            for _ in 0..3 {
                trace_span!("outer").in_scope(|| {
                    trace_span!("inner").in_scope(|| thread::sleep(Duration::from_millis(2)));
                });
            }
        });

        assert_eq!(timings.len(), 2);
        let summaries = timings.summaries();
        assert_eq!(summaries["outer"].count, 3);
        assert_eq!(summaries["inner"].count, 3);
        assert!(summaries["inner"].min >= 1_900);
        assert!(summaries["outer"].mean >= summaries["inner"].mean);
    }

    #[test]
    fn test_spans_outside_measure_are_not_recorded() {
        let timer = StageTimer::new(&ComparisonCfg::default()).expect("default cfg is valid");
        trace_span!("before").in_scope(|| ());
        let (n, timings) = timer.measure(|| 5);
        assert_eq!(n, 5);
        assert!(timings.is_empty());
    }
}
