#![allow(dead_code)]

use std::{cell::Cell, time::Duration};
use stream_fusion::{Bar, Delay, DemoHost, FusionError};

pub fn f64_are_close(left: f64, right: f64, pct: f64) -> bool {
    let avg_abs = (left.abs() + right.abs()) / 2.0;
    (left - right).abs() <= avg_abs * pct
}

pub fn doubled(values: &[f64]) -> Vec<f64> {
    values.iter().map(|x| 2.0 * x).collect()
}

/// [`Delay`] that counts pauses instead of sleeping.
#[derive(Default)]
pub struct CountingDelay {
    calls: Cell<usize>,
    requested: Cell<Duration>,
}

impl CountingDelay {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn requested(&self) -> Duration {
        self.requested.get()
    }
}

impl Delay for CountingDelay {
    fn pause(&self, duration: Duration) {
        self.calls.set(self.calls.get() + 1);
        self.requested.set(self.requested.get() + duration);
    }
}

/// What a [`RecordingHost`] was asked to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Title(String),
    Text(String),
    Chart(Vec<Bar>),
}

/// [`DemoHost`] that keeps every rendered surface, in order.
#[derive(Default)]
pub struct RecordingHost {
    pub surfaces: Vec<Surface>,
}

impl RecordingHost {
    pub fn texts(&self) -> Vec<&str> {
        self.surfaces
            .iter()
            .filter_map(|s| match s {
                Surface::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn charts(&self) -> Vec<&[Bar]> {
        self.surfaces
            .iter()
            .filter_map(|s| match s {
                Surface::Chart(bars) => Some(bars.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl DemoHost for RecordingHost {
    fn title(&mut self, title: &str) -> Result<(), FusionError> {
        self.surfaces.push(Surface::Title(title.to_owned()));
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), FusionError> {
        self.surfaces.push(Surface::Text(text.to_owned()));
        Ok(())
    }

    fn bar_chart(&mut self, bars: &[Bar]) -> Result<(), FusionError> {
        self.surfaces.push(Surface::Chart(bars.to_vec()));
        Ok(())
    }
}
