//! Errors returned by the crate's fallible operations.

use hdrhistogram::CreationError;
use std::io;
use thiserror::Error;

/// Error returned by sample construction, trials, and the demo host.
#[derive(Error, Debug)]
pub enum FusionError {
    /// An argument is outside its documented range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Histogram bounds given in [`ComparisonCfg`](crate::ComparisonCfg) are not usable.
    #[error("histogram configuration error: {0}")]
    HistogramConfig(#[from] CreationError),

    /// The demo host failed to write its output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
