//! Sample data fed to both stream transformations.

use crate::FusionError;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fmt::Display, ops::Deref};

/// Number of elements in a [`SampleSequence`], bounded to `[DataSize::MIN, DataSize::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataSize(usize);

impl DataSize {
    pub const MIN: usize = 100;
    pub const MAX: usize = 1000;
    pub const DEFAULT: usize = 500;

    /// Validates `n` against the data size bounds.
    ///
    /// # Errors
    /// [`FusionError::InvalidArgument`] if `n` is outside `[Self::MIN, Self::MAX]`.
    pub fn new(n: usize) -> Result<Self, FusionError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(FusionError::InvalidArgument(format!(
                "data size {n} is outside [{}, {}]",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for DataSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for DataSize {
    type Error = FusionError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl Display for DataSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Ordered sequence of floats, each drawn uniformly from `[0, 1)` unless supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence(Vec<f64>);

impl SampleSequence {
    /// Generates `size` random values. With a `seed` the values are reproducible; without one they come from
    /// the thread-local generator.
    pub fn generate(size: DataSize, seed: Option<u64>) -> Self {
        let values = match seed {
            Some(seed) => draw(&mut StdRng::seed_from_u64(seed), size.get()),
            None => draw(&mut rand::thread_rng(), size.get()),
        };
        log::debug!("generated sample of {} values, seed={:?}", values.len(), seed);
        Self(values)
    }

    /// Wraps caller-supplied values. The data size bounds are not applied.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

fn draw(rng: &mut impl Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

impl Deref for SampleSequence {
    type Target = [f64];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_size_bounds() {
        assert!(DataSize::new(99).is_err());
        assert!(DataSize::new(1001).is_err());
        assert_eq!(DataSize::new(100).map(DataSize::get).ok(), Some(100));
        assert_eq!(DataSize::new(1000).map(DataSize::get).ok(), Some(1000));
        assert_eq!(DataSize::default().get(), 500);
        assert!(matches!(
            DataSize::try_from(0),
            Err(FusionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let size = DataSize::default();
        let a = SampleSequence::generate(size, Some(7));
        let b = SampleSequence::generate(size, Some(7));
        let c = SampleSequence::generate(size, Some(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 500);
        assert!(a.iter().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_unseeded_generation_has_requested_len() {
        let size = DataSize::new(123).expect("in range");
        let s = SampleSequence::generate(size, None);
        assert_eq!(s.len(), 123);
        assert!(s.iter().all(|x| (0.0..1.0).contains(x)));
    }
}
