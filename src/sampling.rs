//! Uniform sampling sources for the telemetry generators.
//!
//! Generators never touch an RNG directly; they draw every value through a
//! [`UniformSource`] so that tests can replay an exact sequence and the
//! service can run either unseeded or from a fixed `--seed`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed values in `[min, max)`.
pub trait UniformSource {
    fn uniform(&mut self, min: f64, max: f64) -> f64;
}

/// Adapts any `rand` RNG into a [`UniformSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Non-reproducible source seeded from the OS.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible source; the same seed yields the same series.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Replays a fixed list of unit fractions, cycling when exhausted.
///
/// Each draw maps the next fraction `u` onto `min + u * (max - min)`, so a
/// fraction of `0.0` yields the lower bound and `0.5` the midpoint.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    fractions: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(fractions: impl Into<Vec<f64>>) -> Self {
        let fractions: Vec<f64> = fractions.into();
        let fractions = if fractions.is_empty() {
            vec![0.0]
        } else {
            fractions
                .into_iter()
                .map(|u| if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 })
                .collect()
        };
        Self {
            fractions,
            cursor: 0,
        }
    }

    /// A source that always returns the same point of every range.
    pub fn constant(fraction: f64) -> Self {
        Self::new(vec![fraction])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        let u = self.fractions[self.cursor % self.fractions.len()];
        self.cursor += 1;
        min + u * (max - min)
    }
}

/// Fresh source for one-shot callers that do not care about reproducibility.
pub fn thread_source() -> RngSource<rand::rngs::ThreadRng> {
    RngSource::new(rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_source_stays_in_range() {
        let mut source = RngSource::seeded(7);
        for _ in 0..1_000 {
            let v = source.uniform(96.0, 99.5);
            assert!((96.0..99.5).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut source = RngSource::seeded(1);
        assert_eq!(source.uniform(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_scripted_source_maps_fractions() {
        let mut source = ScriptedSource::new(vec![0.0, 0.5, 1.0]);
        assert_eq!(source.uniform(10.0, 20.0), 10.0);
        assert_eq!(source.uniform(10.0, 20.0), 15.0);
        assert_eq!(source.uniform(10.0, 20.0), 20.0);
        // cycles
        assert_eq!(source.uniform(0.0, 4.0), 0.0);
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn test_scripted_source_clamps_bad_fractions() {
        let mut source = ScriptedSource::new(vec![-1.0, 2.0, f64::NAN]);
        assert_eq!(source.uniform(0.0, 10.0), 0.0);
        assert_eq!(source.uniform(0.0, 10.0), 10.0);
        assert_eq!(source.uniform(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_scripted_source_empty_defaults_to_min() {
        let mut source = ScriptedSource::new(Vec::new());
        assert_eq!(source.uniform(3.0, 9.0), 3.0);
    }
}
