//! Cumulative distribution functions.
//!
//! A [`Cdf`] is two parallel sequences: ascending unique values `xs` and
//! non-decreasing cumulative probabilities `ps`. It is built once (usually
//! from [`Pmf::make_cdf`]) and never mutated afterwards.
//!
//! Inverse lookup is a ceiling search: for `0 < p < 1` the result is the
//! value at the smallest index `i` with `ps[i] >= p`.

use std::hash::Hash;

use rand::Rng;
use serde::Serialize;
use tb_core::{CredibleInterval, Error, Result};

use crate::pmf::Pmf;

/// Cumulative distribution over values `K`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cdf<K> {
    xs: Vec<K>,
    ps: Vec<f64>,
}

impl<K> Default for Cdf<K> {
    fn default() -> Self {
        Self { xs: Vec::new(), ps: Vec::new() }
    }
}

impl<K> Cdf<K> {
    /// Create a Cdf from values and their cumulative probabilities.
    ///
    /// `xs` must be sorted ascending by the caller; `ps` must be
    /// non-decreasing and free of NaN. The last probability should be 1.
    pub fn new(xs: Vec<K>, ps: Vec<f64>) -> Result<Self> {
        if xs.len() != ps.len() {
            return Err(Error::LengthMismatch { keys: xs.len(), weights: ps.len() });
        }
        if ps.iter().any(|p| p.is_nan()) {
            return Err(Error::Validation("cumulative probabilities must not be NaN".to_string()));
        }
        if let Some(i) = ps.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::Validation(format!(
                "cumulative probabilities must be non-decreasing: ps[{}]={} > ps[{}]={}",
                i,
                ps[i],
                i + 1,
                ps[i + 1]
            )));
        }
        Ok(Self { xs, ps })
    }

    /// Trusted constructor for sequences built by a running sum.
    pub(crate) fn from_sorted(xs: Vec<K>, ps: Vec<f64>) -> Self {
        debug_assert_eq!(xs.len(), ps.len());
        Self { xs, ps }
    }

    /// Values, ascending.
    pub fn xs(&self) -> &[K] {
        &self.xs
    }

    /// Cumulative probabilities, non-decreasing.
    pub fn ps(&self) -> &[f64] {
        &self.ps
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the Cdf has no values.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Distribution of the maximum of `k` i.i.d. draws.
    ///
    /// `P(max <= x) = P(X <= x)^k`, so every cumulative probability is raised
    /// to the `k`-th power. `k` must be at least 1.
    pub fn max(&self, k: u32) -> Result<Cdf<K>>
    where
        K: Clone,
    {
        if k == 0 {
            return Err(Error::Validation("max needs at least one draw, got k=0".to_string()));
        }
        let exp = i32::try_from(k)
            .map_err(|_| Error::Validation(format!("max: k={} is too large", k)))?;
        Ok(Cdf { xs: self.xs.clone(), ps: self.ps.iter().map(|p| p.powi(exp)).collect() })
    }
}

impl<K: Clone> Cdf<K> {
    /// Inverse CDF: the value corresponding to cumulative probability `p`.
    pub fn value(&self, p: f64) -> Result<K> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::ProbabilityOutOfRange(p));
        }
        let (Some(first), Some(last)) = (self.xs.first(), self.xs.last()) else {
            return Err(Error::EmptyDistribution);
        };
        if p == 0.0 {
            return Ok(first.clone());
        }
        if p == 1.0 {
            return Ok(last.clone());
        }

        // First index whose cumulative probability is not less than p.
        let index = self.ps.partition_point(|&q| q < p).min(self.xs.len() - 1);
        Ok(self.xs[index].clone())
    }

    /// Value at percentile `p` (0..=100).
    pub fn percentile(&self, p: f64) -> Result<K> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::PercentileOutOfRange(p));
        }
        self.value(p / 100.0)
    }

    /// Central credible interval.
    ///
    /// For `percentage = 90` this is the 5th and 95th percentiles.
    pub fn credible_interval(&self, percentage: f64) -> Result<CredibleInterval<K>> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(Error::PercentileOutOfRange(percentage));
        }
        let tail = (1.0 - percentage / 100.0) / 2.0;
        Ok(CredibleInterval::new(self.value(tail)?, self.value(1.0 - tail)?))
    }

    /// Draw one value by inverse-transform sampling.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K> {
        if self.is_empty() {
            return Err(Error::EmptyDistribution);
        }
        self.value(rng.random::<f64>())
    }

    /// Draw `n` independent values.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<K>> {
        (0..n).map(|_| self.random(rng)).collect()
    }
}

impl<K: Ord> Cdf<K> {
    /// Cumulative probability `P(X <= x)`.
    pub fn prob(&self, x: &K) -> f64 {
        let index = self.xs.partition_point(|v| v <= x);
        if index == 0 { 0.0 } else { self.ps[index - 1] }
    }
}

impl<K: Hash + Eq + Clone> Cdf<K> {
    /// Recover the mass function from successive differences.
    pub fn make_pmf(&self) -> Pmf<K> {
        let mut pmf = Pmf::new();
        let mut prev = 0.0;
        for (x, &p) in self.xs.iter().zip(&self.ps) {
            pmf.increment(x.clone(), p - prev);
            prev = p;
        }
        pmf
    }
}
