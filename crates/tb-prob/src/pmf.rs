//! Probability mass functions.
//!
//! A [`Pmf`] is a [`WeightedMap`] whose weights are read as (possibly
//! unnormalized) probability mass. Queries that need ordering or arithmetic
//! on keys carry those bounds themselves:
//! - `Ord` for percentiles, medians, Cdf construction and display,
//! - [`ToPrimitive`] for mean and variance,
//! - `Add`/`Ord` + `Copy` for exact convolution and maximum.

use std::fmt;
use std::hash::Hash;
use std::ops::{Add, Deref, DerefMut};

use num_traits::ToPrimitive;
use rand::Rng;
use tb_core::{CredibleInterval, Error, Result};

use crate::cdf::Cdf;
use crate::operations;
use crate::weighted_map::WeightedMap;

/// Probability mass function over keys `K`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf<K: Hash + Eq> {
    map: WeightedMap<K>,
}

impl<K: Hash + Eq> Default for Pmf<K> {
    fn default() -> Self {
        Self { map: WeightedMap::new() }
    }
}

impl<K: Hash + Eq> Deref for Pmf<K> {
    type Target = WeightedMap<K>;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl<K: Hash + Eq> DerefMut for Pmf<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.map
    }
}

impl<K: Hash + Eq> From<WeightedMap<K>> for Pmf<K> {
    fn from(map: WeightedMap<K>) -> Self {
        Self { map }
    }
}

impl<K: Hash + Eq> FromIterator<(K, f64)> for Pmf<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self { map: iter.into_iter().collect() }
    }
}

impl<K: Hash + Eq> Pmf<K> {
    /// Create an empty Pmf.
    pub fn new() -> Self {
        Self::default()
    }

    /// Each key with weight 1 (not normalized).
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        Self { map: WeightedMap::from_keys(keys) }
    }

    /// Keys with explicit weights (not normalized).
    pub fn from_pairs(keys: Vec<K>, weights: Vec<f64>) -> Result<Self> {
        Ok(Self { map: WeightedMap::from_pairs(keys, weights)? })
    }

    /// Uniform distribution: each distinct key gets `1/n`.
    pub fn uniform(keys: impl IntoIterator<Item = K>) -> Self {
        let mut map = WeightedMap::from_keys(keys);
        let p = 1.0 / map.len().max(1) as f64;
        for w in map.weights_mut() {
            *w = p;
        }
        Self { map }
    }

    /// Normalized histogram of observed values.
    pub fn from_sample(values: impl IntoIterator<Item = K>) -> Result<Self> {
        let mut pmf = Self::new();
        for v in values {
            pmf.incr(v);
        }
        pmf.normalize()?;
        Ok(pmf)
    }

    /// Scale weights so they sum to 1. Returns the total before scaling.
    ///
    /// After a Bayesian update the returned total is the evidence `P(data)`.
    pub fn normalize(&mut self) -> Result<f64> {
        self.normalize_to(1.0)
    }

    /// Scale weights so they sum to `fraction`. Returns the total before scaling.
    pub fn normalize_to(&mut self, fraction: f64) -> Result<f64> {
        let total = self.total();
        if total == 0.0 {
            return Err(Error::TotalProbabilityZero);
        }
        let factor = fraction / total;
        for w in self.map.weights_mut() {
            *w *= factor;
        }
        Ok(total)
    }

    /// Borrow the underlying weighted map.
    pub fn as_weighted_map(&self) -> &WeightedMap<K> {
        &self.map
    }

    /// Release the underlying weighted map.
    pub fn into_weighted_map(self) -> WeightedMap<K> {
        self.map
    }
}

impl<K: Hash + Eq + Ord + Clone> Pmf<K> {
    /// Key with the highest weight.
    ///
    /// Ties are broken in favor of the smallest key, so the result does not
    /// depend on hash iteration order.
    pub fn mode(&self) -> Result<K> {
        let mut best: Option<(&K, f64)> = None;
        for (k, w) in self.iter() {
            best = match best {
                Some((bk, bw)) if bw > w || (bw == w && bk < k) => Some((bk, bw)),
                _ => Some((k, w)),
            };
        }
        best.map(|(k, _)| k.clone()).ok_or(Error::EmptyDistribution)
    }

    /// Same as [`Pmf::mode`]: the maximum-likelihood hypothesis after updates.
    pub fn maximum_likelihood(&self) -> Result<K> {
        self.mode()
    }

    /// Smallest key whose cumulative probability reaches `p` percent.
    ///
    /// Weights need not be normalized; `p` is measured against the total.
    pub fn percentile(&self, p: f64) -> Result<K> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::PercentileOutOfRange(p));
        }
        let items = self.sorted_items();
        let Some((last, _)) = items.last() else {
            return Err(Error::EmptyDistribution);
        };
        let total = self.total();
        if total == 0.0 {
            return Err(Error::TotalProbabilityZero);
        }

        let target = p / 100.0 * total;
        let mut acc = 0.0;
        for (k, w) in &items {
            acc += w;
            if acc >= target {
                return Ok((*k).clone());
            }
        }
        // Rounding can leave the running sum a hair below the total.
        Ok((*last).clone())
    }

    /// 50th percentile.
    pub fn median(&self) -> Result<K> {
        self.percentile(50.0)
    }

    /// Build the cumulative distribution.
    ///
    /// Keys are sorted ascending and the running sum is divided by the
    /// total, so the Pmf need not be normalized first.
    pub fn make_cdf(&self) -> Result<Cdf<K>> {
        let items = self.sorted_items();
        if items.is_empty() {
            return Ok(Cdf::default());
        }
        let total = self.total();
        if total == 0.0 {
            return Err(Error::TotalProbabilityZero);
        }

        let mut xs = Vec::with_capacity(items.len());
        let mut ps = Vec::with_capacity(items.len());
        let mut running = 0.0;
        for (k, w) in items {
            running += w;
            xs.push(k.clone());
            ps.push(running / total);
        }
        Ok(Cdf::from_sorted(xs, ps))
    }

    /// Central credible interval covering `percentage` percent of the mass.
    pub fn credible_interval(&self, percentage: f64) -> Result<CredibleInterval<K>> {
        self.make_cdf()?.credible_interval(percentage)
    }

    /// Total weight of keys strictly below `x`.
    pub fn prob_less(&self, x: &K) -> f64 {
        self.iter().filter(|(k, _)| *k < x).map(|(_, w)| w).sum()
    }

    /// Total weight of keys strictly above `x`.
    pub fn prob_greater(&self, x: &K) -> f64 {
        self.iter().filter(|(k, _)| *k > x).map(|(_, w)| w).sum()
    }

    /// Draw one key with probability proportional to its weight.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K> {
        let items = self.sorted_items();
        let Some((last, _)) = items.last() else {
            return Err(Error::EmptyDistribution);
        };
        let total = self.total();
        if total == 0.0 {
            return Err(Error::TotalProbabilityZero);
        }

        let target = rng.random::<f64>() * total;
        let mut acc = 0.0;
        for (k, w) in &items {
            acc += w;
            if acc > target {
                return Ok((*k).clone());
            }
        }
        Ok((*last).clone())
    }
}

impl<K: Hash + Eq + ToPrimitive> Pmf<K> {
    /// Weighted average of the keys.
    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyDistribution);
        }
        let total = self.total();
        if total == 0.0 {
            return Err(Error::TotalProbabilityZero);
        }
        let mut acc = 0.0;
        for (k, w) in self.iter() {
            acc += key_to_f64(k)? * w;
        }
        Ok(acc / total)
    }

    /// Weighted variance of the keys.
    pub fn variance(&self) -> Result<f64> {
        let mu = self.mean()?;
        let total = self.total();
        let mut acc = 0.0;
        for (k, w) in self.iter() {
            let d = key_to_f64(k)? - mu;
            acc += d * d * w;
        }
        Ok(acc / total)
    }
}

fn key_to_f64<K: ToPrimitive>(k: &K) -> Result<f64> {
    k.to_f64().ok_or_else(|| Error::Validation("key is not representable as f64".to_string()))
}

impl<K> Pmf<K>
where
    K: Hash + Eq + Copy + Send + Sync,
{
    /// Exact distribution of `X + Y` for independent `X ~ self`, `Y ~ other`.
    ///
    /// Enumerates all `|self| * |other|` key pairs.
    pub fn convolve(&self, other: &Pmf<K>) -> Pmf<K>
    where
        K: Add<Output = K>,
    {
        operations::pmf_sum(self, other)
    }

    /// Exact distribution of `max(X, Y)` for independent `X ~ self`, `Y ~ other`.
    pub fn max(&self, other: &Pmf<K>) -> Pmf<K>
    where
        K: Ord,
    {
        operations::pmf_max(self, other)
    }
}

impl<K> Add<&Pmf<K>> for &Pmf<K>
where
    K: Hash + Eq + Copy + Send + Sync + Add<Output = K>,
{
    type Output = Pmf<K>;

    fn add(self, rhs: &Pmf<K>) -> Pmf<K> {
        operations::pmf_sum(self, rhs)
    }
}

impl<K> Add<&Pmf<K>> for Pmf<K>
where
    K: Hash + Eq + Copy + Send + Sync + Add<Output = K>,
{
    type Output = Pmf<K>;

    fn add(self, rhs: &Pmf<K>) -> Pmf<K> {
        operations::pmf_sum(&self, rhs)
    }
}

/// One `key: weight` line per key, ascending.
impl<K: Hash + Eq + Ord + fmt::Display> fmt::Display for Pmf<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, w) in self.sorted_items() {
            writeln!(f, "{}: {}", k, w)?;
        }
        Ok(())
    }
}
