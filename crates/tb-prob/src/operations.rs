//! Derived distributions: sums, maxima and mixtures.
//!
//! Two strategies for combining independent distributions:
//! - **Exact enumeration** ([`pmf_sum`], [`pmf_max`]): walks every key pair,
//!   `O(|A| * |B|)`. Large cross products are split across Rayon workers,
//!   each folding into its own partial map; the partials are merged at the end.
//! - **Monte Carlo** ([`sample_sum`], [`sample_max`]): draws from each Cdf and
//!   histograms the combined values. Use this when supports are large.
//!
//! For the maximum of `k` draws from one distribution, [`Cdf::max`] is exact
//! and cheaper than either.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Add;

use rand::Rng;
use rayon::prelude::*;
use tb_core::{Error, Result};

use crate::cdf::Cdf;
use crate::pmf::Pmf;
use crate::weighted_map::WeightedMap;

/// Cross products smaller than this are enumerated on the calling thread.
const PARALLEL_MIN_PAIRS: usize = 1 << 14;

// ---------------------------------------------------------------------------
// Exact enumeration
// ---------------------------------------------------------------------------

/// Exact distribution of `X + Y`.
pub fn pmf_sum<K>(a: &Pmf<K>, b: &Pmf<K>) -> Pmf<K>
where
    K: Hash + Eq + Copy + Send + Sync + Add<Output = K>,
{
    enumerate_pairs(a, b, |x, y| x + y)
}

/// Exact distribution of `max(X, Y)`.
pub fn pmf_max<K>(a: &Pmf<K>, b: &Pmf<K>) -> Pmf<K>
where
    K: Hash + Eq + Ord + Copy + Send + Sync,
{
    enumerate_pairs(a, b, |x, y| x.max(y))
}

fn enumerate_pairs<K, F>(a: &Pmf<K>, b: &Pmf<K>, combine: F) -> Pmf<K>
where
    K: Hash + Eq + Copy + Send + Sync,
    F: Fn(K, K) -> K + Sync,
{
    let left: Vec<(K, f64)> = a.iter().map(|(k, p)| (*k, p)).collect();
    let right: Vec<(K, f64)> = b.iter().map(|(k, p)| (*k, p)).collect();

    let accumulate = |mut acc: HashMap<K, f64>, &(x, px): &(K, f64)| {
        for &(y, py) in &right {
            *acc.entry(combine(x, y)).or_insert(0.0) += px * py;
        }
        acc
    };

    let merged = if left.len().saturating_mul(right.len()) < PARALLEL_MIN_PAIRS {
        left.iter().fold(HashMap::new(), &accumulate)
    } else {
        left.par_iter().fold(HashMap::new, &accumulate).reduce(HashMap::new, merge_partials)
    };
    Pmf::from(WeightedMap::from_map(merged))
}

fn merge_partials<K: Hash + Eq>(mut lhs: HashMap<K, f64>, rhs: HashMap<K, f64>) -> HashMap<K, f64> {
    if lhs.len() < rhs.len() {
        return merge_partials(rhs, lhs);
    }
    for (k, w) in rhs {
        *lhs.entry(k).or_insert(0.0) += w;
    }
    lhs
}

// ---------------------------------------------------------------------------
// Monte Carlo
// ---------------------------------------------------------------------------

/// Draw one value from each Cdf and return their sum.
pub fn random_sum<K, R>(dists: &[Cdf<K>], rng: &mut R) -> Result<K>
where
    K: Clone + Add<Output = K>,
    R: Rng + ?Sized,
{
    let (first, rest) = dists.split_first().ok_or(Error::EmptyDistribution)?;
    let mut total = first.random(rng)?;
    for dist in rest {
        total = total + dist.random(rng)?;
    }
    Ok(total)
}

/// Draw one value from each Cdf and return the largest.
pub fn random_max<K, R>(dists: &[Cdf<K>], rng: &mut R) -> Result<K>
where
    K: Clone + Ord,
    R: Rng + ?Sized,
{
    let (first, rest) = dists.split_first().ok_or(Error::EmptyDistribution)?;
    let mut best = first.random(rng)?;
    for dist in rest {
        best = best.max(dist.random(rng)?);
    }
    Ok(best)
}

/// Normalized Pmf of `n` draws of [`random_sum`].
///
/// No distributions or `n == 0` yields an empty Pmf.
pub fn sample_sum<K, R>(dists: &[Cdf<K>], n: usize, rng: &mut R) -> Result<Pmf<K>>
where
    K: Hash + Eq + Clone + Add<Output = K>,
    R: Rng + ?Sized,
{
    if dists.is_empty() || n == 0 {
        log::warn!("sample_sum: {} distributions, {} draws; returning empty Pmf", dists.len(), n);
        return Ok(Pmf::new());
    }
    let draws = (0..n).map(|_| random_sum(dists, rng)).collect::<Result<Vec<K>>>()?;
    Pmf::from_sample(draws)
}

/// Normalized Pmf of `n` draws of [`random_max`].
///
/// No distributions or `n == 0` yields an empty Pmf.
pub fn sample_max<K, R>(dists: &[Cdf<K>], n: usize, rng: &mut R) -> Result<Pmf<K>>
where
    K: Hash + Eq + Ord + Clone,
    R: Rng + ?Sized,
{
    if dists.is_empty() || n == 0 {
        log::warn!("sample_max: {} distributions, {} draws; returning empty Pmf", dists.len(), n);
        return Ok(Pmf::new());
    }
    let draws = (0..n).map(|_| random_max(dists, rng)).collect::<Result<Vec<K>>>()?;
    Pmf::from_sample(draws)
}

// ---------------------------------------------------------------------------
// Mixtures
// ---------------------------------------------------------------------------

/// Mixture of weighted component distributions.
///
/// Every key `x` of a component with weight `w` receives `w * p(x)`. With
/// normalized weights and components the result is normalized too.
pub fn make_mixture<'a, K, I>(components: I) -> Pmf<K>
where
    K: Hash + Eq + Clone + 'a,
    I: IntoIterator<Item = (f64, &'a Pmf<K>)>,
{
    let mut mix = Pmf::new();
    for (weight, pmf) in components {
        for (x, p) in pmf.iter() {
            mix.increment(x.clone(), weight * p);
        }
    }
    mix
}
