//! Continuous densities and their discretization.
//!
//! [`Pdf`] is the capability: anything with a `density(x)` can be turned into
//! a [`Pmf`] over a caller-supplied grid. Two implementations:
//! - [`GaussianPdf`]: closed-form normal density,
//! - [`EstimatedPdf`]: Gaussian kernel density estimate from a sample.

use ordered_float::OrderedFloat;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tb_core::{Error, Result};

use crate::normal;
use crate::pmf::Pmf;

/// Smallest sample [`EstimatedPdf`] accepts; a spread needs two points.
pub const MIN_KDE_SAMPLE: usize = 2;

/// A probability density function.
pub trait Pdf {
    /// Density at `x`.
    fn density(&self, x: f64) -> f64;

    /// Evaluate the density at each grid point and normalize.
    ///
    /// Fails when a density value is negative or NaN, or when every density
    /// value is zero.
    fn make_pmf(&self, xs: &[f64]) -> Result<Pmf<OrderedFloat<f64>>> {
        let mut pmf = Pmf::new();
        for &x in xs {
            let d = self.density(x);
            if d.is_nan() || d < 0.0 {
                return Err(Error::Validation(format!("density at {} is {}", x, d)));
            }
            pmf.set(OrderedFloat(x), d);
        }
        pmf.normalize()?;
        Ok(pmf)
    }
}

/// `n` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let denom = (n - 1) as f64;
            (0..n).map(|i| start + (stop - start) * i as f64 / denom).collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Gaussian
// ---------------------------------------------------------------------------

/// Normal density `N(mu, sigma)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianPdf {
    mu: f64,
    sigma: f64,
}

impl GaussianPdf {
    /// Create `N(mu, sigma)`; `sigma` must be finite and positive.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        normal::validate_sigma(sigma)?;
        Ok(Self { mu, sigma })
    }

    /// Mean.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Pdf for GaussianPdf {
    fn density(&self, x: f64) -> f64 {
        normal::density(x, self.mu, self.sigma)
    }
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Bandwidth selection for [`EstimatedPdf`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BandwidthMethod {
    /// Scott's rule: `h = sd * n^(-1/5)` (sample sd with `n - 1`).
    #[default]
    Scott,
    /// Silverman's rule: `h = 0.9 * min(sd, IQR/1.34) * n^(-1/5)`.
    Silverman,
    /// Fixed bandwidth.
    Manual(f64),
}

impl BandwidthMethod {
    /// Bandwidth for `sample`, or `None` when it cannot be estimated.
    pub fn bandwidth(&self, sample: &[f64]) -> Option<f64> {
        let n = sample.len();
        if n < MIN_KDE_SAMPLE || sample.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let h = match *self {
            BandwidthMethod::Manual(h) => h,
            BandwidthMethod::Scott => sample_sd(sample) * (n as f64).powf(-0.2),
            BandwidthMethod::Silverman => {
                let sd = sample_sd(sample);
                let iqr = interquartile_range(sample);
                let spread = if iqr > 0.0 { sd.min(iqr / 1.34) } else { sd };
                0.9 * spread * (n as f64).powf(-0.2)
            }
        };
        (h.is_finite() && h > 0.0).then_some(h)
    }
}

fn sample_sd(xs: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let ss: f64 = xs.iter().map(|x| (x - mean) * (x - mean)).sum();
    (ss / (n - 1.0)).sqrt()
}

fn interquartile_range(xs: &[f64]) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile_linear_sorted(&sorted, 0.75) - quantile_linear_sorted(&sorted, 0.25)
}

/// Quantile for sorted data via linear interpolation.
fn quantile_linear_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Gaussian kernel density estimate of an empirical sample.
///
/// `f(x) = 1/(n h) * Σ φ((x - x_i) / h)`
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedPdf {
    sample: Vec<f64>,
    bandwidth: f64,
}

impl EstimatedPdf {
    /// Estimate with Scott's rule.
    ///
    /// Returns `None` for fewer than [`MIN_KDE_SAMPLE`] points, non-finite
    /// values, or a sample with no spread.
    pub fn new(sample: &[f64]) -> Option<Self> {
        Self::with_bandwidth(sample, BandwidthMethod::default())
    }

    /// Estimate with an explicit bandwidth rule.
    pub fn with_bandwidth(sample: &[f64], method: BandwidthMethod) -> Option<Self> {
        let Some(bandwidth) = method.bandwidth(sample) else {
            log::warn!(
                "kde: cannot estimate bandwidth ({:?}) from {} points",
                method,
                sample.len()
            );
            return None;
        };
        Some(Self { sample: sample.to_vec(), bandwidth })
    }

    /// Kernel bandwidth `h`.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// The sample the estimate was built from.
    pub fn sample(&self) -> &[f64] {
        &self.sample
    }

    /// Draw `n` values from the estimate: a random sample point plus
    /// Gaussian noise of width `h`.
    pub fn resample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n)
            .map(|_| {
                let center = self.sample[rng.random_range(0..self.sample.len())];
                let z: f64 = rng.sample(StandardNormal);
                center + self.bandwidth * z
            })
            .collect()
    }
}

impl Pdf for EstimatedPdf {
    fn density(&self, x: f64) -> f64 {
        let sum: f64 = self.sample.iter().map(|&xi| normal::density(x, xi, self.bandwidth)).sum();
        sum / self.sample.len() as f64
    }
}
