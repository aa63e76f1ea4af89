//! Beta distribution: scalar density helpers and the conjugate [`Beta`]
//! prior for binomial counts.

use ordered_float::OrderedFloat;
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use statrs::function::beta::checked_beta_reg;
use statrs::function::gamma::ln_gamma;
use tb_core::{Error, Result};

use crate::cdf::Cdf;
use crate::pdf::linspace;
use crate::pmf::Pmf;

/// Default number of grid intervals for [`Beta::make_pmf`] and [`Beta::make_cdf`].
pub const DEFAULT_STEPS: usize = 100;

#[inline]
fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

fn validate_shape(a: f64, b: f64) -> Result<()> {
    if !a.is_finite() || a <= 0.0 {
        return Err(Error::Validation(format!("a must be finite and > 0, got {}", a)));
    }
    if !b.is_finite() || b <= 0.0 {
        return Err(Error::Validation(format!("b must be finite and > 0, got {}", b)));
    }
    Ok(())
}

/// Log-PDF of a Beta(`a`, `b`) distribution at `x`.
///
/// Support: `0 <= x <= 1`.
pub fn logpdf(x: f64, a: f64, b: f64) -> Result<f64> {
    validate_shape(a, b)?;
    if !(0.0..=1.0).contains(&x) {
        return Ok(f64::NEG_INFINITY);
    }

    let ln_norm = -ln_beta(a, b);
    if x == 0.0 {
        if a < 1.0 {
            return Ok(f64::INFINITY);
        }
        if a > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        // a == 1: x term is 0.
        return Ok(ln_norm);
    }
    if x == 1.0 {
        if b < 1.0 {
            return Ok(f64::INFINITY);
        }
        if b > 1.0 {
            return Ok(f64::NEG_INFINITY);
        }
        return Ok(ln_norm);
    }

    Ok(ln_norm + (a - 1.0) * x.ln() + (b - 1.0) * (1.0 - x).ln())
}

/// Conjugate Beta distribution over a binomial success probability.
///
/// Starts at Beta(1, 1) (uniform). Observing `heads` successes and `tails`
/// failures adds them to `alpha` and `beta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beta {
    alpha: f64,
    beta: f64,
}

impl Default for Beta {
    fn default() -> Self {
        Self { alpha: 1.0, beta: 1.0 }
    }
}

impl Beta {
    /// Create Beta(`alpha`, `beta`); both must be finite and positive.
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        validate_shape(alpha, beta)?;
        Ok(Self { alpha, beta })
    }

    /// First shape parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Second shape parameter.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Conjugate update with observed counts.
    pub fn update(&mut self, heads: f64, tails: f64) {
        self.alpha += heads;
        self.beta += tails;
    }

    /// `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Unnormalized density `x^(alpha-1) * (1-x)^(beta-1)`.
    pub fn eval_pdf(&self, x: f64) -> f64 {
        x.powf(self.alpha - 1.0) * (1.0 - x).powf(self.beta - 1.0)
    }

    /// Normalized density at `x`.
    pub fn pdf(&self, x: f64) -> Result<f64> {
        Ok(logpdf(x, self.alpha, self.beta)?.exp())
    }

    /// Discretize on `steps + 1` evenly spaced points in `[0, 1]`.
    ///
    /// Fails with [`Error::NotImplemented`] when `alpha < 1` or `beta < 1`:
    /// the density is unbounded at the edges and point evaluation is invalid.
    /// [`Beta::make_cdf`] handles that case.
    pub fn make_pmf(&self, steps: usize) -> Result<Pmf<OrderedFloat<f64>>> {
        if self.alpha < 1.0 || self.beta < 1.0 {
            return Err(Error::NotImplemented(format!(
                "Beta::make_pmf with alpha={} beta={} (both must be >= 1)",
                self.alpha, self.beta
            )));
        }
        let xs = grid(steps)?;
        let mut pmf = Pmf::new();
        for x in xs {
            pmf.set(OrderedFloat(x), self.eval_pdf(x));
        }
        pmf.normalize()?;
        Ok(pmf)
    }

    /// Cdf on `steps + 1` evenly spaced points, from the regularized
    /// incomplete beta function.
    pub fn make_cdf(&self, steps: usize) -> Result<Cdf<OrderedFloat<f64>>> {
        let xs = grid(steps)?;
        let mut ps = Vec::with_capacity(xs.len());
        for &x in &xs {
            let p = checked_beta_reg(self.alpha, self.beta, x)
                .map_err(|e| Error::Validation(e.to_string()))?;
            ps.push(p);
        }
        Cdf::new(xs.into_iter().map(OrderedFloat).collect(), ps)
    }

    /// Draw one success probability.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let dist = rand_distr::Beta::new(self.alpha, self.beta)
            .map_err(|e| Error::Validation(e.to_string()))?;
        Ok(dist.sample(rng))
    }
}

fn grid(steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(Error::Validation("steps must be >= 1".to_string()));
    }
    Ok(linspace(0.0, 1.0, steps + 1))
}
