//! Normal kernel shared by the Gaussian density and the KDE.

use tb_core::{Error, Result};

/// Natural log of `sqrt(2π)`.
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Standard normal density `φ(z)`.
#[inline]
fn standard_pdf(z: f64) -> f64 {
    (-0.5 * z * z - LN_SQRT_2PI).exp()
}

/// Density of `N(mu, sigma)` at `x`: `φ((x - mu) / sigma) / sigma`.
///
/// `sigma` is trusted; callers check it once with [`validate_sigma`].
#[inline]
pub(crate) fn density(x: f64, mu: f64, sigma: f64) -> f64 {
    standard_pdf((x - mu) / sigma) / sigma
}

pub(crate) fn validate_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::Validation(format!("sigma must be finite and > 0, got {}", sigma)));
    }
    Ok(())
}
