//! Core traits for thinkbayes
//!
//! A [`Likelihood`] is the one extension point client code supplies: it maps
//! an observation and a hypothesis to `P(data | hypothesis)`. The update
//! engine (`tb-inference`) depends only on this trait, never on concrete
//! problem types.

use crate::{Error, Result};

/// Likelihood of observed data under a hypothesis.
///
/// Implementations return a non-negative real. Returning `0.0` means the
/// hypothesis cannot explain the data; returning an error means the data or
/// hypothesis was not recognized at all.
///
/// Any `Fn(&D, &H) -> f64` closure is a likelihood.
pub trait Likelihood<D: ?Sized, H> {
    /// Compute `P(data | hypo)`.
    fn likelihood(&self, data: &D, hypo: &H) -> Result<f64>;
}

impl<D: ?Sized, H, F> Likelihood<D, H> for F
where
    F: Fn(&D, &H) -> f64,
{
    #[inline]
    fn likelihood(&self, data: &D, hypo: &H) -> Result<f64> {
        Ok(self(data, hypo))
    }
}

/// Placeholder for a suite that has no likelihood yet.
///
/// Every call fails with [`Error::UnimplementedLikelihood`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingLikelihood;

impl<D: ?Sized, H> Likelihood<D, H> for MissingLikelihood {
    fn likelihood(&self, _data: &D, _hypo: &H) -> Result<f64> {
        Err(Error::UnimplementedLikelihood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cookie;

    impl Likelihood<str, &'static str> for Cookie {
        fn likelihood(&self, data: &str, hypo: &&'static str) -> Result<f64> {
            match (*hypo, data) {
                ("Bowl 1", "vanilla") => Ok(0.75),
                ("Bowl 1", "chocolate") => Ok(0.25),
                ("Bowl 2", _) => Ok(0.5),
                _ => Err(Error::Validation(format!("unknown bowl {hypo}"))),
            }
        }
    }

    #[test]
    fn test_closure_is_likelihood() {
        let dice = |data: &u32, hypo: &u32| if hypo < data { 0.0 } else { 1.0 / *hypo as f64 };
        assert_eq!(dice.likelihood(&6, &4).unwrap(), 0.0);
        assert!((dice.likelihood(&6, &8).unwrap() - 0.125).abs() < 1e-15);
    }

    #[test]
    fn test_struct_likelihood() {
        assert_eq!(Cookie.likelihood("vanilla", &"Bowl 1").unwrap(), 0.75);
        assert!(Cookie.likelihood("vanilla", &"Bowl 3").is_err());
    }

    #[test]
    fn test_missing_likelihood() {
        let err = Likelihood::<u32, u32>::likelihood(&MissingLikelihood, &1, &1).unwrap_err();
        assert_eq!(err, Error::UnimplementedLikelihood);
    }
}
