//! Sequential Bayesian updates over a discrete hypothesis space.
//!
//! A [`Suite`] is a [`Pmf`] over hypotheses plus a [`Likelihood`]. Each
//! update multiplies every hypothesis weight by `P(data | hypo)` and
//! renormalizes; the normalizing constant is the evidence `P(data)`.
//!
//! Updates are all-or-nothing: every likelihood is evaluated and checked
//! before the first weight changes.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use tb_core::{Error, Likelihood, MissingLikelihood, Result};
use tb_prob::Pmf;

/// Posterior-so-far over hypotheses `H`, updated with observations `D`.
pub struct Suite<D: ?Sized, H: Hash + Eq, L = MissingLikelihood> {
    pmf: Pmf<H>,
    likelihood: L,
    _data: PhantomData<fn(&D)>,
}

impl<D: ?Sized, H: Hash + Eq> Suite<D, H> {
    /// Uniform prior over `hypos`.
    pub fn new(hypos: impl IntoIterator<Item = H>) -> Self {
        Self::from_pmf(Pmf::uniform(hypos))
    }

    /// Prior with explicit weights, normalized.
    pub fn from_pairs(hypos: Vec<H>, probs: Vec<f64>) -> Result<Self> {
        let mut pmf = Pmf::from_pairs(hypos, probs)?;
        pmf.normalize()?;
        Ok(Self::from_pmf(pmf))
    }

    /// Reuse an existing Pmf (for example a previous posterior) as the prior.
    pub fn from_pmf(prior: Pmf<H>) -> Self {
        Self { pmf: prior, likelihood: MissingLikelihood, _data: PhantomData }
    }
}

impl<D: ?Sized, H: Hash + Eq, L> Suite<D, H, L> {
    /// Replace the likelihood, keeping the current beliefs.
    pub fn with_likelihood<L2>(self, likelihood: L2) -> Suite<D, H, L2>
    where
        L2: Likelihood<D, H>,
    {
        Suite { pmf: self.pmf, likelihood, _data: PhantomData }
    }

    /// The likelihood in use.
    pub fn likelihood(&self) -> &L {
        &self.likelihood
    }

    /// Release the posterior.
    pub fn into_pmf(self) -> Pmf<H> {
        self.pmf
    }
}

impl<D, H, L> Suite<D, H, L>
where
    D: ?Sized,
    H: Hash + Eq + Clone,
    L: Likelihood<D, H>,
{
    /// Update with one observation. Returns the evidence `P(data)`.
    ///
    /// Fails with [`Error::TotalProbabilityZero`] when no hypothesis can
    /// explain `data`; the Suite is left untouched in that case.
    pub fn update(&mut self, data: &D) -> Result<f64> {
        let factors = self.factors(std::iter::once(data))?;
        let evidence = self.apply(factors)?;
        log::debug!("suite: update over {} hypotheses, evidence={:.6e}", self.pmf.len(), evidence);
        Ok(evidence)
    }

    /// Update with a batch of observations, normalizing once at the end.
    ///
    /// The posterior matches calling [`Suite::update`] once per datum; the
    /// returned constant is the joint evidence of the whole batch.
    pub fn update_set<'a, I>(&mut self, dataset: I) -> Result<f64>
    where
        I: IntoIterator<Item = &'a D>,
        D: 'a,
    {
        let dataset: Vec<&D> = dataset.into_iter().collect();
        let factors = self.factors(dataset.iter().copied())?;
        let evidence = self.apply(factors)?;
        log::debug!(
            "suite: batch update of {} observations over {} hypotheses, evidence={:.6e}",
            dataset.len(),
            self.pmf.len(),
            evidence
        );
        Ok(evidence)
    }

    /// Product of the likelihoods of every datum, per hypothesis.
    fn factors<'a, I>(&self, dataset: I) -> Result<Vec<(H, f64)>>
    where
        I: Iterator<Item = &'a D> + Clone,
        D: 'a,
    {
        let mut factors = Vec::with_capacity(self.pmf.len());
        for (hypo, _) in self.pmf.iter() {
            let mut factor = 1.0;
            for data in dataset.clone() {
                let like = self.likelihood.likelihood(data, hypo)?;
                if !like.is_finite() || like < 0.0 {
                    return Err(Error::Validation(format!(
                        "likelihood must be finite and non-negative, got {}",
                        like
                    )));
                }
                factor *= like;
            }
            factors.push((hypo.clone(), factor));
        }
        Ok(factors)
    }

    fn apply(&mut self, factors: Vec<(H, f64)>) -> Result<f64> {
        let posterior_total: f64 = factors.iter().map(|(h, f)| self.pmf.prob(h) * f).sum();
        if posterior_total == 0.0 {
            return Err(Error::TotalProbabilityZero);
        }
        for (hypo, factor) in &factors {
            self.pmf.scale(hypo, *factor);
        }
        self.pmf.normalize()
    }
}

impl<D: ?Sized, H: Hash + Eq, L> Deref for Suite<D, H, L> {
    type Target = Pmf<H>;

    fn deref(&self) -> &Self::Target {
        &self.pmf
    }
}

impl<D: ?Sized, H: Hash + Eq, L> DerefMut for Suite<D, H, L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pmf
    }
}

impl<D: ?Sized, H: Hash + Eq + Clone, L: Clone> Clone for Suite<D, H, L> {
    fn clone(&self) -> Self {
        Self { pmf: self.pmf.clone(), likelihood: self.likelihood.clone(), _data: PhantomData }
    }
}

impl<D: ?Sized, H: Hash + Eq + fmt::Debug, L> fmt::Debug for Suite<D, H, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite").field("pmf", &self.pmf).finish_non_exhaustive()
    }
}

impl<D: ?Sized, H, L> fmt::Display for Suite<D, H, L>
where
    H: Hash + Eq + Ord + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pmf, f)
    }
}
