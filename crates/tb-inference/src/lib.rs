//! # tb-inference
//!
//! Bayesian inference over enumerable hypothesis spaces.
//!
//! The [`Suite`] holds the current belief as a [`tb_prob::Pmf`] and refines
//! it with observations through a client-supplied [`tb_core::Likelihood`].
//! Every query a Pmf answers (mode, mean, percentiles, credible intervals)
//! is available on the Suite directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Sequential and batch Bayesian updates.
pub mod suite;

pub use suite::Suite;
pub use tb_core::{Likelihood, MissingLikelihood};
