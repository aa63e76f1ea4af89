//! Discrete probability building blocks for thinkbayes.
//!
//! - [`WeightedMap`] / [`Pmf`]: key to (possibly unnormalized) mass,
//! - [`Cdf`]: cumulative view with inverse lookup and sampling,
//! - [`Pdf`] implementations ([`GaussianPdf`], [`EstimatedPdf`]) discretized onto grids,
//! - [`Beta`]: conjugate prior for binomial data,
//! - [`operations`]: sums, maxima and mixtures of distributions,
//! - [`odds`]: odds/probability conversions.
//!
//! Continuous-valued keys use [`OrderedFloat`] so they can be hashed and sorted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod beta;
pub mod cdf;
mod normal;
pub mod odds;
pub mod operations;
pub mod pdf;
pub mod pmf;
pub mod weighted_map;

pub use beta::Beta;
pub use cdf::Cdf;
pub use operations::{make_mixture, random_max, random_sum, sample_max, sample_sum};
pub use ordered_float::OrderedFloat;
pub use pdf::{BandwidthMethod, EstimatedPdf, GaussianPdf, Pdf, linspace};
pub use pmf::Pmf;
pub use weighted_map::WeightedMap;
