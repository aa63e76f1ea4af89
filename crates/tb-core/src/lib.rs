//! # tb-core
//!
//! Core types shared by the thinkbayes crates:
//! - the workspace-wide [`Error`] and [`Result`],
//! - the [`Likelihood`] capability that client problems implement,
//! - small serializable result types ([`CredibleInterval`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{Likelihood, MissingLikelihood};
pub use types::CredibleInterval;
