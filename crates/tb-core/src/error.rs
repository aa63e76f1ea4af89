//! Error types for thinkbayes

use thiserror::Error;

/// thinkbayes error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Normalization attempted on a map whose weights sum to zero.
    ///
    /// After an update this means no hypothesis can explain the data.
    #[error("Total probability is zero: cannot normalize")]
    TotalProbabilityZero,

    /// Probability argument outside `[0, 1]`.
    #[error("Probability out of range: {0} (expected 0 <= p <= 1)")]
    ProbabilityOutOfRange(f64),

    /// Percentile argument outside `[0, 100]`.
    #[error("Percentile out of range: {0} (expected 0 <= p <= 100)")]
    PercentileOutOfRange(f64),

    /// Operation needs at least one value.
    #[error("Distribution is empty")]
    EmptyDistribution,

    /// A suite was updated without a likelihood function.
    #[error("Likelihood is not implemented for this suite")]
    UnimplementedLikelihood,

    /// Parallel key/weight sequences differ in length.
    #[error("Length mismatch: {keys} keys but {weights} weights")]
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not implemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::TotalProbabilityZero.to_string(),
            "Total probability is zero: cannot normalize"
        );
        assert_eq!(
            Error::LengthMismatch { keys: 3, weights: 2 }.to_string(),
            "Length mismatch: 3 keys but 2 weights"
        );
        assert!(Error::ProbabilityOutOfRange(1.5).to_string().contains("1.5"));
    }
}
