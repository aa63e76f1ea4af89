//! Common data types for thinkbayes

use serde::{Deserialize, Serialize};

/// Central credible interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibleInterval<T> {
    /// Lower bound (value at the lower tail probability).
    pub low: T,
    /// Upper bound (value at the upper tail probability).
    pub high: T,
}

impl<T> CredibleInterval<T> {
    /// Create a new interval.
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Apply `f` to both bounds.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> CredibleInterval<U> {
        CredibleInterval { low: f(self.low), high: f(self.high) }
    }
}

impl<T: PartialOrd> CredibleInterval<T> {
    /// Whether `x` lies within the closed interval.
    pub fn contains(&self, x: &T) -> bool {
        &self.low <= x && x <= &self.high
    }
}

impl<T> From<(T, T)> for CredibleInterval<T> {
    fn from((low, high): (T, T)) -> Self {
        Self { low, high }
    }
}
