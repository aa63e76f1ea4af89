//! Weighted key container: the base of every distribution in this crate.
//!
//! A [`WeightedMap`] maps hashable keys to non-negative weights. A key that
//! is not present has weight 0. Ordering requirements are layered onto the
//! individual operations that need them.

use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::Hash;

use tb_core::{Error, Result};

/// Mapping from key to non-negative weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedMap<K: Hash + Eq> {
    weights: HashMap<K, f64>,
}

impl<K: Hash + Eq> Default for WeightedMap<K> {
    fn default() -> Self {
        Self { weights: HashMap::new() }
    }
}

impl<K: Hash + Eq> WeightedMap<K> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map where each key has weight 1.
    ///
    /// Repeated keys collapse into one entry.
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        Self { weights: keys.into_iter().map(|k| (k, 1.0)).collect() }
    }

    /// Create a map from parallel key and weight lists.
    pub fn from_pairs(keys: Vec<K>, weights: Vec<f64>) -> Result<Self> {
        if keys.len() != weights.len() {
            return Err(Error::LengthMismatch { keys: keys.len(), weights: weights.len() });
        }
        if let Some(w) = weights.iter().find(|w| w.is_nan() || **w < 0.0) {
            return Err(Error::Validation(format!("weights must be non-negative, got {}", w)));
        }
        Ok(Self { weights: keys.into_iter().zip(weights).collect() })
    }

    pub(crate) fn from_map(weights: HashMap<K, f64>) -> Self {
        Self { weights }
    }

    /// Set the weight of `key`, overwriting any previous value.
    ///
    /// Unchecked; constructors that take caller data validate it instead.
    pub fn set(&mut self, key: K, weight: f64) {
        self.weights.insert(key, weight);
    }

    /// Weight of `key`, or 0 when absent.
    #[inline]
    pub fn prob(&self, key: &K) -> f64 {
        self.prob_or(key, 0.0)
    }

    /// Weight of `key`, or `default` when absent.
    #[inline]
    pub fn prob_or(&self, key: &K, default: f64) -> f64 {
        self.weights.get(key).copied().unwrap_or(default)
    }

    /// Add `delta` to the weight of `key` (absent keys start from 0).
    pub fn increment(&mut self, key: K, delta: f64) {
        *self.weights.entry(key).or_insert(0.0) += delta;
    }

    /// Add 1 to the weight of `key`.
    pub fn incr(&mut self, key: K) {
        self.increment(key, 1.0);
    }

    /// Multiply the weight of `key` by `factor`. No-op when `key` is absent.
    ///
    /// A factor of 0 keeps the key with weight 0.
    pub fn scale(&mut self, key: &K, factor: f64) {
        if let Some(w) = self.weights.get_mut(key) {
            *w *= factor;
        }
    }

    /// Remove `key`, returning its weight.
    pub fn remove(&mut self, key: &K) -> Option<f64> {
        self.weights.remove(key)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Whether `key` is present (possibly with weight 0).
    pub fn contains(&self, key: &K) -> bool {
        self.weights.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Keys in unspecified order.
    pub fn keys(&self) -> hash_map::Keys<'_, K, f64> {
        self.weights.keys()
    }

    /// `(key, weight)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.weights.iter().map(|(k, w)| (k, *w))
    }

    pub(crate) fn weights_mut(&mut self) -> hash_map::ValuesMut<'_, K, f64> {
        self.weights.values_mut()
    }
}

impl<K: Hash + Eq + Ord> WeightedMap<K> {
    /// `(key, weight)` pairs sorted by ascending key.
    pub fn sorted_items(&self) -> Vec<(&K, f64)> {
        let mut items: Vec<(&K, f64)> = self.iter().collect();
        items.sort_unstable_by(|a, b| a.0.cmp(b.0));
        items
    }
}

impl<K: Hash + Eq> FromIterator<(K, f64)> for WeightedMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, w) in iter {
            map.increment(k, w);
        }
        map
    }
}
