//! Engine-lifetime memoization caches.
//!
//! Entries are populated lazily and never evicted; growth is bounded only by
//! the inputs an engine instance is asked to evaluate.

use pullcalc_common::{Decimal, Probability};
use rustc_hash::FxHashMap;

/// Binomial coefficients keyed by the exact `(n, k)` pair as called.
#[derive(Debug, Default)]
pub struct BinomialCache {
    cache: FxHashMap<(u64, u64), Decimal>,
}

impl BinomialCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, n: u64, k: u64) -> Option<&Decimal> {
        self.cache.get(&(n, k))
    }

    pub fn insert(&mut self, n: u64, k: u64, coefficient: Decimal) {
        self.cache.insert((n, k), coefficient);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Key for exact and at-least probabilities.
///
/// The success probability is part of the key because it can change between
/// configuration calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbabilityKey {
    pub successes: u64,
    pub trials: u64,
    pub probability: Decimal,
}

impl ProbabilityKey {
    pub fn new(successes: u64, trials: u64, probability: &Decimal) -> Self {
        Self {
            successes,
            trials,
            probability: probability.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProbabilityCache {
    cache: FxHashMap<ProbabilityKey, Probability>,
}

impl ProbabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ProbabilityKey) -> Option<&Probability> {
        self.cache.get(key)
    }

    pub fn insert(&mut self, key: ProbabilityKey, probability: Probability) {
        self.cache.insert(key, probability);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Entry counts of the three engine caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheSizes {
    pub binomial: usize,
    pub exact: usize,
    pub at_least: usize,
}

impl CacheSizes {
    pub fn total(&self) -> usize {
        self.binomial + self.exact + self.at_least
    }
}
