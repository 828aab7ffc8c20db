//! Lightweight metrics for cache performance tracking

/// Hit/miss counters for the three engine caches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub binomial_hits: usize,
    pub binomial_misses: usize,
    pub exact_hits: usize,
    pub exact_misses: usize,
    pub at_least_hits: usize,
    pub at_least_misses: usize,
    // Exact results that came out indeterminate
    pub indeterminate_results: usize,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_binomial_hit(&mut self) {
        self.binomial_hits += 1;
    }

    pub fn inc_binomial_miss(&mut self) {
        self.binomial_misses += 1;
    }

    pub fn inc_exact_hit(&mut self) {
        self.exact_hits += 1;
    }

    pub fn inc_exact_miss(&mut self) {
        self.exact_misses += 1;
    }

    pub fn inc_at_least_hit(&mut self) {
        self.at_least_hits += 1;
    }

    pub fn inc_at_least_miss(&mut self) {
        self.at_least_misses += 1;
    }

    pub fn inc_indeterminate(&mut self) {
        self.indeterminate_results += 1;
    }

    pub fn total_hits(&self) -> usize {
        self.binomial_hits + self.exact_hits + self.at_least_hits
    }

    pub fn total_misses(&self) -> usize {
        self.binomial_misses + self.exact_misses + self.at_least_misses
    }

    /// Reset all metrics to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "CacheMetrics {{ binomial: {}/{}, exact: {}/{}, at_least: {}/{}, indeterminate: {} }}",
            self.binomial_hits,
            self.binomial_hits + self.binomial_misses,
            self.exact_hits,
            self.exact_hits + self.exact_misses,
            self.at_least_hits,
            self.at_least_hits + self.at_least_misses,
            self.indeterminate_results,
        )
    }
}
