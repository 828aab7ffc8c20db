//! Binomial distribution engine
//!
//! Computes "exactly k" and "at least k" success probabilities over a grid of
//! pull amounts and desired-copies values, memoizing coefficients and
//! probabilities for the lifetime of one engine instance.

pub mod binomial;
pub mod cache;
pub mod distribution;
pub mod metrics;

#[cfg(test)]
mod tests;

pub use cache::{BinomialCache, CacheSizes, ProbabilityCache, ProbabilityKey};
pub use distribution::{CellResult, DistributionEngine, GridOutput};
pub use metrics::CacheMetrics;

use pullcalc_common::DistributionError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MIN_PRECISION: u32 = 0;
pub const MAX_PRECISION: u32 = 100;
pub const DEFAULT_PRECISION: u32 = 20;

pub const MIN_CUT_OFF_DISPLAY_PRECISION: u32 = 0;
pub const MAX_CUT_OFF_DISPLAY_PRECISION: u32 = 10;
pub const DEFAULT_CUT_OFF_DISPLAY_PRECISION: u32 = 4;

/// Bounds for the two percentage inputs of the success probability.
pub const MIN_CHANCE: f64 = 0.0;
pub const MAX_CHANCE: f64 = 100.0;
pub const DEFAULT_GENERIC_CHANCE: f64 = 1.0;
pub const DEFAULT_SPECIFIC_CHANCE: f64 = 100.0;
/// `generic% * specific% / 10000` is the per-pull success probability.
pub const PROBABILITY_DENOMINATOR: u64 = 10_000;

/// Configuration for the distribution engine
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Decimal digits carried through every arbitrary-precision operation.
    pub precision: u32,
    /// Percentages below `10^-d` render as zero, and `d` decimals are displayed.
    pub cut_off_display_precision: u32,
    /// Drop memoized values whenever the precision changes. Off by default, in
    /// which case entries computed at an older precision keep being served.
    pub clear_caches_on_precision_change: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            cut_off_display_precision: DEFAULT_CUT_OFF_DISPLAY_PRECISION,
            clear_caches_on_precision_change: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), DistributionError> {
        check_precision(self.precision)?;
        check_cut_off_display_precision(self.cut_off_display_precision)
    }
}

pub(crate) fn check_precision(precision: u32) -> Result<(), DistributionError> {
    DistributionError::check_range(
        "Precision",
        f64::from(precision),
        f64::from(MIN_PRECISION),
        f64::from(MAX_PRECISION),
    )
}

pub(crate) fn check_cut_off_display_precision(digits: u32) -> Result<(), DistributionError> {
    DistributionError::check_range(
        "Cut-off display precision",
        f64::from(digits),
        f64::from(MIN_CUT_OFF_DISPLAY_PRECISION),
        f64::from(MAX_CUT_OFF_DISPLAY_PRECISION),
    )
}
