//! Binomial "pull" probability engine.
//!
//! Given a per-pull success probability, computes the chance of getting
//! exactly `k`, or at least `k`, desired copies within `n` pulls for every cell
//! of a configured grid, and renders the results as cut-off percentages.
//!
//! ```
//! use pullcalc_eval::{DistributionEngine, GridOutput};
//!
//! let mut engine = DistributionEngine::new();
//! engine.set_success_probability(1.0, 80.0).unwrap();
//! engine.set_desired_copies_amounts(&[1]).unwrap();
//! engine.set_pull_amounts(&[1]).unwrap();
//!
//! let grid = engine.at_least_distribution(GridOutput::Percentage);
//! assert_eq!(grid.get(1, 1).map(String::as_str), Some("0.8000%"));
//! ```

pub mod engine;
pub mod format;

pub use engine::{
    CacheMetrics, CacheSizes, CellResult, DistributionEngine, EngineConfig, GridOutput,
};
pub use format::PercentageFormat;
pub use pullcalc_common::{Decimal, DistributionError, ErrorKind, Probability, ResultGrid};
