//! Meta crate that re-exports the pullcalc building blocks with sensible
//! defaults. Depend on this crate and opt into specific layers via feature
//! flags while keeping access to the underlying crates when deeper
//! integration is required.

#[cfg(feature = "common")]
pub use pullcalc_common as common;

#[cfg(feature = "eval")]
pub use pullcalc_eval as eval;

#[cfg(feature = "common")]
pub use pullcalc_common::{Decimal, DistributionError, ErrorKind, Probability, ResultGrid};

#[cfg(feature = "eval")]
pub use pullcalc_eval::{
    CellResult, DistributionEngine, EngineConfig, GridOutput, PercentageFormat,
};
