use std::fmt;

use crate::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rendering of [`Probability::Indeterminate`] for string consumers.
pub const INDETERMINATE_SENTINEL: &str = "INF";

/// Outcome of a probability computation.
///
/// `Zero` covers both an exact zero and a value too small to show at the
/// configured precision. `Indeterminate` marks a degenerate input (for example a
/// success probability outside `[0, 1]`) and must not be read as a probability.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Probability {
    Finite(Decimal),
    Zero,
    Indeterminate,
}

impl Probability {
    /// Wrap a decimal, folding zero into [`Probability::Zero`].
    pub fn from_decimal(value: Decimal) -> Self {
        if value.is_zero() {
            Self::Zero
        } else {
            Self::Finite(value)
        }
    }

    /// Numeric value, `None` when indeterminate.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Finite(value) => Some(value.clone()),
            Self::Zero => Some(Decimal::zero()),
            Self::Indeterminate => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Finite(value) => value.to_f64(),
            Self::Zero => 0.0,
            Self::Indeterminate => f64::NAN,
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value}"),
            Self::Zero => f.write_str("0"),
            Self::Indeterminate => f.write_str(INDETERMINATE_SENTINEL),
        }
    }
}
