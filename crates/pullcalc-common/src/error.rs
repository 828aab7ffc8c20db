//! Error taxonomy shared by the engine and its callers.
//!
//! - **`ErrorKind::Validation`**: malformed input collections or a
//!   non-numeric probability string.
//! - **`ErrorKind::Range`**: numeric configuration outside its declared bounds.
//!
//! Degenerate numeric results are not errors; they travel in-band as
//! [`crate::Probability::Indeterminate`].

use std::fmt;

use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Range,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validation => "ValidationError",
            Self::Range => "RangeError",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("{field} must be between {min} and {max}, received {received}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        received: f64,
    },
    #[error("{field} must contain at least one value")]
    EmptyInput { field: &'static str },
    #[error("{field} must be positive integers, received {received} at position {index}")]
    NonPositive {
        field: &'static str,
        index: usize,
        received: i64,
    },
    #[error("{field} must be distinct, received {value} more than once")]
    DuplicateValue { field: &'static str, value: u64 },
    #[error("{field} must be a numeric value, received {received:?}")]
    NonNumeric {
        field: &'static str,
        received: String,
    },
}

impl DistributionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::Range,
            Self::EmptyInput { .. }
            | Self::NonPositive { .. }
            | Self::DuplicateValue { .. }
            | Self::NonNumeric { .. } => ErrorKind::Validation,
        }
    }

    pub fn is_range(&self) -> bool {
        self.kind() == ErrorKind::Range
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Range check shared by every bounded setter.
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        // NaN fails both comparisons and must be rejected too.
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                field,
                min,
                max,
                received: value,
            })
        }
    }
}
