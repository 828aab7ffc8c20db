//! Cut-off percentage rendering.

use pullcalc_common::{Decimal, INDETERMINATE_SENTINEL, Probability};

pub const PERCENTAGE_CONVERSION_FACTOR: u64 = 100;

/// Renders probabilities as percentages with a fixed number of decimals.
///
/// Percentages below `10^-display_places` are shown as a zero percentage, so
/// with the default of 4 places anything under `0.0001%` reads `"0.0000%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageFormat {
    display_places: u32,
    precision: u32,
}

impl PercentageFormat {
    pub fn new(display_places: u32, precision: u32) -> Self {
        Self {
            display_places,
            precision,
        }
    }

    pub fn display_places(&self) -> u32 {
        self.display_places
    }

    /// Smallest percentage that is not cut off.
    pub fn cut_off(&self) -> Decimal {
        Decimal::pow10(-(self.display_places as i32), self.display_places)
    }

    pub fn zero(&self) -> String {
        if self.display_places == 0 {
            "0%".to_string()
        } else {
            format!("0.{}%", "0".repeat(self.display_places as usize))
        }
    }

    pub fn format_decimal(&self, probability: &Decimal) -> String {
        let percentage =
            probability.mul(&Decimal::from(PERCENTAGE_CONVERSION_FACTOR), self.precision);
        if percentage < self.cut_off() {
            return self.zero();
        }
        format!("{}%", percentage.round_half_up(self.display_places))
    }

    /// Indeterminate values pass through as the `"INF"` sentinel.
    pub fn format(&self, probability: &Probability) -> String {
        match probability {
            Probability::Finite(value) => self.format_decimal(value),
            Probability::Zero => self.zero(),
            Probability::Indeterminate => INDETERMINATE_SENTINEL.to_string(),
        }
    }
}
