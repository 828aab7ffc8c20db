//! Binomial coefficients and probabilities.
//!
//! Exact probabilities are evaluated in log space,
//! `ln C(n,k) + k·ln(p) + (n−k)·ln(1−p)`, so neither large coefficients nor
//! tiny per-pull probabilities overflow or underflow before the final
//! exponentiation. At-least probabilities are the arbitrary-precision sum of
//! the exact terms `k..=n`.

use std::f64::consts::LN_10;

use pullcalc_common::{Decimal, DistributionError, Probability};

use super::DistributionEngine;
use super::cache::ProbabilityKey;

impl DistributionEngine {
    /// `C(n, k)` carried at the configured precision.
    ///
    /// Built with the multiplicative recurrence `C(n,i) = C(n,i−1)·(n−i+1)/i`,
    /// rounding every step to the precision, so no factorial is ever formed.
    /// A cached `C(n,k−1)` at the current precision is the last step of the
    /// same chain, so the walk resumes from it.
    pub fn binomial_coefficient(&mut self, n: u64, k: u64) -> Decimal {
        if k > n {
            return Decimal::zero();
        }
        if k == 0 || k == n {
            return Decimal::one();
        }
        if let Some(hit) = self.binomial_cache.get(n, k) {
            self.metrics.inc_binomial_hit();
            return hit.clone();
        }
        self.metrics.inc_binomial_miss();

        let precision = self.config.precision;
        let (start, mut result) = match self.binomial_cache.get(n, k - 1) {
            Some(previous) if previous.scale() == precision => (k, previous.clone()),
            _ => (1, Decimal::one()),
        };
        for i in start..=k {
            let numerator = result.mul(&Decimal::from(n - i + 1), precision);
            result = numerator
                .div(&Decimal::from(i), precision)
                .unwrap_or_else(Decimal::zero);
        }

        self.binomial_cache.insert(n, k, result.clone());
        result
    }

    /// Probability of exactly `k` successes in `n` pulls.
    ///
    /// `probability` must be a plain decimal string; anything else is a
    /// [`DistributionError::NonNumeric`].
    pub fn exact_probability(
        &mut self,
        k: u64,
        n: u64,
        probability: &str,
    ) -> Result<Probability, DistributionError> {
        let p = parse_probability(probability)?;
        Ok(self.exact(k, n, &p))
    }

    /// Probability of at least `k` successes in `n` pulls.
    pub fn at_least_probability(
        &mut self,
        k: u64,
        n: u64,
        probability: &str,
    ) -> Result<Probability, DistributionError> {
        let p = parse_probability(probability)?;
        Ok(self.at_least(k, n, &p))
    }

    pub(crate) fn exact(&mut self, k: u64, n: u64, p: &Decimal) -> Probability {
        let key = ProbabilityKey::new(k, n, p);
        if let Some(hit) = self.exact_cache.get(&key) {
            self.metrics.inc_exact_hit();
            return hit.clone();
        }
        self.metrics.inc_exact_miss();

        let coefficient = self.binomial_coefficient(n, k);
        let failure = Decimal::one().sub(p, p.scale());
        let log_prob = coefficient.ln()
            + log_term(k, p.ln())
            + log_term(n.saturating_sub(k), failure.ln());
        let result = probability_from_log(log_prob, self.config.precision);

        if result.is_indeterminate() {
            self.metrics.inc_indeterminate();
            #[cfg(feature = "tracing")]
            tracing::debug!(k, n, p = %p, log_prob, "indeterminate exact probability");
        }

        self.exact_cache.insert(key, result.clone());
        result
    }

    pub(crate) fn at_least(&mut self, k: u64, n: u64, p: &Decimal) -> Probability {
        let key = ProbabilityKey::new(k, n, p);
        if let Some(hit) = self.at_least_cache.get(&key) {
            self.metrics.inc_at_least_hit();
            return hit.clone();
        }
        self.metrics.inc_at_least_miss();

        let precision = self.config.precision;
        let mut total = Decimal::zero();
        let mut result = None;
        for i in k..=n {
            match self.exact(i, n, p).as_decimal() {
                Some(term) => total = total.add(&term, precision),
                None => {
                    result = Some(Probability::Indeterminate);
                    break;
                }
            }
        }
        let result = result.unwrap_or_else(|| Probability::from_decimal(total));

        self.at_least_cache.insert(key, result.clone());
        result
    }
}

pub(crate) fn parse_probability(probability: &str) -> Result<Decimal, DistributionError> {
    probability
        .parse()
        .map_err(|_| DistributionError::NonNumeric {
            field: "Probability of success",
            received: probability.to_string(),
        })
}

/// `count · ln(value)`, where a zero count contributes nothing even if the
/// logarithm is infinite (`0 · ln 0 = 0`).
fn log_term(count: u64, ln_value: f64) -> f64 {
    if count == 0 {
        0.0
    } else {
        count as f64 * ln_value
    }
}

/// Map a log-probability back to a decimal at `precision` digits.
///
/// `-inf` is a plain zero; any other non-finite value is indeterminate. When
/// the exponentiated value rounds to zero at the precision, it is recovered
/// through `10^(logProb / ln 10)` only if that exponent is an exact integer,
/// otherwise it reports as zero.
pub(crate) fn probability_from_log(log_prob: f64, precision: u32) -> Probability {
    if log_prob == f64::NEG_INFINITY {
        return Probability::Zero;
    }
    if !log_prob.is_finite() {
        return Probability::Indeterminate;
    }

    let value = log_prob.exp();
    if !value.is_finite() {
        return Probability::Indeterminate;
    }
    let formatted = format!("{value:.prec$}", prec = precision as usize);
    let Ok(decimal) = formatted.parse::<Decimal>() else {
        return Probability::Indeterminate;
    };
    if !decimal.is_zero() {
        return Probability::Finite(decimal);
    }

    let exponent = log_prob / LN_10;
    if exponent.fract() != 0.0 {
        return Probability::Zero;
    }
    match i32::try_from(exponent as i64) {
        Ok(exp) => Probability::from_decimal(Decimal::pow10(exp, precision)),
        Err(_) => Probability::Zero,
    }
}
