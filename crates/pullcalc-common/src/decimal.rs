//! Fixed-scale arbitrary-precision decimal.
//!
//! A [`Decimal`] is a signed big-integer mantissa together with a scale (the
//! number of digits after the decimal point). Every arithmetic operation takes
//! the scale of its result and **truncates toward zero** to it, so a chain of
//! operations carried out at precision `p` never carries more than `p`
//! fractional digits.
//!
//! Equality, ordering and hashing are numeric (`0.0080 == 0.008`), while
//! `Display` keeps the carried scale (`"0.00800000000000000000"`).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num::bigint::{BigInt, Sign};
use num::traits::{One, Signed, Zero};
use num::Integer;
use thiserror::Error;

/// Returned when a string is not a plain decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a plain decimal number")]
pub struct ParseDecimalError(pub String);

#[derive(Debug, Clone)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

fn ten_pow(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

impl Decimal {
    /// Build a decimal worth `mantissa * 10^-scale`.
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }

    /// Shortest round-trip decimal rendering of `value`; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{value}").parse().ok()
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Re-express at `scale` fractional digits, truncating toward zero when narrowing.
    pub fn with_scale(&self, scale: u32) -> Self {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Self::new(&self.mantissa * ten_pow(scale - self.scale), scale),
            Ordering::Less => Self::new(&self.mantissa / ten_pow(self.scale - scale), scale),
        }
    }

    pub fn add(&self, other: &Decimal, scale: u32) -> Decimal {
        let common = self.scale.max(other.scale);
        let sum = self.with_scale(common).mantissa + other.with_scale(common).mantissa;
        Self::new(sum, common).with_scale(scale)
    }

    pub fn sub(&self, other: &Decimal, scale: u32) -> Decimal {
        let common = self.scale.max(other.scale);
        let diff = self.with_scale(common).mantissa - other.with_scale(common).mantissa;
        Self::new(diff, common).with_scale(scale)
    }

    pub fn mul(&self, other: &Decimal, scale: u32) -> Decimal {
        Self::new(&self.mantissa * &other.mantissa, self.scale + other.scale).with_scale(scale)
    }

    /// Quotient truncated to `scale` digits; `None` when dividing by zero.
    pub fn div(&self, other: &Decimal, scale: u32) -> Option<Decimal> {
        if other.is_zero() {
            return None;
        }
        let numerator = &self.mantissa * ten_pow(scale + other.scale);
        let denominator = &other.mantissa * ten_pow(self.scale);
        Some(Self::new(numerator / denominator, scale))
    }

    /// `10^exp` truncated to `scale` fractional digits.
    ///
    /// Negative exponents finer than the scale come out as zero.
    pub fn pow10(exp: i32, scale: u32) -> Decimal {
        if exp >= 0 {
            return Self::new(ten_pow(exp.unsigned_abs()), 0).with_scale(scale);
        }
        let magnitude = exp.unsigned_abs();
        if magnitude > scale {
            Self::new(BigInt::zero(), scale)
        } else {
            Self::new(ten_pow(scale - magnitude), scale)
        }
    }

    /// Round half away from zero to `places` fractional digits.
    pub fn round_half_up(&self, places: u32) -> Decimal {
        if places >= self.scale {
            return self.with_scale(places);
        }
        let factor = ten_pow(self.scale - places);
        let (mut quotient, remainder) = self.mantissa.div_rem(&factor);
        if remainder.abs() * 2u32 >= factor {
            quotient += self.mantissa.signum();
        }
        Self::new(quotient, places)
    }

    /// Natural logarithm as `f64`.
    ///
    /// Taken from the leading significant digits plus the decimal exponent, so
    /// values far beyond `f64::MAX` still produce a finite result. Zero maps to
    /// `-inf` and negative values to `NaN`.
    pub fn ln(&self) -> f64 {
        match self.mantissa.sign() {
            Sign::NoSign => f64::NEG_INFINITY,
            Sign::Minus => f64::NAN,
            Sign::Plus => {
                let digits = self.mantissa.to_str_radix(10);
                let taken = digits.len().min(17);
                let lead: f64 = digits[..taken].parse().unwrap_or(f64::NAN);
                let shift = (digits.len() - taken) as f64 - f64::from(self.scale);
                lead.ln() + shift * std::f64::consts::LN_10
            }
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    fn normalized(&self) -> (BigInt, u32) {
        if self.mantissa.is_zero() {
            return (BigInt::zero(), 0);
        }
        let ten = BigInt::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        (mantissa, scale)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError(s.to_string());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let scale = u32::try_from(frac_part.len()).map_err(|_| err())?;
        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(err)?;
        let mantissa = if negative { -magnitude } else { magnitude };
        Ok(Self::new(mantissa, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        let digits = self.mantissa.abs().to_str_radix(10);
        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.scale.max(other.scale);
        self.with_scale(common)
            .mantissa
            .cmp(&other.with_scale(common).mantissa)
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
