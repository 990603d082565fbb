//! Module: number
//! Responsibility: arbitrary-precision decimal numbers and their ordered
//! byte payload.
//! Does not own: field tags or terminators.
//! Boundary: shared by value fields and structural count fields.

pub(crate) mod codec;
mod digits;

#[cfg(test)]
mod tests;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error as ThisError;

// Largest power of ten whose integer value can still fit a u64/usize.
const MAX_INTEGER_EXPONENT: i64 = 20;

///
/// NumberError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NumberError {
    #[error("invalid number literal '{input}'")]
    InvalidSyntax { input: String },

    #[error("number is not finite")]
    NonFinite,

    #[error("number exponent overflow")]
    ExponentOverflow,
}

///
/// Number
///
/// Decimal `mantissa * 10^exponent` with an unbounded mantissa.
///
/// Invariant: the mantissa carries no trailing zero digits and zero is stored
/// with exponent 0, so derived equality is numeric equality (`1.0 == 1`).
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Number {
    mantissa: BigInt,
    exponent: i64,
}

impl Number {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Construct `mantissa * 10^exponent`.
    #[must_use]
    pub fn new(mantissa: impl Into<BigInt>, exponent: i32) -> Self {
        let (mantissa, zeros) = strip_trailing_zeros(mantissa.into());
        if mantissa.is_zero() {
            return Self::zero();
        }

        // A mantissa held in memory has far fewer than i64::MAX - i32::MAX
        // trailing zeros.
        Self {
            mantissa,
            exponent: i64::from(exponent) + zeros,
        }
    }

    pub(crate) fn normalized(mantissa: BigInt, exponent: i64) -> Result<Self, NumberError> {
        let (mantissa, zeros) = strip_trailing_zeros(mantissa);
        if mantissa.is_zero() {
            return Ok(Self::zero());
        }

        let exponent = exponent
            .checked_add(zeros)
            .ok_or(NumberError::ExponentOverflow)?;

        Ok(Self { mantissa, exponent })
    }

    pub(crate) fn from_sign_magnitude(
        negative: bool,
        magnitude: BigUint,
        exponent: i64,
    ) -> Result<Self, NumberError> {
        let sign = if negative { Sign::Minus } else { Sign::Plus };

        Self::normalized(BigInt::from_biguint(sign, magnitude), exponent)
    }

    #[must_use]
    pub const fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    #[must_use]
    pub const fn exponent(&self) -> i64 {
        self.exponent
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    fn signum(&self) -> i8 {
        match self.mantissa.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Exact integer value, if this number is a non-negative integer that
    /// fits a `usize`.
    #[must_use]
    pub fn to_usize(&self) -> Option<usize> {
        self.to_integer()?.to_usize()
    }

    /// Exact integer value, if this number is an integer that fits an `i64`.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer()?.to_i64()
    }

    /// Nearest finite `f64`, if one exists.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.to_string()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn to_integer(&self) -> Option<BigInt> {
        if self.exponent < 0 || self.exponent > MAX_INTEGER_EXPONENT {
            return None;
        }

        let scale = u32::try_from(self.exponent).ok()?;

        Some(&self.mantissa * BigInt::from(10u8).pow(scale))
    }

    // Decimal digits of |mantissa| plus the exponent of the leading digit
    // position (value = 0.d1d2.. * 10^adjusted), widened past i64.
    fn magnitude_parts(&self) -> (String, i128) {
        let digits = self.mantissa.magnitude().to_string();
        let len = i128::try_from(digits.len()).unwrap_or(i128::MAX);

        (digits, i128::from(self.exponent) + len)
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = self.signum().cmp(&other.signum());
        if sign != Ordering::Equal || self.is_zero() {
            return sign;
        }

        let (left_digits, left_adjusted) = self.magnitude_parts();
        let (right_digits, right_adjusted) = other.magnitude_parts();
        let magnitude = left_adjusted
            .cmp(&right_adjusted)
            .then_with(|| left_digits.as_bytes().cmp(right_digits.as_bytes()));

        if self.is_negative() {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.is_negative() {
            f.write_str("-")?;
        }

        let (digits, adjusted) = self.magnitude_parts();
        let exponent = self.exponent;

        // Plain notation while it stays short, scientific otherwise.
        if exponent >= 0 && adjusted <= 21 {
            f.write_str(&digits)?;
            for _ in 0..exponent {
                f.write_str("0")?;
            }
            Ok(())
        } else if exponent < 0 && adjusted > 0 {
            let (whole, frac) = digits.split_at(usize::try_from(adjusted).unwrap_or(0));
            write!(f, "{whole}.{frac}")
        } else if exponent < 0 && adjusted > -6 {
            f.write_str("0.")?;
            for _ in adjusted..0 {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        } else {
            let (lead, rest) = digits.split_at(1);
            let scientific = adjusted - 1;
            if rest.is_empty() {
                write!(f, "{lead}e{scientific}")
            } else {
                write!(f, "{lead}.{rest}e{scientific}")
            }
        }
    }
}

// Drop trailing zero digits, returning how many were removed.
fn strip_trailing_zeros(mut mantissa: BigInt) -> (BigInt, i64) {
    let mut zeros = 0;
    if mantissa.is_zero() {
        return (mantissa, zeros);
    }

    let ten = BigInt::from(10u8);
    while (&mantissa % &ten).is_zero() {
        mantissa /= &ten;
        zeros += 1;
    }

    (mantissa, zeros)
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::InvalidSyntax {
            input: input.to_string(),
        };

        let (negative, unsigned) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };

        let (coefficient, exponent_text) = match unsigned.find(['e', 'E']) {
            Some(split) => (&unsigned[..split], Some(&unsigned[split + 1..])),
            None => (unsigned, None),
        };

        let (whole, frac) = coefficient.split_once('.').unwrap_or((coefficient, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let exponent = match exponent_text {
            Some(text) => parse_exponent(text).ok_or_else(invalid)??,
            None => 0,
        };

        let digits = format!("{whole}{frac}");
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let frac_len = i64::try_from(frac.len()).map_err(|_| NumberError::ExponentOverflow)?;
        let exponent = exponent
            .checked_sub(frac_len)
            .ok_or(NumberError::ExponentOverflow)?;

        Self::from_sign_magnitude(negative, magnitude, exponent)
    }
}

// Outer None: not an exponent literal. Inner Err: syntactically fine but too large.
fn parse_exponent(text: &str) -> Option<Result<i64, NumberError>> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(text.parse::<i64>().map_err(|_| NumberError::ExponentOverflow))
}

impl TryFrom<f64> for Number {
    type Error = NumberError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(NumberError::NonFinite);
        }

        // `{:e}` renders the shortest text that round-trips the f64.
        format!("{value:e}").parse()
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

macro_rules! impl_number_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self::new(value, 0)
                }
            }
        )*
    };
}

impl_number_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
