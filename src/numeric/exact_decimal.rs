// ============================================================================
// Exact Decimal
// Arbitrary-precision signed decimal with canonical sign/magnitude/scale form
// ============================================================================

use super::errors::{NumericError, NumericResult};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Power of ten of the exact ceiling ("centillion").
pub const CEILING_EXPONENT: u32 = 303;

/// Finest scale a value may carry (10^-303).
pub const MIN_SCALE: i32 = -(CEILING_EXPONENT as i32);

/// Exact signed decimal: `value = sign × magnitude × 10^scale`.
///
/// The representation is canonical: zero is always `(0, 0, 0)`, and a non-zero
/// magnitude never ends in a zero digit (trailing zeros live in `scale`). Two
/// values are therefore equal exactly when their fields are equal, so `Eq` and
/// `Hash` are structural.
///
/// Public constructors and the `checked_*` operations keep every value within
/// `|value| <= 10^303` and `scale >= -303`. Leaving that range is reported as
/// [`NumericError::CeilingExceeded`] or [`NumericError::Inexact`], never as a
/// silently rounded result.
///
/// # Example
/// ```ignore
/// use huge_amount::numeric::ExactDecimal;
///
/// let stake = ExactDecimal::from_integer(1_500);
/// let payout = stake.checked_mul(&"2.5".parse()?)?;   // 3750
/// let share = payout.checked_div_truncating(&ExactDecimal::from_integer(7))?; // 535
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ExactDecimal {
    sign: i8,
    magnitude: BigUint,
    scale: i32,
}

// ============================================================================
// Powers of Ten
// ============================================================================

/// Compute 10^n as a big integer.
pub(crate) fn pow10(n: u32) -> BigUint {
    BigUint::from(10u32).pow(n)
}

/// Number of decimal digits in `n` (1 for zero).
pub(crate) fn digit_len(n: &BigUint) -> u32 {
    if n.is_zero() {
        return 1;
    }
    // 2^(bits-1) <= n < 2^bits bounds log10(n) to within one
    let mut estimate = ((n.bits() - 1) as f64 * std::f64::consts::LOG10_2) as u32;
    while estimate > 0 && *n < pow10(estimate) {
        estimate -= 1;
    }
    while *n >= pow10(estimate + 1) {
        estimate += 1;
    }
    estimate + 1
}

/// Fold trailing zero digits of a non-zero magnitude into the scale.
fn strip_trailing_zeros(mut magnitude: BigUint, mut scale: i64) -> (BigUint, i64) {
    let ten = BigUint::from(10u32);
    loop {
        let (quotient, remainder) = magnitude.div_rem(&ten);
        if !remainder.is_zero() {
            return (magnitude, scale);
        }
        magnitude = quotient;
        scale += 1;
    }
}

impl ExactDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Zero value.
    #[inline]
    pub fn zero() -> Self {
        Self {
            sign: 0,
            magnitude: BigUint::zero(),
            scale: 0,
        }
    }

    /// One (1).
    #[inline]
    pub fn one() -> Self {
        Self {
            sign: 1,
            magnitude: BigUint::one(),
            scale: 0,
        }
    }

    /// The ceiling itself, 10^303.
    pub fn ceiling() -> Self {
        Self {
            sign: 1,
            magnitude: BigUint::one(),
            scale: CEILING_EXPONENT as i32,
        }
    }

    /// Exactly 10^exponent. Fails above the ceiling.
    pub fn power_of_ten_value(exponent: u32) -> NumericResult<Self> {
        if exponent > CEILING_EXPONENT {
            return Err(NumericError::CeilingExceeded);
        }
        Ok(Self {
            sign: 1,
            magnitude: BigUint::one(),
            scale: exponent as i32,
        })
    }

    /// Create from an integer value. Never lossy.
    pub fn from_integer(value: i64) -> Self {
        Self::from_i128(value as i128)
    }

    /// Create from an unsigned integer value. Never lossy.
    pub fn from_u64(value: u64) -> Self {
        Self::from_i128(value as i128)
    }

    /// Create from a 128-bit integer value. Never lossy.
    pub fn from_i128(value: i128) -> Self {
        Self::from_small_parts(value < 0, BigUint::from(value.unsigned_abs()), 0)
    }

    /// Create from a big unsigned integer.
    ///
    /// # Errors
    /// Returns `CeilingExceeded` if the value is above 10^303.
    pub fn from_biguint(value: BigUint) -> NumericResult<Self> {
        Self::from_parts(false, value, 0)
    }

    /// Create from a big signed integer.
    ///
    /// # Errors
    /// Returns `CeilingExceeded` if the magnitude is above 10^303.
    pub fn from_bigint(value: BigInt) -> NumericResult<Self> {
        let (sign, magnitude) = value.into_parts();
        Self::from_parts(sign == Sign::Minus, magnitude, 0)
    }

    /// Create from sign, magnitude and scale, normalizing to canonical form.
    ///
    /// # Errors
    /// - `CeilingExceeded` if the value is above 10^303
    /// - `Inexact` if the value needs digits finer than 10^-303
    pub fn from_parts(negative: bool, magnitude: BigUint, scale: i32) -> NumericResult<Self> {
        Self::normalized(negative, magnitude, scale as i64)?.within_ceiling()
    }

    /// Best-effort conversion from a float, truncating toward zero.
    ///
    /// The currency has no sub-unit, so the fractional part of `value` is
    /// discarded. The result is approximate whenever `value` itself is: do
    /// not route integers through this function.
    ///
    /// # Errors
    /// - `InvalidInput` for NaN or infinite input
    /// - `CeilingExceeded` if the truncated value is above 10^303
    pub fn from_f64_approximate(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        let truncated = BigInt::from_f64(value.trunc()).ok_or(NumericError::InvalidInput)?;
        Self::from_bigint(truncated)
    }

    /// Build a canonical value without checking the ceiling.
    ///
    /// Used by the arithmetic paths, which check the ceiling themselves so
    /// that over-ceiling results can be promoted instead of discarded.
    pub(crate) fn normalized(negative: bool, magnitude: BigUint, scale: i64) -> NumericResult<Self> {
        if magnitude.is_zero() {
            return Ok(Self::zero());
        }

        let (magnitude, scale) = strip_trailing_zeros(magnitude, scale);
        if scale < MIN_SCALE as i64 {
            return Err(NumericError::Inexact);
        }
        let scale = i32::try_from(scale).map_err(|_| NumericError::CeilingExceeded)?;

        Ok(Self {
            sign: if negative { -1 } else { 1 },
            magnitude,
            scale,
        })
    }

    /// Canonical value from parts whose scale is known to stay in range
    /// (native integers, rust_decimal mantissas, truncation results).
    fn from_small_parts(negative: bool, magnitude: BigUint, scale: i32) -> Self {
        if magnitude.is_zero() {
            return Self::zero();
        }
        let (magnitude, scale) = strip_trailing_zeros(magnitude, scale as i64);
        Self {
            sign: if negative { -1 } else { 1 },
            magnitude,
            scale: scale as i32,
        }
    }

    /// Pass the value through if it is within the ceiling.
    pub(crate) fn within_ceiling(self) -> NumericResult<Self> {
        if self.exceeds_ceiling() {
            Err(NumericError::CeilingExceeded)
        } else {
            Ok(self)
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Sign of the value: -1, 0 or +1.
    #[inline]
    pub fn signum(&self) -> i8 {
        self.sign
    }

    /// Unsigned digits of the value, without trailing zeros.
    #[inline]
    pub fn magnitude(&self) -> &BigUint {
        &self.magnitude
    }

    /// Power-of-ten exponent applied to the magnitude.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    /// Check if value is positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign > 0
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    /// Check if the value has no fractional digits.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.scale >= 0
    }

    /// Number of significant digits in the magnitude.
    pub fn significant_digits(&self) -> u32 {
        digit_len(&self.magnitude)
    }

    /// `floor(log10(|value|))`, or `None` for zero.
    pub fn power_of_ten(&self) -> Option<i64> {
        if self.is_zero() {
            None
        } else {
            Some(digit_len(&self.magnitude) as i64 - 1 + self.scale as i64)
        }
    }

    /// Whether `|value| > 10^303`.
    pub(crate) fn exceeds_ceiling(&self) -> bool {
        match self.power_of_ten() {
            None => false,
            Some(p) if p < CEILING_EXPONENT as i64 => false,
            Some(p) if p > CEILING_EXPONENT as i64 => true,
            // Exactly 10^303 is the only canonical value with this power and magnitude 1
            Some(_) => !self.magnitude.is_one(),
        }
    }

    /// Get absolute value.
    pub fn abs(&self) -> Self {
        Self {
            sign: self.sign.abs(),
            magnitude: self.magnitude.clone(),
            scale: self.scale,
        }
    }

    /// Negated value (debits are represented as negated credits).
    pub fn negate(&self) -> Self {
        Self {
            sign: -self.sign,
            magnitude: self.magnitude.clone(),
            scale: self.scale,
        }
    }

    /// Drop the fractional digits, truncating toward zero.
    pub fn trunc(&self) -> Self {
        if self.scale >= 0 {
            return self.clone();
        }
        let divisor = pow10(self.scale.unsigned_abs());
        Self::from_small_parts(self.is_negative(), &self.magnitude / divisor, 0)
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Signed magnitude re-scaled to `target` (which must not exceed `self.scale`).
    fn to_bigint_at(&self, target: i32) -> BigInt {
        if self.is_zero() {
            return BigInt::zero();
        }
        let shift = (self.scale - target) as u32;
        let digits = if shift == 0 {
            self.magnitude.clone()
        } else {
            &self.magnitude * pow10(shift)
        };
        let sign = match self.sign {
            1 => Sign::Plus,
            -1 => Sign::Minus,
            _ => Sign::NoSign,
        };
        BigInt::from_biguint(sign, digits)
    }

    fn from_bigint_at(value: BigInt, scale: i32) -> NumericResult<Self> {
        let (sign, magnitude) = value.into_parts();
        Self::normalized(sign == Sign::Minus, magnitude, scale as i64)
    }

    fn common_scale(&self, rhs: &Self) -> i32 {
        match (self.is_zero(), rhs.is_zero()) {
            (true, _) => rhs.scale,
            (_, true) => self.scale,
            _ => self.scale.min(rhs.scale),
        }
    }

    pub(crate) fn add_unbounded(&self, rhs: &Self) -> NumericResult<Self> {
        let scale = self.common_scale(rhs);
        let sum = self.to_bigint_at(scale) + rhs.to_bigint_at(scale);
        Self::from_bigint_at(sum, scale)
    }

    pub(crate) fn mul_unbounded(&self, rhs: &Self) -> NumericResult<Self> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Self::zero());
        }
        Self::normalized(
            self.sign != rhs.sign,
            &self.magnitude * &rhs.magnitude,
            self.scale as i64 + rhs.scale as i64,
        )
    }

    pub(crate) fn div_truncating_unbounded(&self, rhs: &Self, digits: u32) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        if digits > CEILING_EXPONENT {
            return Err(NumericError::Inexact);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        // |a/b| × 10^digits = (ma / mb) × 10^(sa - sb + digits)
        let shift = self.scale as i64 - rhs.scale as i64 + digits as i64;
        let (numerator, denominator) = if shift >= 0 {
            (&self.magnitude * pow10(shift as u32), rhs.magnitude.clone())
        } else {
            (self.magnitude.clone(), &rhs.magnitude * pow10(shift.unsigned_abs() as u32))
        };

        Self::normalized(
            self.sign != rhs.sign,
            numerator / denominator,
            -(digits as i64),
        )
    }

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `CeilingExceeded` if the sum is above 10^303.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        self.add_unbounded(rhs)?.within_ceiling()
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `CeilingExceeded` if the difference is above 10^303 in magnitude.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.add_unbounded(&rhs.negate())?.within_ceiling()
    }

    /// Checked exact multiplication.
    ///
    /// # Errors
    /// - `CeilingExceeded` if the product is above 10^303
    /// - `Inexact` if the product needs digits finer than 10^-303
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        self.mul_unbounded(rhs)?.within_ceiling()
    }

    /// Divide and truncate the quotient toward zero to a whole number.
    ///
    /// This is the only arithmetic operation that discards information.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `CeilingExceeded` if the quotient is above 10^303
    pub fn checked_div_truncating(&self, rhs: &Self) -> NumericResult<Self> {
        self.div_truncating_unbounded(rhs, 0)?.within_ceiling()
    }

    /// Divide and truncate the quotient toward zero to `digits` fractional digits.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `Inexact` if `digits` is finer than 10^-303
    /// - `CeilingExceeded` if the quotient is above 10^303
    pub fn checked_div_truncating_to(&self, rhs: &Self, digits: u32) -> NumericResult<Self> {
        self.div_truncating_unbounded(rhs, digits)?.within_ceiling()
    }

    /// Exact integer power by repeated squaring.
    ///
    /// # Errors
    /// Returns `CeilingExceeded` or `Inexact` as soon as an intermediate
    /// result leaves the exact range.
    pub fn checked_pow(&self, mut exponent: u32) -> NumericResult<Self> {
        let mut result = Self::one();
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Ok(result)
    }

    // ========================================================================
    // Conversion to Native Integers
    // ========================================================================

    /// Exact conversion to an unbounded integer.
    ///
    /// # Errors
    /// Returns `Inexact` if the value has non-zero fractional digits.
    pub fn to_bigint(&self) -> NumericResult<BigInt> {
        if self.scale < 0 {
            // Canonical form: a negative scale always carries fractional digits
            return Err(NumericError::Inexact);
        }
        Ok(self.to_bigint_at(0))
    }

    /// Exact conversion of a non-negative value to an unbounded integer.
    ///
    /// # Errors
    /// - `Inexact` if the value has non-zero fractional digits
    /// - `Overflow` if the value is negative
    pub fn to_biguint(&self) -> NumericResult<BigUint> {
        let value = self.to_bigint()?;
        value.to_biguint().ok_or(NumericError::Overflow)
    }

    /// Exact conversion to `i64`.
    ///
    /// # Errors
    /// - `Inexact` if the value has non-zero fractional digits
    /// - `Overflow` if the value is outside the `i64` range
    pub fn to_i64(&self) -> NumericResult<i64> {
        self.to_bigint()?.to_i64().ok_or(NumericError::Overflow)
    }

    /// Exact conversion to `u64`.
    ///
    /// # Errors
    /// - `Inexact` if the value has non-zero fractional digits
    /// - `Overflow` if the value is negative or above `u64::MAX`
    pub fn to_u64(&self) -> NumericResult<u64> {
        self.to_bigint()?.to_u64().ok_or(NumericError::Overflow)
    }

    /// Exact conversion to `i128`.
    ///
    /// # Errors
    /// - `Inexact` if the value has non-zero fractional digits
    /// - `Overflow` if the value is outside the `i128` range
    pub fn to_i128(&self) -> NumericResult<i128> {
        self.to_bigint()?.to_i128().ok_or(NumericError::Overflow)
    }

    /// Lossy conversion to `f64`, for ratios and charts only.
    ///
    /// Only the leading 17 digits are converted; the rest of the magnitude
    /// moves into the power of ten, so long fractions stay finite.
    pub fn to_f64_lossy(&self) -> f64 {
        let len = digit_len(&self.magnitude);
        let dropped = len.saturating_sub(17);
        let leading = (&self.magnitude / pow10(dropped)).to_f64().unwrap_or(0.0);
        let power = self.scale + dropped as i32;
        // Split the power so neither factor leaves the f64 range on its own
        let half = power / 2;
        self.sign as f64 * leading * 10f64.powi(half) * 10f64.powi(power - half)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare absolute values.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {},
        }
        match self.power_of_ten().cmp(&other.power_of_ten()) {
            Ordering::Equal => {
                let scale = self.scale.min(other.scale);
                self.abs().to_bigint_at(scale).cmp(&other.abs().to_bigint_at(scale))
            },
            unequal => unequal,
        }
    }

    /// Returns the minimum of two values.
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Returns the maximum of two values.
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for ExactDecimal {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialOrd for ExactDecimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExactDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => match self.sign {
                0 => Ordering::Equal,
                1 => self.cmp_magnitude(other),
                _ => self.cmp_magnitude(other).reverse(),
            },
            unequal => unequal,
        }
    }
}

impl From<i64> for ExactDecimal {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<u64> for ExactDecimal {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i32> for ExactDecimal {
    fn from(value: i32) -> Self {
        Self::from_integer(value as i64)
    }
}

impl Neg for ExactDecimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}

impl Neg for &ExactDecimal {
    type Output = ExactDecimal;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// Infallible operators for ergonomics (panic past the ceiling - use checked_* in production)
impl Add for ExactDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs).expect("ExactDecimal addition exceeded the ceiling")
    }
}

impl Sub for ExactDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(&rhs).expect("ExactDecimal subtraction exceeded the ceiling")
    }
}

impl Mul for ExactDecimal {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(&rhs).expect("ExactDecimal multiplication left the exact range")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExactDecimal({}, sign={}, magnitude={}, scale={})",
            self, self.sign, self.magnitude, self.scale
        )
    }
}

impl fmt::Display for ExactDecimal {
    /// Canonical exact form: optional `-`, digits, optional fraction. No grouping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.is_negative() {
            f.write_str("-")?;
        }

        let digits = self.magnitude.to_str_radix(10);
        if self.scale >= 0 {
            f.write_str(&digits)?;
            for _ in 0..self.scale {
                f.write_str("0")?;
            }
            return Ok(());
        }

        let fraction_len = self.scale.unsigned_abs() as usize;
        if digits.len() > fraction_len {
            let split = digits.len() - fraction_len;
            write!(f, "{}.{}", &digits[..split], &digits[split..])
        } else {
            write!(f, "0.{:0>width$}", digits, width = fraction_len)
        }
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl ExactDecimal {
    /// Convert from rust_decimal::Decimal. Always exact.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        let mantissa = d.mantissa();
        Self::from_small_parts(
            mantissa < 0,
            BigUint::from(mantissa.unsigned_abs()),
            -(d.scale() as i32),
        )
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// - `Inexact` if the value has more than 28 fractional digits
    /// - `Overflow` if the value does not fit a 96-bit mantissa
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let fraction_digits = if self.scale < 0 {
            self.scale.unsigned_abs()
        } else {
            0
        };
        if fraction_digits > 28 {
            return Err(NumericError::Inexact);
        }
        let mantissa = self
            .to_bigint_at(self.scale.min(0))
            .to_i128()
            .ok_or(NumericError::Overflow)?;
        rust_decimal::Decimal::try_from_i128_with_scale(mantissa, fraction_digits)
            .map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for ExactDecimal {
    type Err = NumericError;

    /// Parse the canonical persisted form.
    ///
    /// # Examples
    /// - "1000000000" -> 1000000000
    /// - "-12.5" -> -12.5
    /// - "0.001" -> 0.001
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (negative, s) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let (int_str, frac_str) = match s.find('.') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s, ""),
        };

        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if !int_str.bytes().chain(frac_str.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidInput);
        }

        let mut digits = String::with_capacity(int_str.len() + frac_str.len());
        digits.push_str(int_str);
        digits.push_str(frac_str);
        let magnitude =
            BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(NumericError::InvalidInput)?;

        Self::normalized(negative, magnitude, -(frac_str.len() as i64))?.within_ceiling()
    }
}

// ============================================================================
// Serde (persisted as the canonical exact string)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for ExactDecimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExactDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn dec(s: &str) -> ExactDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_constants() {
        assert!(ExactDecimal::zero().is_zero());
        assert_eq!(ExactDecimal::one().to_i64().unwrap(), 1);
        assert_eq!(ExactDecimal::ceiling().power_of_ten(), Some(303));
        assert_eq!(ExactDecimal::default(), ExactDecimal::zero());
    }

    #[test]
    fn test_canonical_form() {
        let x = ExactDecimal::from_integer(1_000);
        assert_eq!(x.magnitude(), &BigUint::from(1u32));
        assert_eq!(x.scale(), 3);

        let zero = dec("0.000");
        assert_eq!(zero.signum(), 0);
        assert_eq!(zero.scale(), 0);

        // Same value, different spellings, one representation
        assert_eq!(dec("2.50"), dec("2.5"));
        assert_eq!(dec("0100"), ExactDecimal::from_integer(100));
    }

    #[test]
    fn test_from_integer() {
        let x = ExactDecimal::from_integer(-42);
        assert!(x.is_negative());
        assert_eq!(x.to_i64().unwrap(), -42);
        assert_eq!(ExactDecimal::from_integer(i64::MIN).to_i64().unwrap(), i64::MIN);
        assert_eq!(ExactDecimal::from_u64(u64::MAX).to_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn test_from_f64_approximate() {
        assert_eq!(
            ExactDecimal::from_f64_approximate(12.99).unwrap(),
            ExactDecimal::from_integer(12)
        );
        assert_eq!(
            ExactDecimal::from_f64_approximate(-7.5).unwrap(),
            ExactDecimal::from_integer(-7)
        );
        assert_eq!(
            ExactDecimal::from_f64_approximate(0.4).unwrap(),
            ExactDecimal::zero()
        );
        assert_eq!(
            ExactDecimal::from_f64_approximate(f64::NAN),
            Err(NumericError::InvalidInput)
        );
        assert_eq!(
            ExactDecimal::from_f64_approximate(1e306),
            Err(NumericError::CeilingExceeded)
        );
    }

    #[test]
    fn test_checked_add() {
        let a = ExactDecimal::from_integer(100);
        let b = dec("0.25");
        assert_eq!(a.checked_add(&b).unwrap(), dec("100.25"));

        // Mixed signs cancel to canonical zero
        let c = a.checked_add(&a.negate()).unwrap();
        assert!(c.is_zero());
        assert_eq!(c.scale(), 0);

        // Over the ceiling
        let result = ExactDecimal::ceiling().checked_add(&ExactDecimal::one());
        assert_eq!(result, Err(NumericError::CeilingExceeded));
    }

    #[test]
    fn test_checked_sub() {
        let a = ExactDecimal::from_integer(100);
        let b = ExactDecimal::from_integer(130);
        assert_eq!(a.checked_sub(&b).unwrap(), ExactDecimal::from_integer(-30));
        assert_eq!(b.checked_sub(&a).unwrap(), ExactDecimal::from_integer(30));
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(dec("2.5").checked_mul(&dec("4")).unwrap(), dec("10"));
        assert_eq!(dec("1.5").checked_mul(&dec("1.5")).unwrap(), dec("2.25"));
        assert_eq!(
            dec("-3").checked_mul(&dec("0.5")).unwrap(),
            dec("-1.5")
        );

        let big = ExactDecimal::power_of_ten_value(200).unwrap();
        assert_eq!(big.checked_mul(&big), Err(NumericError::CeilingExceeded));

        let tiny = dec("0.0000000001");
        let mut acc = ExactDecimal::one();
        for _ in 0..40 {
            acc = match acc.checked_mul(&tiny) {
                Ok(v) => v,
                Err(e) => {
                    assert_eq!(e, NumericError::Inexact);
                    return;
                },
            };
        }
        panic!("scale floor was never reached");
    }

    #[test]
    fn test_checked_div_truncating() {
        let seven = ExactDecimal::from_integer(7);
        assert_eq!(
            ExactDecimal::from_integer(100).checked_div_truncating(&seven).unwrap(),
            ExactDecimal::from_integer(14)
        );
        assert_eq!(
            ExactDecimal::from_integer(-100).checked_div_truncating(&seven).unwrap(),
            ExactDecimal::from_integer(-14)
        );
        assert_eq!(
            dec("7.5").checked_div_truncating(&dec("0.5")).unwrap(),
            ExactDecimal::from_integer(15)
        );
        assert_eq!(
            seven.checked_div_truncating(&ExactDecimal::zero()),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_checked_div_truncating_to() {
        let one = ExactDecimal::one();
        let three = ExactDecimal::from_integer(3);
        assert_eq!(one.checked_div_truncating_to(&three, 4).unwrap(), dec("0.3333"));
        assert_eq!(
            dec("-2").checked_div_truncating_to(&three, 2).unwrap(),
            dec("-0.66")
        );
    }

    #[test]
    fn test_checked_pow() {
        let rate = dec("1.1");
        assert_eq!(rate.checked_pow(2).unwrap(), dec("1.21"));
        assert_eq!(rate.checked_pow(0).unwrap(), ExactDecimal::one());
        assert_eq!(
            ExactDecimal::from_integer(10).checked_pow(304),
            Err(NumericError::CeilingExceeded)
        );
        assert_eq!(
            ExactDecimal::from_integer(10).checked_pow(303).unwrap(),
            ExactDecimal::ceiling()
        );
    }

    #[test]
    fn test_to_integer_conditions() {
        assert_eq!(dec("1.5").to_i64(), Err(NumericError::Inexact));
        assert_eq!(dec("-0.01").to_u64(), Err(NumericError::Inexact));
        assert_eq!(
            ExactDecimal::power_of_ten_value(20).unwrap().to_i64(),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            ExactDecimal::power_of_ten_value(20).unwrap().to_i128().unwrap(),
            100_000_000_000_000_000_000
        );
        assert_eq!(dec("-5").to_u64(), Err(NumericError::Overflow));
        assert_eq!(
            ExactDecimal::ceiling().to_biguint().unwrap(),
            pow10(CEILING_EXPONENT)
        );
    }

    #[test]
    fn test_comparison() {
        let neg = ExactDecimal::from_integer(-5);
        let zero = ExactDecimal::zero();
        let small = dec("0.5");
        let big = ExactDecimal::from_integer(1_000);

        assert!(neg < zero);
        assert!(zero < small);
        assert!(small < big);
        assert!(ExactDecimal::from_integer(-1_000) < neg);
        assert_eq!(dec("10.0").cmp(&ExactDecimal::from_integer(10)), Ordering::Equal);
        assert_eq!(big.clone().min(small.clone()), small);
        assert_eq!(big.clone().max(small), big);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExactDecimal::from_integer(1_000_000_000).to_string(), "1000000000");
        assert_eq!(dec("-12.50").to_string(), "-12.5");
        assert_eq!(dec("0.007").to_string(), "0.007");
        assert_eq!(ExactDecimal::zero().to_string(), "0");
    }

    #[test]
    fn test_from_str_invalid() {
        assert_eq!("".parse::<ExactDecimal>(), Err(NumericError::InvalidInput));
        assert_eq!("1,000".parse::<ExactDecimal>(), Err(NumericError::InvalidInput));
        assert_eq!("1e5".parse::<ExactDecimal>(), Err(NumericError::InvalidInput));
        let over = format!("1{}", "0".repeat(304));
        assert_eq!(over.parse::<ExactDecimal>(), Err(NumericError::CeilingExceeded));
    }

    #[test]
    fn test_decimal_boundary() {
        use rust_decimal::Decimal;

        let d = Decimal::new(12345, 2); // 123.45
        let x = ExactDecimal::from_decimal(d);
        assert_eq!(x, dec("123.45"));
        assert_eq!(x.to_decimal().unwrap().to_string(), "123.45");

        let big = ExactDecimal::power_of_ten_value(40).unwrap();
        assert_eq!(big.to_decimal(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_to_f64_lossy_long_fraction() {
        assert_eq!(dec("-2.5").to_f64_lossy(), -2.5);
        assert_eq!(ExactDecimal::zero().to_f64_lossy(), 0.0);

        // 320 digits over a 303-digit fraction is roughly 3.3e16
        let digits: BigUint = "3".repeat(320).parse().unwrap();
        let x = ExactDecimal::from_parts(false, digits, -303).unwrap();
        let approx = x.to_f64_lossy();
        assert!(approx.is_finite());
        assert!((approx / 3.333_333_333_333_333e16 - 1.0).abs() < 1e-12);

        let tiny = ExactDecimal::from_parts(false, BigUint::from(7u32), -303).unwrap();
        assert!(tiny.to_f64_lossy() > 0.0);
        assert!(ExactDecimal::ceiling().to_f64_lossy().is_finite());
    }

    #[test]
    fn test_trunc() {
        assert_eq!(dec("12.99").trunc(), ExactDecimal::from_integer(12));
        assert_eq!(dec("-12.99").trunc(), ExactDecimal::from_integer(-12));
        assert!(dec("0.5").trunc().is_zero());
    }

    #[test]
    fn test_operators() {
        let a = ExactDecimal::from_integer(10);
        let b = ExactDecimal::from_integer(4);
        assert_eq!(a.clone() + b.clone(), ExactDecimal::from_integer(14));
        assert_eq!(a.clone() - b.clone(), ExactDecimal::from_integer(6));
        assert_eq!(a.clone() * b, ExactDecimal::from_integer(40));
        assert_eq!(-a, ExactDecimal::from_integer(-10));
    }

    quickcheck! {
        fn prop_results_are_canonical(a: i64, b: i64, shift: u8) -> bool {
            let scale = -((shift % 20) as i32);
            let x = ExactDecimal::from_parts(a < 0, BigUint::from(a.unsigned_abs()), scale).unwrap();
            let y = ExactDecimal::from_integer(b);
            [x.checked_add(&y), x.checked_sub(&y), x.checked_mul(&y)]
                .into_iter()
                .map(|r| r.unwrap())
                .all(|v| {
                    if v.is_zero() {
                        v.scale() == 0 && v.magnitude().is_zero()
                    } else {
                        !(v.magnitude() % BigUint::from(10u32)).is_zero()
                    }
                })
        }
    }
}
