// ============================================================================
// Amount
// Closed sum of exact and symbolic values shared by every call site
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::exact_decimal::{pow10, ExactDecimal, CEILING_EXPONENT};
use super::symbolic::{exact_tower_value, SymbolicMagnitude};
use std::cmp::Ordering;
use std::fmt;

/// Any monetary quantity: an exact decimal within the ceiling, or a symbolic
/// magnitude above it.
///
/// All exact values order below all symbolic values. Arithmetic is exact on
/// the `Exact` side; a result that leaves the exact range is promoted to a
/// symbolic power of ten instead of being clamped or wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Amount {
    Exact(ExactDecimal),
    Symbolic(SymbolicMagnitude),
}

impl Amount {
    /// Zero value.
    pub fn zero() -> Self {
        Amount::Exact(ExactDecimal::zero())
    }

    /// Exact integer amount.
    pub fn from_integer(value: i64) -> Self {
        Amount::Exact(ExactDecimal::from_integer(value))
    }

    /// `base ^^ height`, as an exact value when it fits under the ceiling.
    ///
    /// # Errors
    /// Returns `IllFormedTower` for `base < 2` or `height < 1`.
    pub fn from_tower(base: u32, height: u32) -> NumericResult<Self> {
        if base < 2 || height < 1 {
            return Err(NumericError::IllFormedTower);
        }
        if let Some(value) = exact_tower_value(base, height) {
            if value <= pow10(CEILING_EXPONENT) {
                return ExactDecimal::from_biguint(value).map(Amount::Exact);
            }
        }
        SymbolicMagnitude::from_tower(base, height).map(Amount::Symbolic)
    }

    /// Wrap an unbounded exact result, promoting it above the ceiling.
    pub(crate) fn from_unbounded(value: ExactDecimal) -> NumericResult<Self> {
        if !value.exceeds_ceiling() {
            return Ok(Amount::Exact(value));
        }
        let promoted = SymbolicMagnitude::from_overflow(&value)?;
        tracing::debug!(
            magnitude = %promoted.describe(),
            "exact result exceeded the ceiling, promoted to symbolic"
        );
        Ok(Amount::Symbolic(promoted))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if the value is symbolic.
    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Amount::Symbolic(_))
    }

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Amount::Exact(v) if v.is_zero())
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        matches!(self, Amount::Exact(v) if v.is_negative())
    }

    /// The exact value, if there is one.
    pub fn as_exact(&self) -> Option<&ExactDecimal> {
        match self {
            Amount::Exact(v) => Some(v),
            Amount::Symbolic(_) => None,
        }
    }

    /// The symbolic value, if there is one.
    pub fn as_symbolic(&self) -> Option<&SymbolicMagnitude> {
        match self {
            Amount::Exact(_) => None,
            Amount::Symbolic(s) => Some(s),
        }
    }

    /// The exact value.
    ///
    /// # Errors
    /// Returns `SymbolicArithmetic` for symbolic values.
    pub fn exact(&self) -> NumericResult<&ExactDecimal> {
        self.as_exact().ok_or(NumericError::SymbolicArithmetic)
    }

    /// Exact value, with symbolic magnitudes clamped to the ceiling.
    ///
    /// For wallet writes that must stay exact (admin grants of "infinity").
    pub fn clamp_to_ceiling(&self) -> ExactDecimal {
        match self {
            Amount::Exact(v) => v.clone(),
            Amount::Symbolic(_) => ExactDecimal::ceiling(),
        }
    }

    /// `floor(log10(|value|))` estimate; `None` for zero or for symbolic
    /// values beyond a single layer of exponentiation.
    pub fn power_estimate(&self) -> Option<f64> {
        match self {
            Amount::Exact(v) => v.power_of_ten().map(|p| p as f64),
            Amount::Symbolic(s) => s.log10_estimate().map(f64::floor),
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition; over-ceiling sums are promoted.
    ///
    /// # Errors
    /// - `SymbolicArithmetic` if either operand is symbolic
    /// - `CeilingExceeded` for a negative sum below -10^303
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        Self::from_unbounded(self.exact()?.add_unbounded(rhs.exact()?)?)
    }

    /// Checked subtraction; over-ceiling differences are promoted.
    ///
    /// # Errors
    /// - `SymbolicArithmetic` if either operand is symbolic
    /// - `CeilingExceeded` for a negative difference below -10^303
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        Self::from_unbounded(self.exact()?.add_unbounded(&rhs.exact()?.negate())?)
    }

    /// Checked multiplication.
    ///
    /// A symbolic operand may be scaled by a positive exact factor; the
    /// product of two symbolic values is not defined.
    ///
    /// # Errors
    /// - `SymbolicArithmetic` for two symbolic operands or a non-positive factor
    /// - `Inexact` if an exact product needs digits finer than 10^-303
    /// - `CeilingExceeded` for a negative product below -10^303
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        match (self, rhs) {
            (Amount::Exact(a), Amount::Exact(b)) => Self::from_unbounded(a.mul_unbounded(b)?),
            (Amount::Symbolic(s), Amount::Exact(f)) | (Amount::Exact(f), Amount::Symbolic(s)) => {
                s.multiply_by_exact(f).map(Amount::Symbolic)
            },
            (Amount::Symbolic(_), Amount::Symbolic(_)) => Err(NumericError::SymbolicArithmetic),
        }
    }

    /// Divide and truncate toward zero to a whole number.
    ///
    /// # Errors
    /// - `DivisionByZero` if `rhs` is zero
    /// - `SymbolicArithmetic` if either operand is symbolic
    pub fn checked_div_truncating(&self, rhs: &Self) -> NumericResult<Self> {
        Self::from_unbounded(self.exact()?.div_truncating_unbounded(rhs.exact()?, 0)?)
    }

    /// Negated value.
    ///
    /// # Errors
    /// Returns `SymbolicArithmetic` for symbolic values.
    pub fn checked_neg(&self) -> NumericResult<Self> {
        Ok(Amount::Exact(self.exact()?.negate()))
    }

    /// Exact conversion to `i64`.
    ///
    /// # Errors
    /// - `SymbolicArithmetic` for symbolic values
    /// - `Inexact` / `Overflow` as for [`ExactDecimal::to_i64`]
    pub fn to_i64(&self) -> NumericResult<i64> {
        self.exact()?.to_i64()
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<ExactDecimal> for Amount {
    fn from(value: ExactDecimal) -> Self {
        Amount::Exact(value)
    }
}

impl From<SymbolicMagnitude> for Amount {
    fn from(value: SymbolicMagnitude) -> Self {
        Amount::Symbolic(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl PartialOrd for Amount {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Amount::Exact(a), Amount::Exact(b)) => a.cmp(b),
            (Amount::Exact(_), Amount::Symbolic(_)) => Ordering::Less,
            (Amount::Symbolic(_), Amount::Exact(_)) => Ordering::Greater,
            (Amount::Symbolic(a), Amount::Symbolic(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Exact(v) => fmt::Display::fmt(v, f),
            Amount::Symbolic(s) => fmt::Display::fmt(s, f),
        }
    }
}

// ============================================================================
// Serde (exact values as the canonical string, symbolic as full notation)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if let Ok(exact) = s.parse::<ExactDecimal>() {
            return Ok(Amount::Exact(exact));
        }
        crate::parser::parse(&s)
            .map(|parsed| parsed.value)
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn exact(s: &str) -> Amount {
        Amount::Exact(s.parse().unwrap())
    }

    #[test]
    fn test_exact_orders_below_symbolic() {
        let ceiling = Amount::Exact(ExactDecimal::ceiling());
        let tower = Amount::from_tower(10, 3).unwrap();
        assert!(ceiling < tower);
        assert!(Amount::zero() < tower);
        assert!(exact("-5") < Amount::zero());
    }

    #[test]
    fn test_from_tower_collapses_small_towers() {
        assert_eq!(Amount::from_tower(2, 4).unwrap(), Amount::from_integer(65_536));
        assert!(Amount::from_tower(2, 5).unwrap().is_symbolic());
        assert_eq!(Amount::from_tower(0, 3), Err(NumericError::IllFormedTower));
    }

    #[test]
    fn test_add_promotes_past_ceiling() {
        let ceiling = Amount::Exact(ExactDecimal::ceiling());
        let sum = ceiling.checked_add(&ceiling).unwrap();
        assert!(sum.is_symbolic());
        assert_eq!(sum.to_string(), "2e303");
        assert!(sum > ceiling);
    }

    #[test]
    fn test_add_one_past_ceiling() {
        let ceiling = Amount::Exact(ExactDecimal::ceiling());
        let one = Amount::from_integer(1);
        let sum = ceiling.checked_add(&one).unwrap();
        assert!(sum.is_symbolic());
        assert!(sum > ceiling);
        assert!(sum < ceiling.checked_add(&ceiling).unwrap());

        let just_below = ceiling.checked_sub(&one).unwrap();
        assert_eq!(just_below.checked_add(&one).unwrap(), ceiling);
        assert!(just_below.checked_add(&Amount::from_integer(2)).unwrap().is_symbolic());

        let tiny = exact("0.5");
        assert!(ceiling.checked_add(&tiny).unwrap().is_symbolic());
    }

    #[test]
    fn test_scale_promoted_balance() {
        let ceiling = Amount::Exact(ExactDecimal::ceiling());
        let doubled = ceiling.checked_add(&ceiling).unwrap();
        let grown = doubled.checked_mul(&exact("1.5")).unwrap();
        assert!(grown > doubled);
        assert_eq!(
            doubled.checked_mul(&exact("0.25")),
            Err(NumericError::SymbolicArithmetic)
        );
    }

    #[test]
    fn test_negative_overflow_is_an_error() {
        let floor = Amount::Exact(ExactDecimal::ceiling().negate());
        assert_eq!(floor.checked_add(&floor), Err(NumericError::CeilingExceeded));
    }

    #[test]
    fn test_mul_with_symbolic() {
        let tower = Amount::from_tower(10, 3).unwrap();
        let doubled = tower.checked_mul(&Amount::from_integer(2)).unwrap();
        assert!(doubled > tower);
        assert_eq!(
            tower.checked_mul(&tower),
            Err(NumericError::SymbolicArithmetic)
        );
        assert_eq!(
            tower.checked_mul(&Amount::zero()),
            Err(NumericError::SymbolicArithmetic)
        );
    }

    #[test]
    fn test_symbolic_arithmetic_is_rejected() {
        let tower = Amount::from_tower(10, 3).unwrap();
        let one = Amount::from_integer(1);
        assert_eq!(tower.checked_add(&one), Err(NumericError::SymbolicArithmetic));
        assert_eq!(one.checked_sub(&tower), Err(NumericError::SymbolicArithmetic));
        assert_eq!(
            tower.checked_div_truncating(&one),
            Err(NumericError::SymbolicArithmetic)
        );
        assert_eq!(tower.checked_neg(), Err(NumericError::SymbolicArithmetic));
        assert_eq!(tower.to_i64(), Err(NumericError::SymbolicArithmetic));
    }

    #[test]
    fn test_exact_arithmetic() {
        let balance = exact("1500");
        let bet = exact("250");
        assert_eq!(balance.checked_sub(&bet).unwrap(), exact("1250"));
        assert_eq!(bet.checked_sub(&balance).unwrap(), exact("-1250"));
        assert_eq!(
            balance.checked_div_truncating(&exact("7")).unwrap(),
            exact("214")
        );
        assert_eq!(
            balance.checked_div_truncating(&Amount::zero()),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_clamp_to_ceiling() {
        let tower = Amount::from_tower(10, 3).unwrap();
        assert_eq!(tower.clamp_to_ceiling(), ExactDecimal::ceiling());
        assert_eq!(exact("12").clamp_to_ceiling(), ExactDecimal::from_integer(12));
    }

    #[test]
    fn test_power_estimate() {
        assert_eq!(exact("12345").power_estimate(), Some(4.0));
        assert_eq!(Amount::zero().power_estimate(), None);
        let power = SymbolicMagnitude::from_power(&ExactDecimal::one(), &BigUint::from(400u32)).unwrap();
        assert_eq!(Amount::Symbolic(power).power_estimate(), Some(400.0));
        assert_eq!(Amount::from_tower(10, 3).unwrap().power_estimate(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_strings() {
        let exact_amount = exact("-1234.5");
        let json = serde_json::to_string(&exact_amount).unwrap();
        assert_eq!(json, "\"-1234.5\"");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), exact_amount);

        let scaled = Amount::from_tower(10, 3)
            .unwrap()
            .checked_mul(&Amount::from_integer(4))
            .unwrap();
        let json = serde_json::to_string(&scaled).unwrap();
        assert_eq!(json, "\"4 × 10^^3\"");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), scaled);

        let long = crate::parser::parse("1.2345678901234567e450").unwrap().value;
        let json = serde_json::to_string(&long).unwrap();
        assert_eq!(json, "\"1.2345678901234567e450\"");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), long);

        assert!(serde_json::from_str::<Amount>("\"5 zz\"").is_err());
    }
}
