// ============================================================================
// Symbolic Magnitude
// Descriptors for magnitudes above the exact ceiling (towers, huge powers)
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::exact_decimal::{digit_len, pow10, ExactDecimal, CEILING_EXPONENT};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Significant digits kept in a power mantissa.
pub const MANTISSA_DIGITS: u32 = 32;

/// Once the top exponent reaches 10^10 it moves up one layer.
const LAYER_LIMIT: f64 = 1e10;

/// `log10(LAYER_LIMIT)`: lower bound of the top exponent on layers above 1.
const LAYER_FLOOR: f64 = 10.0;

// ============================================================================
// Expression Tree
// ============================================================================

/// Well-known magnitude labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedMagnitude {
    /// 10^(10^100)
    Googolplex,
    /// 10^(10^(10^100))
    Googolplexplex,
    /// Above every other value; the clamp for unbounded grants
    Infinity,
}

impl NamedMagnitude {
    /// Label used by `describe()` and accepted by the parser.
    pub fn label(&self) -> &'static str {
        match self {
            NamedMagnitude::Googolplex => "googolplex",
            NamedMagnitude::Googolplexplex => "googolplexplex",
            NamedMagnitude::Infinity => "∞",
        }
    }

    /// Resolve a (lower-cased, trimmed) label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "googolplex" => Some(NamedMagnitude::Googolplex),
            "googolplexplex" => Some(NamedMagnitude::Googolplexplex),
            "infinity" | "inf" | "∞" => Some(NamedMagnitude::Infinity),
            _ => None,
        }
    }
}

/// How a symbolic magnitude was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicExpr {
    /// A well-known label
    Named(NamedMagnitude),
    /// `mantissa × 10^exponent` with `1 <= mantissa < 10`
    Power {
        mantissa: ExactDecimal,
        exponent: BigUint,
    },
    /// `base ^^ height`: base raised to itself `height` times
    Tower { base: u32, height: u32 },
    /// `inner × factor`; `inner` is never itself `Scaled`
    Scaled {
        inner: Box<SymbolicExpr>,
        factor: ExactDecimal,
    },
}

/// Approximate size as an iterated power of ten: `10^10^...^top`, `layer` times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeEstimate {
    /// Number of nested base-10 exponentiations
    pub layer: u32,
    /// Exponent at the top of the stack
    pub top: f64,
}

impl MagnitudeEstimate {
    const INFINITE: Self = Self {
        layer: u32::MAX,
        top: f64::INFINITY,
    };

    fn normalize(mut self) -> Self {
        if self.layer == u32::MAX || self.top.is_infinite() {
            return Self::INFINITE;
        }
        while self.top >= LAYER_LIMIT && self.layer < u32::MAX {
            self.top = self.top.log10();
            self.layer += 1;
        }
        while self.layer > 1 && self.top < LAYER_FLOOR {
            self.top = 10f64.powf(self.top);
            self.layer -= 1;
        }
        self
    }

    /// `log10` of the value, when it is small enough to express.
    pub fn log10(&self) -> Option<f64> {
        (self.layer == 1).then_some(self.top)
    }

    fn cmp(&self, other: &Self) -> Ordering {
        self.layer
            .cmp(&other.layer)
            .then_with(|| self.top.total_cmp(&other.top))
    }
}

impl SymbolicExpr {
    /// Size estimate used for ordering and `max_power` checks.
    pub fn estimate(&self) -> MagnitudeEstimate {
        match self {
            SymbolicExpr::Named(NamedMagnitude::Googolplex) => MagnitudeEstimate {
                layer: 2,
                top: 100.0,
            },
            SymbolicExpr::Named(NamedMagnitude::Googolplexplex) => MagnitudeEstimate {
                layer: 3,
                top: 100.0,
            },
            SymbolicExpr::Named(NamedMagnitude::Infinity) => MagnitudeEstimate::INFINITE,
            SymbolicExpr::Power { mantissa, exponent } => power_estimate(mantissa, exponent),
            SymbolicExpr::Tower { base, height } => tower_estimate(*base, *height),
            SymbolicExpr::Scaled { inner, factor } => {
                let mut estimate = inner.estimate();
                if estimate.layer == 1 {
                    estimate.top += factor.to_f64_lossy().log10();
                }
                estimate.normalize()
            },
        }
    }

    /// Tower base, or 10 for power-of-ten based expressions.
    fn base(&self) -> u32 {
        match self {
            SymbolicExpr::Tower { base, .. } => *base,
            SymbolicExpr::Scaled { inner, .. } => inner.base(),
            _ => 10,
        }
    }

    fn factor(&self) -> Option<&ExactDecimal> {
        match self {
            SymbolicExpr::Scaled { factor, .. } => Some(factor),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SymbolicExpr::Named(_) => 0,
            SymbolicExpr::Power { .. } => 1,
            SymbolicExpr::Tower { .. } => 2,
            SymbolicExpr::Scaled { .. } => 3,
        }
    }

    /// Field-by-field order; only consulted when sizes tie.
    fn cmp_structure(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SymbolicExpr::Named(a), SymbolicExpr::Named(b)) => a.cmp(b),
            (
                SymbolicExpr::Power {
                    mantissa: ma,
                    exponent: ea,
                },
                SymbolicExpr::Power {
                    mantissa: mb,
                    exponent: eb,
                },
            ) => ea.cmp(eb).then_with(|| ma.cmp(mb)),
            (
                SymbolicExpr::Tower {
                    base: ba,
                    height: ha,
                },
                SymbolicExpr::Tower {
                    base: bb,
                    height: hb,
                },
            ) => ha.cmp(hb).then_with(|| ba.cmp(bb)),
            (
                SymbolicExpr::Scaled {
                    inner: ia,
                    factor: fa,
                },
                SymbolicExpr::Scaled {
                    inner: ib,
                    factor: fb,
                },
            ) => ia.cmp_structure(ib).then_with(|| fa.cmp(fb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn power_estimate(mantissa: &ExactDecimal, exponent: &BigUint) -> MagnitudeEstimate {
    match exponent.to_f64().filter(|e| e.is_finite()) {
        Some(e) => MagnitudeEstimate {
            layer: 1,
            top: e + mantissa.to_f64_lossy().log10(),
        }
        .normalize(),
        None => MagnitudeEstimate {
            layer: 2,
            top: log10_biguint(exponent),
        }
        .normalize(),
    }
}

fn tower_estimate(base: u32, height: u32) -> MagnitudeEstimate {
    let log_base = (base as f64).log10();
    let mut estimate = MagnitudeEstimate {
        layer: 1,
        top: log_base,
    };
    for step in 1..height {
        // log10(log10(b^x)) = log10(x) + log10(log10(b))
        estimate = if estimate.layer == 1 {
            MagnitudeEstimate {
                layer: 2,
                top: estimate.top + log_base.log10(),
            }
        } else {
            MagnitudeEstimate {
                layer: estimate.layer.saturating_add(1),
                top: estimate.top,
            }
        }
        .normalize();

        if estimate.layer >= 2 {
            // Each further level only adds a layer
            estimate.layer = estimate.layer.saturating_add(height - 1 - step);
            break;
        }
    }
    estimate
}

/// Leading digits of a `1000…0d…` magnitude, cut after the first non-zero
/// digit past the leading one. Falls back to `1.000…1` at full mantissa width
/// when that digit sits beyond the scale floor.
fn boundary_digits(digits: &BigUint, len: u32) -> (BigUint, u32) {
    let tail = digits - pow10(len - 1);
    let tail_len = digit_len(&tail);
    let kept_len = len - tail_len + 1;
    if kept_len <= CEILING_EXPONENT + 1 {
        (digits / pow10(tail_len - 1), kept_len)
    } else {
        (pow10(MANTISSA_DIGITS - 1) + 1u32, MANTISSA_DIGITS)
    }
}

/// `log10` of an arbitrarily large integer.
fn log10_biguint(n: &BigUint) -> f64 {
    let digits = digit_len(n);
    if digits <= 300 {
        return n.to_f64().unwrap_or(f64::INFINITY).log10();
    }
    let shift = digits - 17;
    let leading = (n / pow10(shift)).to_f64().unwrap_or(1.0);
    leading.log10() + shift as f64
}

/// Exact value of `base ^^ height` when it is at most 10^(ceiling + 3).
pub(crate) fn exact_tower_value(base: u32, height: u32) -> Option<BigUint> {
    let estimate = tower_estimate(base, height);
    if estimate.layer != 1 || estimate.top > (CEILING_EXPONENT + 3) as f64 {
        return None;
    }
    let mut value = BigUint::from(base);
    for _ in 1..height {
        let exponent = value.to_u32()?;
        value = BigUint::from(base).pow(exponent);
    }
    Some(value)
}

/// The value as `digits × 10^scale`, for expressions small enough to hold
/// exactly: powers, towers up to a few digits past the ceiling, and either of
/// those under a factor.
fn exact_digits(expr: &SymbolicExpr) -> Option<(BigUint, BigInt)> {
    match expr {
        SymbolicExpr::Power { mantissa, exponent } => Some((
            mantissa.magnitude().clone(),
            BigInt::from(exponent.clone()) + mantissa.scale(),
        )),
        SymbolicExpr::Tower { base, height } => {
            exact_tower_value(*base, *height).map(|value| (value, BigInt::zero()))
        },
        SymbolicExpr::Scaled { inner, factor } => {
            let (digits, scale) = exact_digits(inner)?;
            Some((digits * factor.magnitude(), scale + factor.scale()))
        },
        SymbolicExpr::Named(_) => None,
    }
}

/// Whether `digits × 10^scale` is strictly above `10^303`.
fn exceeds_ceiling(digits: &BigUint, scale: &BigInt) -> bool {
    if digits.is_zero() {
        return false;
    }
    let len = digit_len(digits);
    let lead = scale + BigInt::from(len - 1);
    let ceiling = BigInt::from(CEILING_EXPONENT);
    lead > ceiling || (lead == ceiling && digits != &pow10(len - 1))
}

// ============================================================================
// Symbolic Magnitude
// ============================================================================

/// A magnitude above the exact ceiling, kept as a description of how it was
/// produced rather than as digits.
///
/// Symbolic values are unsigned and only support comparison, display and
/// scaling by an exact factor. Ordering is approximate: sizes are
/// compared through a base-10 layer estimate (the tower height), then the
/// tower base, then the scaling factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicMagnitude {
    expr: SymbolicExpr,
}

impl SymbolicMagnitude {
    /// `base ^^ height`.
    ///
    /// # Errors
    /// Returns `IllFormedTower` for `base < 2`, `height < 1`, or a tower whose
    /// value does not exceed the ceiling (that value is exact, not symbolic).
    pub fn from_tower(base: u32, height: u32) -> NumericResult<Self> {
        if base < 2 || height < 1 {
            return Err(NumericError::IllFormedTower);
        }
        if let Some(value) = exact_tower_value(base, height) {
            if value <= pow10(CEILING_EXPONENT) {
                return Err(NumericError::IllFormedTower);
            }
        }
        Ok(Self {
            expr: SymbolicExpr::Tower { base, height },
        })
    }

    /// `mantissa × 10^exponent`, normalized so that `1 <= mantissa < 10`.
    ///
    /// Mantissas longer than [`MANTISSA_DIGITS`] significant digits are
    /// truncated; symbolic values never take part in exact arithmetic. A value
    /// just above the ceiling whose truncated mantissa would read exactly `1`
    /// keeps its digits up to the first non-zero one after the leading digit,
    /// so the stored power stays above `10^303`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `mantissa` is not positive or the value is
    /// not above the ceiling.
    pub fn from_power(mantissa: &ExactDecimal, exponent: &BigUint) -> NumericResult<Self> {
        if !mantissa.is_positive() {
            return Err(NumericError::InvalidInput);
        }

        let digits = mantissa.magnitude();
        let len = digit_len(digits);
        let lead_exponent = BigInt::from(exponent.clone())
            + BigInt::from(mantissa.scale() as i64 + len as i64 - 1);
        if lead_exponent.is_negative() {
            return Err(NumericError::InvalidInput);
        }
        Self::from_digits(digits, lead_exponent.magnitude())
    }

    /// A digit run read as `d.ddd… × 10^lead_exponent`, truncated the same way
    /// as [`from_power`](Self::from_power). Trailing zeros in `digits` are
    /// allowed.
    ///
    /// # Errors
    /// Returns `InvalidInput` if `digits` is zero or the value is not above
    /// the ceiling.
    pub(crate) fn from_digits(digits: &BigUint, lead_exponent: &BigUint) -> NumericResult<Self> {
        if digits.is_zero() {
            return Err(NumericError::InvalidInput);
        }
        let len = digit_len(digits);
        let ceiling = BigUint::from(CEILING_EXPONENT);
        let above = lead_exponent > &ceiling
            || (lead_exponent == &ceiling && digits != &pow10(len - 1));
        if !above {
            return Err(NumericError::InvalidInput);
        }

        let (mut kept, mut kept_len) = if len > MANTISSA_DIGITS {
            (digits / pow10(len - MANTISSA_DIGITS), MANTISSA_DIGITS)
        } else {
            (digits.clone(), len)
        };
        if lead_exponent == &ceiling && kept == pow10(kept_len - 1) {
            (kept, kept_len) = boundary_digits(digits, len);
        }
        let mantissa = ExactDecimal::normalized(false, kept, -(kept_len as i64 - 1))?;

        Ok(Self {
            expr: SymbolicExpr::Power {
                mantissa,
                exponent: lead_exponent.clone(),
            },
        })
    }

    /// A well-known label.
    pub fn named(name: NamedMagnitude) -> Self {
        Self {
            expr: SymbolicExpr::Named(name),
        }
    }

    /// The clamp value above every other magnitude.
    pub fn infinity() -> Self {
        Self::named(NamedMagnitude::Infinity)
    }

    /// Promote an exact result that left the exact range.
    ///
    /// # Errors
    /// - `CeilingExceeded` for negative values (symbolic magnitudes are unsigned)
    /// - `InvalidInput` if the value is not actually above the ceiling
    pub(crate) fn from_overflow(value: &ExactDecimal) -> NumericResult<Self> {
        if value.is_negative() {
            return Err(NumericError::CeilingExceeded);
        }
        Self::from_power(value, &BigUint::zero())
    }

    /// The expression tree.
    #[inline]
    pub fn expr(&self) -> &SymbolicExpr {
        &self.expr
    }

    /// Size estimate used for ordering.
    pub fn estimate(&self) -> MagnitudeEstimate {
        self.expr.estimate()
    }

    /// `log10` of the value when it can be estimated, `None` for values
    /// beyond a single layer of exponentiation.
    pub fn log10_estimate(&self) -> Option<f64> {
        self.estimate().log10()
    }

    /// Scale by a positive exact factor.
    ///
    /// The factor is recorded next to the expression, never folded into a
    /// tower's base or height. Scaling an already scaled value multiplies the
    /// factors; scaling infinity is infinity.
    ///
    /// # Errors
    /// - `SymbolicArithmetic` if `factor` is not positive, or would bring the
    ///   value back under the ceiling
    /// - `CeilingExceeded` if combined factors leave the exact range
    pub fn multiply_by_exact(&self, factor: &ExactDecimal) -> NumericResult<Self> {
        if !factor.is_positive() {
            return Err(NumericError::SymbolicArithmetic);
        }
        if factor == &ExactDecimal::one() {
            return Ok(self.clone());
        }

        let expr = match &self.expr {
            SymbolicExpr::Named(NamedMagnitude::Infinity) => return Ok(self.clone()),
            SymbolicExpr::Scaled { inner, factor: existing } => {
                let combined = existing.checked_mul(factor)?;
                if combined == ExactDecimal::one() {
                    (**inner).clone()
                } else {
                    SymbolicExpr::Scaled {
                        inner: inner.clone(),
                        factor: combined,
                    }
                }
            },
            other => SymbolicExpr::Scaled {
                inner: Box::new(other.clone()),
                factor: factor.clone(),
            },
        };

        let above = match exact_digits(&expr) {
            Some((digits, scale)) => exceeds_ceiling(&digits, &scale),
            None => expr
                .estimate()
                .log10()
                .map_or(true, |log10| log10 > CEILING_EXPONENT as f64),
        };
        if !above {
            return Err(NumericError::SymbolicArithmetic);
        }
        Ok(Self { expr })
    }

    /// Short human label: a tower, a power or a name. Never exact digits.
    pub fn describe(&self) -> String {
        describe_expr(&self.expr)
    }
}

fn describe_expr(expr: &SymbolicExpr) -> String {
    match expr {
        SymbolicExpr::Named(name) => name.label().to_string(),
        SymbolicExpr::Power { mantissa, exponent } => {
            format!("{}e{}", short_mantissa(mantissa), exponent)
        },
        SymbolicExpr::Tower { base, height } => format!("{}^^{}", base, height),
        SymbolicExpr::Scaled { inner, factor } => {
            format!("{} × {}", factor, describe_expr(inner))
        },
    }
}

/// Mantissa truncated to four significant digits, trailing zeros trimmed.
fn short_mantissa(mantissa: &ExactDecimal) -> String {
    let truncated = mantissa
        .checked_div_truncating_to(&ExactDecimal::one(), 3)
        .unwrap_or_else(|_| mantissa.trunc());
    truncated.to_string()
}

impl PartialOrd for SymbolicMagnitude {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolicMagnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        let one = ExactDecimal::one();
        self.estimate()
            .cmp(&other.estimate())
            .then_with(|| self.expr.base().cmp(&other.expr.base()))
            .then_with(|| {
                let a = self.expr.factor().unwrap_or(&one);
                let b = other.expr.factor().unwrap_or(&one);
                a.cmp(b)
            })
            .then_with(|| self.expr.cmp_structure(&other.expr))
    }
}

/// Full-precision notation: the same shapes as `describe()`, with every
/// stored mantissa digit. This is the persisted form and parses back equal.
impl fmt::Display for SymbolicMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_notation(&self.expr, f)
    }
}

fn write_notation(expr: &SymbolicExpr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        SymbolicExpr::Power { mantissa, exponent } => write!(f, "{}e{}", mantissa, exponent),
        SymbolicExpr::Scaled { inner, factor } => {
            write!(f, "{} × ", factor)?;
            write_notation(inner, f)
        },
        other => f.write_str(&describe_expr(other)),
    }
}

// ============================================================================
// Tests
// ============================================================================
