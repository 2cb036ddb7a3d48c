// ============================================================================
// Numeric Errors
// Error types for exact decimal and symbolic magnitude operations
// ============================================================================

use std::fmt;

/// Errors that can occur during amount arithmetic and conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Attempted division by zero
    DivisionByZero,
    /// Conversion or operation would drop non-zero fractional digits
    Inexact,
    /// Value does not fit the requested native integer type
    Overflow,
    /// Result magnitude is above the exact ceiling (10^303)
    CeilingExceeded,
    /// Tower descriptor is malformed or small enough to be exact
    IllFormedTower,
    /// Precision-sensitive arithmetic attempted on a symbolic magnitude
    SymbolicArithmetic,
    /// Input value is invalid (non-finite float, malformed literal)
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::Inexact => write!(
                f,
                "inexact conversion: non-zero fractional digits would be lost"
            ),
            NumericError::Overflow => {
                write!(f, "integer overflow: value exceeds the native integer range")
            },
            NumericError::CeilingExceeded => {
                write!(f, "magnitude exceeds the exact ceiling of 10^303")
            },
            NumericError::IllFormedTower => write!(
                f,
                "ill-formed tower: base must be >= 2, height >= 1, and the value above the ceiling"
            ),
            NumericError::SymbolicArithmetic => {
                write!(f, "exact arithmetic is not defined on symbolic magnitudes")
            },
            NumericError::InvalidInput => write!(f, "invalid input: could not interpret value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
