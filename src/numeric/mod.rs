// ============================================================================
// Numeric Module
// Exact arbitrary-precision amounts and their symbolic extension
// ============================================================================
//
// This module provides:
// - ExactDecimal: canonical sign/magnitude/scale decimal, exact up to 10^303
// - SymbolicMagnitude: tower/power descriptors for values above the ceiling
// - Amount: the closed sum of the two, used by every consumer
// - NumericError: Error types for arithmetic and conversion
//
// Design principles:
// - No floating-point arithmetic on exact values
// - All arithmetic returns Result (no clamping, no wraparound)
// - Values are immutable; operations return new values
// - Symbolic values compare and display, they never compute

mod amount;
mod errors;
mod exact_decimal;
mod symbolic;

pub use amount::Amount;
pub use errors::{NumericError, NumericResult};
pub use exact_decimal::{ExactDecimal, CEILING_EXPONENT, MIN_SCALE};
pub use symbolic::{
    MagnitudeEstimate, NamedMagnitude, SymbolicExpr, SymbolicMagnitude, MANTISSA_DIGITS,
};

pub(crate) use exact_decimal::{digit_len, pow10};
