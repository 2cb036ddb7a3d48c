// ============================================================================
// Huge Amount Library
// Exact arbitrary-precision currency amounts with suffix parsing and display
// ============================================================================

//! # Huge Amount
//!
//! Exact amounts for an in-game economy where balances run from fractions of
//! a coin up to centillions, and admin grants go further still.
//!
//! ## Features
//!
//! - **Exact decimals** up to 10^303 with no floating-point anywhere on the
//!   exact path
//! - **Symbolic magnitudes** (towers, powers, named values) above the ceiling,
//!   ordered and displayed but never computed with
//! - **Suffix vocabulary** from `k` (thousand) to `ce` (centillion), with
//!   typo suggestions
//! - **Parser** for player input such as `"2.5qa"`, `"1 million"`, `"10^^3"`
//! - **Formatters** for persisted, grouped, compact and currency text
//!
//! ## Example
//!
//! ```rust
//! use huge_amount::prelude::*;
//!
//! let bet = parse_with("2.5k", &ParseOptions::player_input()).unwrap().value;
//! let balance = parse("1 million").unwrap().value;
//!
//! let remaining = balance.checked_sub(&bet).unwrap();
//! assert_eq!(format_exact(&remaining), "997500");
//! assert_eq!(format_short(&remaining), "997.50k");
//! assert_eq!(format_display(&remaining, &DisplayConfig::dollars()), "$997.50k");
//!
//! let error = parse("5 milion").unwrap_err();
//! assert_eq!(error.kind, ParseErrorKind::BadSuffix);
//! assert_eq!(error.suggestions[0], "million");
//! ```

pub mod domain;
pub mod format;
pub mod numeric;
pub mod parser;
pub mod utils;
pub mod vocabulary;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{AmountCache, DisplayConfig, ParseOptions, SymbolPosition};
    pub use crate::format::{
        format_balance, format_basis_points, format_debug, format_display, format_exact,
        format_full, format_grouped, format_percent, format_scientific, format_short,
    };
    pub use crate::numeric::{
        Amount, ExactDecimal, NamedMagnitude, NumericError, NumericResult, SymbolicExpr,
        SymbolicMagnitude, CEILING_EXPONENT,
    };
    pub use crate::parser::{parse, parse_with, ParseError, ParseErrorKind, ParseOutcome, Parsed};
    pub use crate::vocabulary::{vocabulary, SuffixUnit};
}
