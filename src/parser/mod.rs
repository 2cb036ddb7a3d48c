// ============================================================================
// Parser Module
// Human amount text ("2.5qa", "1 million", "10^^3") to Amount
// ============================================================================
//
// This module provides:
// - parse / parse_with: total functions returning a ParseOutcome
// - ParseError: structured failure with the raw input and suffix suggestions
//
// Parsing is pure and never logs; callers decide how to report failures.

mod error;
mod grammar;

pub use error::{ParseError, ParseErrorKind, ParseOutcome, Parsed};
pub use grammar::{parse, parse_with};
