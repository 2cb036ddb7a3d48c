// ============================================================================
// Format Module
// Amount to human and persisted text
// ============================================================================
//
// This module provides:
// - format_exact / format_grouped: full digits, ungrouped (persisted) or grouped
// - format_short / format_full: largest suffix, two truncated decimals
// - format_scientific: four-digit mantissa with a power of ten
// - format_display / format_balance: currency symbol per DisplayConfig
// - format_percent / format_basis_points: ratios as percentages
// - format_debug: structural form for logs
//
// Every formatter is pure and truncates toward zero; none rounds up.
// Symbolic amounts render through SymbolicMagnitude::describe, except in
// format_exact, which keeps every mantissa digit.

mod compact;
mod currency;
mod digits;

pub use compact::{format_full, format_short};
pub use currency::{format_balance, format_basis_points, format_display, format_percent};
pub use digits::{format_debug, format_exact, format_grouped, format_scientific};
