// ============================================================================
// Currency Rendering
// Symbol placement, balances, percentages and basis points
// ============================================================================

use super::compact::format_short;
use super::digits::{fixed_fraction, grouped_exact, sign_prefix, split_digits};
use crate::domain::{DisplayConfig, SymbolPosition};
use crate::numeric::{Amount, ExactDecimal};
use num_bigint::BigUint;

/// Short form with the configured currency symbol: `"$1.50k"`.
pub fn format_display(value: &Amount, config: &DisplayConfig) -> String {
    with_symbol(&format_short(value), config)
}

/// Balance line: grouped exact digits below the compact threshold, the short
/// form at or above it. Symbolic balances show their description.
///
/// The choice depends only on the value and the configuration, so a balance
/// renders the same way on every call.
pub fn format_balance(value: &Amount, config: &DisplayConfig) -> String {
    let text = match value {
        Amount::Exact(exact) if exact.abs() < config.compact_threshold => grouped_exact(exact),
        _ => format_short(value),
    };
    with_symbol(&text, config)
}

fn with_symbol(text: &str, config: &DisplayConfig) -> String {
    if config.symbol.is_empty() {
        return text.to_string();
    }
    match config.symbol_position {
        SymbolPosition::Prefix => match text.strip_prefix('-') {
            Some(unsigned) => format!("-{}{}", config.symbol, unsigned),
            None => format!("{}{}", config.symbol, text),
        },
        SymbolPosition::Suffix => format!("{} {}", text, config.symbol),
    }
}

/// Ratio as a percentage with `decimals` truncated fraction digits:
/// `0.125 → "12.50%"` for two decimals.
pub fn format_percent(ratio: &ExactDecimal, decimals: u32) -> String {
    percent(ratio.is_negative(), ratio.magnitude(), ratio.scale() as i64 + 2, decimals as usize)
}

/// Basis points as a percentage: `250 → "2.50%"`.
pub fn format_basis_points(bps: i64) -> String {
    percent(bps < 0, &BigUint::from(bps.unsigned_abs()), -2, 2)
}

fn percent(negative: bool, magnitude: &BigUint, scale: i64, places: usize) -> String {
    let (integer, fraction) = split_digits(magnitude, scale);
    let fraction = fixed_fraction(&fraction, places);
    let sign = sign_prefix(negative, &integer, &fraction);
    if fraction.is_empty() {
        format!("{}{}%", sign, integer)
    } else {
        format!("{}{}.{}%", sign, integer, fraction)
    }
}
