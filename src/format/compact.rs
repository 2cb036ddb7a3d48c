// ============================================================================
// Compact Rendering
// Suffixed short ("1.50k") and word ("1.50 million") forms
// ============================================================================

use super::digits::{fixed_fraction, split_digits, sign_prefix};
use crate::numeric::{Amount, ExactDecimal};
use crate::vocabulary::{lookup_by_power, SuffixUnit};

/// Fraction digits shown next to a suffix.
const COMPACT_PLACES: usize = 2;

enum UnitLabel {
    Code,
    Word,
}

/// Short form: `"1.50k"`, `"2.50qa"`, `"999.5"`.
///
/// Uses the largest suffix not above the value and exactly two truncated
/// fraction digits, so 999,999 is `"999.99k"` and never rounds up into
/// `"1.00m"`. Below 1000 the value is shown truncated to two fraction
/// digits with trailing zeros dropped.
pub fn format_short(value: &Amount) -> String {
    compact(value, UnitLabel::Code)
}

/// Word form: `"1.50 million"`. Otherwise identical to [`format_short`].
pub fn format_full(value: &Amount) -> String {
    compact(value, UnitLabel::Word)
}

fn compact(value: &Amount, label: UnitLabel) -> String {
    match value {
        Amount::Exact(exact) => compact_exact(exact, label),
        Amount::Symbolic(symbolic) => symbolic.describe(),
    }
}

fn compact_exact(value: &ExactDecimal, label: UnitLabel) -> String {
    let unit = value
        .power_of_ten()
        .and_then(|power| u32::try_from(power).ok())
        .and_then(lookup_by_power);

    match unit {
        Some(unit) => with_unit(value, unit, label),
        None => small(value),
    }
}

fn with_unit(value: &ExactDecimal, unit: &SuffixUnit, label: UnitLabel) -> String {
    let scale = value.scale() as i64 - unit.exponent() as i64;
    let (integer, fraction) = split_digits(value.magnitude(), scale);
    let fraction = fixed_fraction(&fraction, COMPACT_PLACES);
    let sign = sign_prefix(value.is_negative(), &integer, &fraction);

    match label {
        UnitLabel::Code => format!("{}{}.{}{}", sign, integer, fraction, unit.code()),
        UnitLabel::Word => format!("{}{}.{} {}", sign, integer, fraction, unit.word()),
    }
}

fn small(value: &ExactDecimal) -> String {
    let (integer, fraction) = split_digits(value.magnitude(), value.scale() as i64);
    let fraction = fixed_fraction(&fraction, COMPACT_PLACES);
    let fraction = fraction.trim_end_matches('0');
    let sign = sign_prefix(value.is_negative(), &integer, fraction);

    if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn amount(text: &str) -> Amount {
        Amount::Exact(text.parse().unwrap())
    }

    #[test]
    fn test_short_with_suffix() {
        assert_eq!(format_short(&amount("1500")), "1.50k");
        assert_eq!(format_short(&amount("1000")), "1.00k");
        assert_eq!(format_short(&amount("2500000000000000")), "2.50qa");
        assert_eq!(format_short(&amount("123456789")), "123.45m");
        assert_eq!(format_short(&Amount::Exact(ExactDecimal::ceiling())), "1.00ce");
    }

    #[test]
    fn test_short_truncates_instead_of_rounding() {
        assert_eq!(format_short(&amount("999999")), "999.99k");
        assert_eq!(format_short(&amount("1999.999")), "1.99k");
    }

    #[test]
    fn test_short_below_thousand() {
        assert_eq!(format_short(&amount("999")), "999");
        assert_eq!(format_short(&amount("999.5")), "999.5");
        assert_eq!(format_short(&amount("12.349")), "12.34");
        assert_eq!(format_short(&amount("0.001")), "0");
        assert_eq!(format_short(&amount("-0.001")), "0");
        assert_eq!(format_short(&Amount::zero()), "0");
    }

    #[test]
    fn test_short_negative() {
        assert_eq!(format_short(&amount("-1500")), "-1.50k");
        assert_eq!(format_short(&amount("-12.5")), "-12.5");
    }

    #[test]
    fn test_full_words() {
        assert_eq!(format_full(&amount("1500000")), "1.50 million");
        assert_eq!(format_full(&amount("1000")), "1.00 thousand");
        assert_eq!(format_full(&parse("3 quindecillion").unwrap().value), "3.00 quindecillion");
        assert_eq!(format_full(&amount("42")), "42");
    }

    #[test]
    fn test_symbolic_uses_description() {
        let tower = Amount::from_tower(10, 3).unwrap();
        assert_eq!(format_short(&tower), "10^^3");
        assert_eq!(format_full(&tower), "10^^3");
        assert_eq!(format_short(&parse("1e400").unwrap().value), "1e400");
    }
}
