// ============================================================================
// Digit Rendering
// Exact, grouped, scientific and debug renderings
// ============================================================================

use crate::numeric::{Amount, ExactDecimal, SymbolicExpr};
use num_bigint::BigUint;
use num_traits::Zero;

/// Integer and fraction digits of `magnitude × 10^scale`, no sign.
pub(super) fn split_digits(magnitude: &BigUint, scale: i64) -> (String, String) {
    if magnitude.is_zero() {
        return ("0".to_string(), String::new());
    }
    let digits = magnitude.to_str_radix(10);
    if scale >= 0 {
        let mut integer = digits;
        integer.extend(std::iter::repeat('0').take(scale as usize));
        return (integer, String::new());
    }

    let point = digits.len() as i64 + scale;
    if point > 0 {
        let (integer, fraction) = digits.split_at(point as usize);
        (integer.to_string(), fraction.to_string())
    } else {
        let mut fraction = "0".repeat(point.unsigned_abs() as usize);
        fraction.push_str(&digits);
        ("0".to_string(), fraction)
    }
}

/// Keep the first `places` fraction digits, padding with zeros.
pub(super) fn fixed_fraction(fraction: &str, places: usize) -> String {
    let mut kept: String = fraction.chars().take(places).collect();
    while kept.len() < places {
        kept.push('0');
    }
    kept
}

/// Insert a comma every three digits from the right.
pub(super) fn group_thousands(integer: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// `"-"` for values whose rendering is not all zeros.
pub(super) fn sign_prefix(negative: bool, integer: &str, fraction: &str) -> &'static str {
    let all_zero = integer.chars().chain(fraction.chars()).all(|c| c == '0');
    if negative && !all_zero {
        "-"
    } else {
        ""
    }
}

/// Ungrouped canonical form: the persisted representation.
///
/// Exact values render as `ExactDecimal`'s `Display` (`"1000000000"`,
/// `"-12.5"`). Symbolic values keep their whole mantissa
/// (`"1.23456789e400"`), unlike the four-digit `describe()` label.
pub fn format_exact(value: &Amount) -> String {
    value.to_string()
}

/// Comma-grouped exact form: `"1,000,000,000"`, `"-1,234.5"`.
pub fn format_grouped(value: &Amount) -> String {
    match value {
        Amount::Exact(exact) => grouped_exact(exact),
        Amount::Symbolic(symbolic) => symbolic.describe(),
    }
}

pub(super) fn grouped_exact(value: &ExactDecimal) -> String {
    let (integer, fraction) = split_digits(value.magnitude(), value.scale() as i64);
    let sign = if value.is_negative() { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, group_thousands(&integer))
    } else {
        format!("{}{}.{}", sign, group_thousands(&integer), fraction)
    }
}

/// Scientific form with a truncated four-digit mantissa: `"1.234e15"`.
///
/// For powers of zero or more the output parses back to a value no larger
/// than the input.
pub fn format_scientific(value: &Amount) -> String {
    let exact = match value {
        Amount::Exact(exact) => exact,
        Amount::Symbolic(symbolic) => return symbolic.describe(),
    };
    if exact.is_zero() {
        return "0".to_string();
    }

    let digits = exact.magnitude().to_str_radix(10);
    let power = digits.len() as i64 - 1 + exact.scale() as i64;
    let (lead, rest) = digits.split_at(1);
    let rest: String = rest.chars().take(3).collect();
    let rest = rest.trim_end_matches('0');
    let sign = if exact.is_negative() { "-" } else { "" };

    if rest.is_empty() {
        format!("{}{}e{}", sign, lead, power)
    } else {
        format!("{}{}.{}e{}", sign, lead, rest, power)
    }
}

/// Structural rendering for logs and test failures; never user-facing.
///
/// `Exact{sign=+1, magnitude=15, scale=2}`, `Symbolic{Tower{base=10, height=3}}`
pub fn format_debug(value: &Amount) -> String {
    match value {
        Amount::Exact(exact) => {
            let sign = match exact.signum() {
                1 => "+1",
                -1 => "-1",
                _ => "0",
            };
            format!(
                "Exact{{sign={}, magnitude={}, scale={}}}",
                sign,
                exact.magnitude(),
                exact.scale()
            )
        },
        Amount::Symbolic(symbolic) => format!("Symbolic{{{}}}", debug_expr(symbolic.expr())),
    }
}

fn debug_expr(expr: &SymbolicExpr) -> String {
    match expr {
        SymbolicExpr::Named(name) => format!("Named{{{}}}", name.label()),
        SymbolicExpr::Power { mantissa, exponent } => {
            format!("Power{{mantissa={}, exponent={}}}", mantissa, exponent)
        },
        SymbolicExpr::Tower { base, height } => {
            format!("Tower{{base={}, height={}}}", base, height)
        },
        SymbolicExpr::Scaled { inner, factor } => {
            format!("Scaled{{inner={}, factor={}}}", debug_expr(inner), factor)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_short;
    use crate::parser::parse;

    fn amount(text: &str) -> Amount {
        Amount::Exact(text.parse().unwrap())
    }

    #[test]
    fn test_split_digits() {
        let n = BigUint::from(12345u32);
        assert_eq!(split_digits(&n, 0), ("12345".to_string(), String::new()));
        assert_eq!(split_digits(&n, 2), ("1234500".to_string(), String::new()));
        assert_eq!(split_digits(&n, -2), ("123".to_string(), "45".to_string()));
        assert_eq!(split_digits(&n, -7), ("0".to_string(), "0012345".to_string()));
        assert_eq!(split_digits(&BigUint::zero(), 4), ("0".to_string(), String::new()));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_exact() {
        assert_eq!(format_exact(&parse("1b").unwrap().value), "1000000000");
        assert_eq!(format_exact(&amount("-12.5")), "-12.5");
        assert_eq!(format_exact(&Amount::zero()), "0");
        assert_eq!(format_exact(&Amount::from_tower(10, 3).unwrap()), "10^^3");
    }

    #[test]
    fn test_format_exact_keeps_full_mantissa() {
        let power = parse("1.23456789e400").unwrap().value;
        assert_eq!(format_exact(&power), "1.23456789e400");
        assert_eq!(format_short(&power), "1.234e400");
        assert_eq!(parse(&format_exact(&power)).unwrap().value, power);

        let scaled = power.checked_mul(&amount("2.5")).unwrap();
        assert_eq!(format_exact(&scaled), "2.5 × 1.23456789e400");
        assert_eq!(parse(&format_exact(&scaled)).unwrap().value, scaled);

        let long = parse(&format!("{}e500", "9".repeat(32))).unwrap().value;
        assert_eq!(parse(&format_exact(&long)).unwrap().value, long);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(&amount("1000000000")), "1,000,000,000");
        assert_eq!(format_grouped(&amount("-1234.5")), "-1,234.5");
        assert_eq!(format_grouped(&amount("0.25")), "0.25");
        assert_eq!(format_grouped(&amount("999")), "999");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(&amount("1234567890000000")), "1.234e15");
        assert_eq!(format_scientific(&amount("1000")), "1e3");
        assert_eq!(format_scientific(&amount("-25")), "-2.5e1");
        assert_eq!(format_scientific(&amount("0.0015")), "1.5e-3");
        assert_eq!(format_scientific(&Amount::zero()), "0");
        assert_eq!(format_scientific(&parse("1.5e400").unwrap().value), "1.5e400");
    }

    #[test]
    fn test_scientific_parses_back_for_non_negative_powers() {
        let value = amount("98765432100");
        let text = format_scientific(&value);
        let reparsed = parse(&text).unwrap().value;
        assert_eq!(reparsed, amount("98760000000"));
        assert!(reparsed <= value);
    }

    #[test]
    fn test_format_debug() {
        assert_eq!(format_debug(&amount("1500")), "Exact{sign=+1, magnitude=15, scale=2}");
        assert_eq!(format_debug(&amount("-0.5")), "Exact{sign=-1, magnitude=5, scale=-1}");
        assert_eq!(format_debug(&Amount::zero()), "Exact{sign=0, magnitude=0, scale=0}");
        assert_eq!(
            format_debug(&Amount::from_tower(10, 3).unwrap()),
            "Symbolic{Tower{base=10, height=3}}"
        );
        assert_eq!(
            format_debug(&parse("2e400").unwrap().value),
            "Symbolic{Power{mantissa=2, exponent=400}}"
        );
    }
}
