// ============================================================================
// Amount Grammar
// Sign, tower, named, scaled and suffixed-number forms
// ============================================================================
//
//   input    := sign? body
//   body     := scaled | term
//   scaled   := number ws* unit? ws* ('×' | '*') ws* term
//   term     := named | tower | number ws* unit?
//   tower    := digits '^^' digits
//   number   := (digits ('.' digits?)? | '.' digits) exponent?
//   digits   := [0-9] [0-9,_]*
//   exponent := ('e' | 'E') '+'? [0-9]+

use super::error::{ParseError, ParseErrorKind, ParseOutcome, Parsed};
use crate::domain::ParseOptions;
use crate::numeric::{
    digit_len, pow10, Amount, ExactDecimal, NamedMagnitude, NumericError, SymbolicMagnitude,
    CEILING_EXPONENT,
};
use crate::vocabulary::{normalize_token, vocabulary, DEFAULT_SUGGESTIONS};
use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};

/// Parse with no limits beyond the grammar.
pub fn parse(raw: &str) -> ParseOutcome {
    parse_with(raw, &ParseOptions::default())
}

/// Parse amount text under the given limits.
pub fn parse_with(raw: &str, options: &ParseOptions) -> ParseOutcome {
    let trimmed = raw.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start()),
    };

    let mut value = parse_body(body, raw)?;

    if negative && !value.is_zero() {
        return Err(ParseError::new(ParseErrorKind::Negative, raw));
    }

    if options.whole_units {
        if let Amount::Exact(exact) = &value {
            value = Amount::Exact(exact.trunc());
        }
    }

    if let Some(max_power) = options.max_power {
        let too_large = match value.power_estimate() {
            Some(power) => power > max_power as f64,
            // Zero has no power; a symbolic value without one is beyond any finite limit
            None => value.is_symbolic(),
        };
        if too_large {
            return Err(ParseError::too_large(raw, max_power));
        }
    }

    Ok(Parsed {
        value,
        normalized: normalize_body(body),
        raw: raw.to_string(),
    })
}

fn normalize_body(body: &str) -> String {
    body.chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn bad_number(raw: &str) -> ParseError {
    ParseError::new(ParseErrorKind::BadNumber, raw)
}

fn parse_body(body: &str, raw: &str) -> Result<Amount, ParseError> {
    if let Some((factor, inner)) = body.split_once(['×', '*']) {
        // A single factor only: the inner term is never scaled again
        if inner.contains(['×', '*']) {
            return Err(bad_number(raw));
        }
        let factor = parse_number(factor.trim(), raw)?;
        let inner = parse_term(inner.trim(), raw)?;
        return factor.checked_mul(&inner).map_err(|_| bad_number(raw));
    }

    parse_term(body, raw)
}

fn parse_term(body: &str, raw: &str) -> Result<Amount, ParseError> {
    if body.is_empty() {
        return Err(bad_number(raw));
    }

    if let Some(name) = NamedMagnitude::from_label(&normalize_token(body)) {
        return Ok(Amount::Symbolic(SymbolicMagnitude::named(name)));
    }

    if let Some((base, height)) = body.split_once("^^") {
        return parse_tower(base.trim(), height.trim(), raw);
    }

    parse_number(body, raw)
}

// ============================================================================
// Towers
// ============================================================================

fn parse_tower(base: &str, height: &str, raw: &str) -> Result<Amount, ParseError> {
    let base = scan_digits(base)
        .filter(|(_, rest)| rest.is_empty())
        .and_then(|(digits, _)| digits.parse::<u32>().ok())
        .ok_or_else(|| bad_number(raw))?;

    let height = scan_digits(height)
        .filter(|(_, rest)| rest.is_empty())
        .and_then(|(digits, _)| BigUint::parse_bytes(digits.as_bytes(), 10))
        .ok_or_else(|| bad_number(raw))?;

    match height.to_u32() {
        Some(height) => Amount::from_tower(base, height).map_err(|_| bad_number(raw)),
        // Too tall to describe; any such tower of a valid base is past every estimate
        None if base >= 2 => Ok(Amount::Symbolic(SymbolicMagnitude::infinity())),
        None => Err(bad_number(raw)),
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// A scanned numeric literal: `digits × 10^(exponent - fraction_len)`.
struct Literal {
    digits: String,
    fraction_len: usize,
    exponent: BigUint,
}

/// Consume `[0-9][0-9,_]*`, returning the bare digits and the remainder.
fn scan_digits(text: &str) -> Option<(String, &str)> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '_'))
        .unwrap_or(text.len());
    let digits = text[..end].chars().filter(char::is_ascii_digit).collect();
    Some((digits, &text[end..]))
}

fn scan_literal(text: &str) -> Result<(Literal, &str), ()> {
    let (mut digits, mut rest) = scan_digits(text).unwrap_or_default();
    let has_integer = !digits.is_empty();
    if !has_integer {
        rest = text;
    }

    let mut fraction_len = 0;
    if let Some(after_point) = rest.strip_prefix('.') {
        rest = after_point;
        if let Some((fraction, after_fraction)) = scan_digits(after_point) {
            fraction_len = fraction.len();
            digits.push_str(&fraction);
            rest = after_fraction;
        }
    }
    if digits.is_empty() {
        return Err(());
    }

    let mut exponent = BigUint::zero();
    if let Some(after_e) = rest.strip_prefix(['e', 'E']) {
        if after_e.starts_with('-') {
            return Err(());
        }
        let unsigned = after_e.strip_prefix('+').unwrap_or(after_e);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        if end > 0 {
            exponent = BigUint::parse_bytes(unsigned[..end].as_bytes(), 10).ok_or(())?;
            rest = &unsigned[end..];
        } else if after_e.starts_with('+') {
            return Err(());
        }
        // A bare `e` is left to the unit lookup
    }

    Ok((
        Literal {
            digits,
            fraction_len,
            exponent,
        },
        rest,
    ))
}

fn parse_number(body: &str, raw: &str) -> Result<Amount, ParseError> {
    let (literal, rest) = scan_literal(body).map_err(|_| bad_number(raw))?;

    let rest = rest.trim();
    let unit_exponent = if rest.is_empty() {
        0
    } else if rest.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | ',' | '_')) {
        return Err(bad_number(raw));
    } else {
        match vocabulary().lookup(rest) {
            Some(unit) => unit.exponent(),
            None => {
                let suggestions = vocabulary()
                    .suggest(rest, DEFAULT_SUGGESTIONS)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                return Err(ParseError::bad_suffix(raw, rest, suggestions));
            },
        }
    };

    literal_value(&literal, unit_exponent).map_err(|_| bad_number(raw))
}

fn literal_value(literal: &Literal, unit_exponent: u32) -> Result<Amount, NumericError> {
    let magnitude =
        BigUint::parse_bytes(literal.digits.as_bytes(), 10).ok_or(NumericError::InvalidInput)?;
    if magnitude.is_zero() {
        return Ok(Amount::zero());
    }

    let shift = BigInt::from(literal.exponent.clone()) + BigInt::from(unit_exponent)
        - BigInt::from(literal.fraction_len);
    let len = digit_len(&magnitude);
    let lead = &shift + BigInt::from(len - 1);

    let ceiling = BigInt::from(CEILING_EXPONENT);
    let within = lead < ceiling || (lead == ceiling && magnitude == pow10(len - 1));
    if within {
        // Bounded below by the fraction length, so it fits
        let shift = shift.to_i64().ok_or(NumericError::Inexact)?;
        let value = ExactDecimal::normalized(false, magnitude, shift)?;
        return Amount::from_unbounded(value);
    }

    let lead = lead.to_biguint().ok_or(NumericError::InvalidInput)?;
    SymbolicMagnitude::from_digits(&magnitude, &lead).map(Amount::Symbolic)
}
