// ============================================================================
// Parse Outcome
// Success value and structured failure for amount text
// ============================================================================

use crate::numeric::Amount;
use std::fmt;

/// Why amount text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Leading minus sign on a non-zero amount
    Negative,
    /// No parseable numeric literal
    BadNumber,
    /// Trailing token that is not a known suffix code or word
    BadSuffix,
    /// Magnitude above the caller's `max_power`
    TooLarge,
}

impl ParseErrorKind {
    /// Stable snake_case code for callers building user-facing messages.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::Negative => "negative",
            ParseErrorKind::BadNumber => "bad_number",
            ParseErrorKind::BadSuffix => "bad_suffix",
            ParseErrorKind::TooLarge => "too_large",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured parse failure carrying the offending raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The failure category
    pub kind: ParseErrorKind,
    /// The input exactly as received
    pub raw: String,
    /// The unrecognized suffix token (`BadSuffix` only)
    pub token: Option<String>,
    /// Closest known codes and words, best first (`BadSuffix` only)
    pub suggestions: Vec<String>,
    /// The limit that was exceeded (`TooLarge` only)
    pub max_power: Option<u32>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
            token: None,
            suggestions: Vec::new(),
            max_power: None,
        }
    }

    pub(crate) fn bad_suffix(raw: &str, token: &str, suggestions: Vec<String>) -> Self {
        Self {
            token: Some(token.to_string()),
            suggestions,
            ..Self::new(ParseErrorKind::BadSuffix, raw)
        }
    }

    pub(crate) fn too_large(raw: &str, max_power: u32) -> Self {
        Self {
            max_power: Some(max_power),
            ..Self::new(ParseErrorKind::TooLarge, raw)
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Negative => {
                write!(f, "`{}`: amounts cannot be negative", self.raw)
            },
            ParseErrorKind::BadNumber => write!(f, "`{}` is not a number", self.raw),
            ParseErrorKind::BadSuffix => {
                write!(
                    f,
                    "`{}`: unknown suffix `{}`",
                    self.raw,
                    self.token.as_deref().unwrap_or_default()
                )?;
                if !self.suggestions.is_empty() {
                    write!(f, " (did you mean {}?)", self.suggestions.join(", "))?;
                }
                Ok(())
            },
            ParseErrorKind::TooLarge => match self.max_power {
                Some(max) => write!(f, "`{}` is larger than 10^{}", self.raw, max),
                None => write!(f, "`{}` is too large", self.raw),
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// A successfully parsed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The parsed value
    pub value: Amount,
    /// Lower-cased input without whitespace, separators or a leading `+`
    pub normalized: String,
    /// The input exactly as received
    pub raw: String,
}

/// Result of parsing amount text.
pub type ParseOutcome = Result<Parsed, ParseError>;
