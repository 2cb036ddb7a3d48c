// ============================================================================
// Engine Configuration
// Parse limits and display presentation for amount text
// ============================================================================

use crate::numeric::{ExactDecimal, CEILING_EXPONENT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Parse Options
// ============================================================================

/// Limits applied by the parser on top of the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseOptions {
    /// Largest accepted power of ten (`floor(log10(value))`).
    /// None means only the grammar limits apply; huge values parse as symbolic.
    pub max_power: Option<u32>,

    /// Truncate fractional input toward zero (the currency has no sub-unit).
    pub whole_units: bool,
}

impl ParseOptions {
    /// Create options with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the largest accepted power of ten
    pub fn with_max_power(mut self, max_power: u32) -> Self {
        self.max_power = Some(max_power);
        self
    }

    /// Builder method: Truncate fractional input to whole units
    pub fn with_whole_units(mut self, whole_units: bool) -> Self {
        self.whole_units = whole_units;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), String> {
        if let Some(max_power) = self.max_power {
            if max_power > CEILING_EXPONENT * 1000 {
                return Err("Max power is beyond any representable estimate".to_string());
            }
        }
        Ok(())
    }
}

// ============================================================================
// Preset Parse Options
// ============================================================================

impl ParseOptions {
    /// Bets, transfers and other player-entered amounts
    /// - Whole units only
    /// - Nothing above the exact ceiling
    pub fn player_input() -> Self {
        Self::new()
            .with_max_power(CEILING_EXPONENT)
            .with_whole_units(true)
    }

    /// Admin grants and demo ceilings
    /// - Fractions kept as entered
    /// - Symbolic magnitudes allowed
    pub fn admin() -> Self {
        Self::new()
    }
}

// ============================================================================
// Display Configuration
// ============================================================================

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymbolPosition {
    /// "$1.50k"
    Prefix,
    /// "1.50k coins"
    Suffix,
}

/// Presentation choices layered on top of the short and exact formats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Currency symbol or name; empty for none
    pub symbol: String,

    /// Placement of the symbol
    pub symbol_position: SymbolPosition,

    /// Balances below this magnitude are shown in full, digit-grouped
    pub compact_threshold: ExactDecimal,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::plain()
    }
}

impl DisplayConfig {
    /// Create a configuration with required parameters
    pub fn new(symbol: impl Into<String>, symbol_position: SymbolPosition) -> Self {
        Self {
            symbol: symbol.into(),
            symbol_position,
            compact_threshold: ExactDecimal::from_integer(1_000_000),
        }
    }

    /// Builder method: Set the full-digit display threshold
    pub fn with_compact_threshold(mut self, threshold: ExactDecimal) -> Self {
        self.compact_threshold = threshold;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.compact_threshold.is_positive() {
            return Err("Compact threshold must be positive".to_string());
        }
        if self.symbol.chars().any(|c| c.is_ascii_digit()) {
            return Err("Currency symbol cannot contain digits".to_string());
        }
        Ok(())
    }

    /// No symbol
    pub fn plain() -> Self {
        Self::new("", SymbolPosition::Prefix)
    }

    /// Coin emoji before the amount: "🪙 1.50k"
    pub fn coins() -> Self {
        Self::new("🪙 ", SymbolPosition::Prefix)
    }

    /// Dollar sign before the amount: "$1.50k"
    pub fn dollars() -> Self {
        Self::new("$", SymbolPosition::Prefix)
    }

    /// Currency name after the amount: "1.50k credits"
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, SymbolPosition::Suffix)
    }
}
