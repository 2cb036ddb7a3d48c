// ============================================================================
// Vocabulary Module
// Static suffix/word table shared by the parser and the formatter
// ============================================================================

mod suggest;
mod table;

pub use suggest::{edit_distance, DEFAULT_SUGGESTIONS};
pub use table::{vocabulary, SuffixUnit, Vocabulary};

pub(crate) use table::normalize_token;

/// Case-insensitive match on short codes.
pub fn lookup_by_suffix(code: &str) -> Option<&'static SuffixUnit> {
    vocabulary().lookup_by_suffix(code)
}

/// Case- and whitespace-insensitive match on full words.
pub fn lookup_by_word(word: &str) -> Option<&'static SuffixUnit> {
    vocabulary().lookup_by_word(word)
}

/// Largest unit not exceeding `10^exponent`.
pub fn lookup_by_power(exponent: u32) -> Option<&'static SuffixUnit> {
    vocabulary().lookup_by_power(exponent)
}

/// Every accepted short code.
pub fn all_suffix_codes() -> Vec<&'static str> {
    vocabulary().all_suffix_codes()
}

/// Every full word.
pub fn all_suffix_words() -> Vec<&'static str> {
    vocabulary().all_suffix_words()
}
