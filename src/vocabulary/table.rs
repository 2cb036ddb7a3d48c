// ============================================================================
// Suffix Table
// Short-scale suffix codes and words from thousand (10^3) to centillion (10^303)
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

/// One vocabulary entry: a power of ten with its short code and full word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixUnit {
    code: String,
    aliases: Vec<String>,
    word: String,
    exponent: u32,
}

impl SuffixUnit {
    fn new(code: impl Into<String>, word: impl Into<String>, exponent: u32) -> Self {
        Self {
            code: code.into(),
            aliases: Vec::new(),
            word: word.into(),
            exponent,
        }
    }

    fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Primary short code, used by the compact formatter ("k", "qa").
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Additional short codes accepted by the parser ("bn" for billion).
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Full word ("quadrillion").
    #[inline]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Power of ten the unit denotes.
    #[inline]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// The primary code followed by the aliases.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.code.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// Named units below decillion
const SMALL_UNITS: [(&str, &str); 10] = [
    ("k", "thousand"),
    ("m", "million"),
    ("b", "billion"),
    ("t", "trillion"),
    ("qa", "quadrillion"),
    ("qi", "quintillion"),
    ("sx", "sextillion"),
    ("sp", "septillion"),
    ("oc", "octillion"),
    ("no", "nonillion"),
];

// Latin prefixes for 10^33 .. 10^300
const UNIT_PREFIXES: [(&str, &str); 10] = [
    ("", ""),
    ("u", "un"),
    ("d", "duo"),
    ("t", "tre"),
    ("qa", "quattuor"),
    ("qi", "quin"),
    ("sx", "sex"),
    ("sp", "septen"),
    ("o", "octo"),
    ("n", "novem"),
];

const TEN_PREFIXES: [(&str, &str); 9] = [
    ("dc", "dec"),
    ("vg", "vigint"),
    ("tg", "trigint"),
    ("qag", "quadragint"),
    ("qig", "quinquagint"),
    ("sxg", "sexagint"),
    ("spg", "septuagint"),
    ("ocg", "octogint"),
    ("nog", "nonagint"),
];

/// The read-only vocabulary, ordered by exponent.
#[derive(Debug)]
pub struct Vocabulary {
    units: Vec<SuffixUnit>,
    by_code: HashMap<String, usize>,
    by_word: HashMap<String, usize>,
}

impl Vocabulary {
    fn build() -> Self {
        let mut units = Vec::with_capacity(101);

        for (i, (code, word)) in SMALL_UNITS.iter().enumerate() {
            let exponent = 3 * (i as u32 + 1);
            let unit = SuffixUnit::new(*code, *word, exponent);
            let unit = match *code {
                "m" => unit.with_aliases(&["mil", "mm"]),
                "b" => unit.with_aliases(&["bn"]),
                "t" => unit.with_aliases(&["tn"]),
                _ => unit,
            };
            units.push(unit);
        }

        for (tens, (ten_code, ten_word)) in TEN_PREFIXES.iter().enumerate() {
            for (ones, (unit_code, unit_word)) in UNIT_PREFIXES.iter().enumerate() {
                // n-illion denotes 10^(3n + 3)
                let n = 10 * (tens as u32 + 1) + ones as u32;
                units.push(SuffixUnit::new(
                    format!("{}{}", unit_code, ten_code),
                    format!("{}{}illion", unit_word, ten_word),
                    3 * n + 3,
                ));
            }
        }

        units.push(SuffixUnit::new("ce", "centillion", 303));

        let mut by_code = HashMap::new();
        let mut by_word = HashMap::new();
        for (index, unit) in units.iter().enumerate() {
            for code in unit.codes() {
                by_code.insert(code.to_string(), index);
            }
            by_word.insert(unit.word.clone(), index);
        }

        Self {
            units,
            by_code,
            by_word,
        }
    }

    /// All units, strictly increasing in exponent.
    #[inline]
    pub fn units(&self) -> &[SuffixUnit] {
        &self.units
    }

    /// Case-insensitive exact match on short codes and aliases.
    pub fn lookup_by_suffix(&self, code: &str) -> Option<&SuffixUnit> {
        let key = code.trim().to_lowercase();
        self.by_code.get(&key).map(|&i| &self.units[i])
    }

    /// Case- and whitespace-insensitive match on full words; a plural `s` is
    /// tolerated ("Millions").
    pub fn lookup_by_word(&self, word: &str) -> Option<&SuffixUnit> {
        let key = normalize_token(word);
        if let Some(&i) = self.by_word.get(&key) {
            return Some(&self.units[i]);
        }
        key.strip_suffix('s')
            .and_then(|singular| self.by_word.get(singular))
            .map(|&i| &self.units[i])
    }

    /// Match a code first, then a word.
    pub fn lookup(&self, token: &str) -> Option<&SuffixUnit> {
        self.lookup_by_suffix(token).or_else(|| self.lookup_by_word(token))
    }

    /// Largest unit whose exponent does not exceed `exponent`.
    pub fn lookup_by_power(&self, exponent: u32) -> Option<&SuffixUnit> {
        let count = self.units.partition_point(|u| u.exponent <= exponent);
        count.checked_sub(1).map(|i| &self.units[i])
    }

    /// Every accepted short code, primary codes and aliases in table order.
    pub fn all_suffix_codes(&self) -> Vec<&str> {
        self.units.iter().flat_map(SuffixUnit::codes).collect()
    }

    /// Every full word in table order.
    pub fn all_suffix_words(&self) -> Vec<&str> {
        self.units.iter().map(SuffixUnit::word).collect()
    }
}

/// Lower-case and drop all whitespace.
pub(crate) fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

static VOCABULARY: OnceLock<Vocabulary> = OnceLock::new();

/// The process-wide vocabulary, built on first use and never mutated.
pub fn vocabulary() -> &'static Vocabulary {
    VOCABULARY.get_or_init(Vocabulary::build)
}
