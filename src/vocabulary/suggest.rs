// ============================================================================
// Suffix Suggestions
// Deterministic nearest-match ranking for unknown suffix tokens
// ============================================================================

use super::table::{normalize_token, Vocabulary};
use smallvec::SmallVec;

/// Number of suggestions attached to a `bad_suffix` parse error.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Levenshtein distance over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: SmallVec<[char; 32]> = b.chars().collect();
    let mut previous: SmallVec<[usize; 32]> = (0..=b.len()).collect();
    let mut current: SmallVec<[usize; 32]> = SmallVec::from_elem(0, b.len() + 1);

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

fn common_prefix(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

impl Vocabulary {
    /// Closest codes and words to `token`, best first.
    ///
    /// Ranked by edit distance, then longer shared prefix, then table order
    /// (codes before the word of the same unit). The result depends only on
    /// `token` and `limit`.
    pub fn suggest(&self, token: &str, limit: usize) -> SmallVec<[&str; DEFAULT_SUGGESTIONS]> {
        let needle = normalize_token(token);

        let candidates = self
            .units()
            .iter()
            .flat_map(|unit| unit.codes().chain(std::iter::once(unit.word())));

        let mut ranked: Vec<(usize, usize, usize, &str)> = candidates
            .enumerate()
            .map(|(order, candidate)| {
                (
                    edit_distance(&needle, candidate),
                    usize::MAX - common_prefix(&needle, candidate),
                    order,
                    candidate,
                )
            })
            .collect();
        ranked.sort_unstable();

        ranked
            .into_iter()
            .take(limit)
            .map(|(_, _, _, candidate)| candidate)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::vocabulary;
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("milion", "million"), 1);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn test_suggest_typo() {
        let suggestions = vocabulary().suggest("milion", DEFAULT_SUGGESTIONS);
        assert_eq!(suggestions[0], "million");
        assert_eq!(suggestions.len(), 3);
    }

    #[test]
    fn test_suggest_is_deterministic() {
        let first = vocabulary().suggest("qz", DEFAULT_SUGGESTIONS);
        let second = vocabulary().suggest("QZ", DEFAULT_SUGGESTIONS);
        assert_eq!(first, second);
        // Distance 1 with shared prefix "q", in table order
        assert_eq!(first.as_slice(), &["qa", "qi", "qag"]);
    }

    #[test]
    fn test_suggest_limit() {
        assert!(vocabulary().suggest("x", 0).is_empty());
        assert_eq!(vocabulary().suggest("x", 5).len(), 5);
    }
}
