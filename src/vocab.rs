//! Vocabulary policy
//!
//! Pure predicates over the configured [`VocabularyMode`]: which characters
//! may ever become vocabulary members, the seed alphabet for the static
//! modes, and the memoized count of all alphabetic Unicode code points
//! (used to inflate the smoothing denominator in `UnicodeAlpha` mode).

use crate::types::VocabularyMode;
use std::sync::OnceLock;

/// Initial character set for a vocabulary mode.
///
/// Empty for [`VocabularyMode::UnicodeAlpha`], which grows on demand
/// instead of being pre-seeded.
pub fn seed_alphabet(mode: VocabularyMode) -> Vec<char> {
    match mode {
        VocabularyMode::Lower => ('a'..='z').collect(),
        VocabularyMode::LowerUpper => ('a'..='z').chain('A'..='Z').collect(),
        VocabularyMode::UnicodeAlpha => Vec::new(),
    }
}

/// Whether a character may ever become a vocabulary member under `mode`.
///
/// For the static modes this is membership in the seed set (no growth is
/// permitted); for `UnicodeAlpha` it is `char::is_alphabetic`.
pub fn is_admissible(ch: char, mode: VocabularyMode) -> bool {
    match mode {
        VocabularyMode::Lower => ch.is_ascii_lowercase(),
        VocabularyMode::LowerUpper => ch.is_ascii_alphabetic(),
        VocabularyMode::UnicodeAlpha => ch.is_alphabetic(),
    }
}

/// Total count of Unicode scalar values classified alphabetic.
///
/// Scans the code-point space once on first use and memoizes the result.
/// This is the upper bound on unseen vocabulary mass used by
/// `UnicodeAlpha` smoothing.
pub fn unicode_alphabetic_count() -> usize {
    static COUNT: OnceLock<usize> = OnceLock::new();
    *COUNT.get_or_init(|| {
        (0..=0x10FFFFu32)
            .filter_map(char::from_u32)
            .filter(|c| c.is_alphabetic())
            .count()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_alphabet_sizes() {
        assert_eq!(seed_alphabet(VocabularyMode::Lower).len(), 26);
        assert_eq!(seed_alphabet(VocabularyMode::LowerUpper).len(), 52);
        assert!(seed_alphabet(VocabularyMode::UnicodeAlpha).is_empty());
    }

    #[test]
    fn test_seed_alphabet_contents() {
        let lower = seed_alphabet(VocabularyMode::Lower);
        assert_eq!(lower.first(), Some(&'a'));
        assert_eq!(lower.last(), Some(&'z'));
        assert!(!lower.contains(&'A'));

        let both = seed_alphabet(VocabularyMode::LowerUpper);
        assert!(both.contains(&'a'));
        assert!(both.contains(&'Z'));
    }

    #[test]
    fn test_is_admissible_lower() {
        assert!(is_admissible('q', VocabularyMode::Lower));
        assert!(!is_admissible('Q', VocabularyMode::Lower));
        assert!(!is_admissible('é', VocabularyMode::Lower));
        assert!(!is_admissible('3', VocabularyMode::Lower));
        assert!(!is_admissible(' ', VocabularyMode::Lower));
    }

    #[test]
    fn test_is_admissible_lower_upper() {
        assert!(is_admissible('q', VocabularyMode::LowerUpper));
        assert!(is_admissible('Q', VocabularyMode::LowerUpper));
        assert!(!is_admissible('é', VocabularyMode::LowerUpper));
        assert!(!is_admissible('!', VocabularyMode::LowerUpper));
    }

    #[test]
    fn test_is_admissible_unicode_alpha() {
        assert!(is_admissible('q', VocabularyMode::UnicodeAlpha));
        assert!(is_admissible('é', VocabularyMode::UnicodeAlpha));
        assert!(is_admissible('ñ', VocabularyMode::UnicodeAlpha));
        assert!(is_admissible('日', VocabularyMode::UnicodeAlpha));
        assert!(!is_admissible('3', VocabularyMode::UnicodeAlpha));
        assert!(!is_admissible('#', VocabularyMode::UnicodeAlpha));
    }

    #[test]
    fn test_unicode_alphabetic_count_stable() {
        let first = unicode_alphabetic_count();
        let second = unicode_alphabetic_count();
        assert_eq!(first, second);
        // More alphabetic code points than any single script, fewer than
        // the whole code-point space.
        assert!(first > 100_000);
        assert!(first < 0x110000);
    }
}
