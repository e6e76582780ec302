//! Dynamically-growing dense n-gram frequency corpus
//!
//! The corpus is an `n`-dimensional (n ∈ {1,2,3}) frequency table addressed
//! character-by-character. Rather than nesting associative maps, it is laid
//! out as a dense tensor: an alphabet vector, a char→index map, and a flat
//! count vector of length `alphabet.len()^n`. The rectangularity invariant
//! (every sibling branch carries the same key set) holds by construction:
//! admitting a new character appends it to the alphabet and re-lays-out the
//! tensor, which is exactly "insert the key at every branch at its depth
//! with zero-initialized sub-trees" in one pass.
//!
//! Lookup cost is O(n) regardless of alphabet size.

use crate::errors::{LangsiftError, Result};
use crate::types::VocabularyMode;
use crate::vocab;
use rustc_hash::FxHashMap;

// ============================================================================
// Character addressing
// ============================================================================

/// Shared addressing scheme: maps an n-gram of characters to a flat offset
/// in a dense tensor of shape `alphabet.len()^order`.
///
/// The corpus and the post-training probability table use the same
/// addressing, so a path admitted at training time resolves identically
/// against the frozen table.
#[derive(Debug, Clone, Default)]
pub struct CharAddressing {
    order: usize,
    alphabet: Vec<char>,
    index: FxHashMap<char, u32>,
}

impl CharAddressing {
    fn new(order: usize, alphabet: Vec<char>) -> Self {
        let index = alphabet
            .iter()
            .enumerate()
            .map(|(i, &ch)| (ch, i as u32))
            .collect();
        Self {
            order,
            alphabet,
            index,
        }
    }

    /// n-gram order of the addressed tensor
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of distinct first-depth keys (the alphabet size)
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    /// The alphabet in insertion order
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Whether a character is currently a vocabulary member
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Total tensor size: `alphabet_len^order`
    fn tensor_len(&self) -> usize {
        self.alphabet.len().pow(self.order as u32)
    }

    /// Flat offset for an n-gram, or `None` if any character is absent
    /// or the window length does not match the order.
    pub fn resolve(&self, ngram: &[char]) -> Option<usize> {
        if ngram.len() != self.order {
            return None;
        }
        let mut flat = 0usize;
        for &ch in ngram {
            let idx = *self.index.get(&ch)? as usize;
            flat = flat * self.alphabet.len() + idx;
        }
        Some(flat)
    }

    /// Append a character to the alphabet, returning its index.
    fn push(&mut self, ch: char) -> u32 {
        let idx = self.alphabet.len() as u32;
        self.alphabet.push(ch);
        self.index.insert(ch, idx);
        idx
    }
}

// ============================================================================
// NgramCorpus
// ============================================================================

/// A dense `order`-dimensional frequency table over a (possibly growing)
/// character alphabet.
#[derive(Debug, Clone)]
pub struct NgramCorpus {
    addressing: CharAddressing,
    mode: VocabularyMode,
    counts: Vec<u64>,
}

impl NgramCorpus {
    /// Allocate an `order`-deep table seeded with the mode's alphabet at
    /// count 0. For `UnicodeAlpha` the table starts empty and grows as
    /// characters are admitted.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `order` is not 1, 2 or 3.
    pub fn new(order: usize, mode: VocabularyMode) -> Result<Self> {
        if !(1..=3).contains(&order) {
            return Err(LangsiftError::invalid_config(format!(
                "n-gram order must be 1, 2 or 3, got {order}"
            )));
        }
        let addressing = CharAddressing::new(order, vocab::seed_alphabet(mode));
        let counts = vec![0u64; addressing.tensor_len()];
        Ok(Self {
            addressing,
            mode,
            counts,
        })
    }

    /// n-gram order
    pub fn order(&self) -> usize {
        self.addressing.order()
    }

    /// Vocabulary mode this corpus was built with
    pub fn mode(&self) -> VocabularyMode {
        self.mode
    }

    /// Count of distinct first-depth keys
    pub fn alphabet_len(&self) -> usize {
        self.addressing.alphabet_len()
    }

    /// The alphabet in admission order
    pub fn alphabet(&self) -> &[char] {
        self.addressing.alphabet()
    }

    /// Sum of all leaf counts
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Ensure every character of `ngram` is a vocabulary member.
    ///
    /// A character absent from the table fails with `NotInVocabulary` when
    /// growth is disallowed (testing time) or when it is not admissible
    /// under the vocabulary mode. When absent, admissible and growth is
    /// allowed (training time, `UnicodeAlpha` only), the character is
    /// spread into the table: the alphabet grows by one key and the tensor
    /// is re-laid-out so the key exists at every branch at every depth,
    /// zero-initialized.
    ///
    /// The whole window is validated before any growth, so a rejected
    /// n-gram leaves the vocabulary untouched even when some of its
    /// characters would have been admissible.
    pub fn admit(&mut self, ngram: &[char], allow_growth: bool) -> Result<()> {
        for &ch in ngram {
            if !self.addressing.contains(ch)
                && (!allow_growth || !vocab::is_admissible(ch, self.mode))
            {
                return Err(LangsiftError::not_in_vocabulary(ch));
            }
        }
        for &ch in ngram {
            if !self.addressing.contains(ch) {
                self.grow(ch);
            }
        }
        Ok(())
    }

    /// Admit the n-gram with growth allowed, then increment its leaf count.
    ///
    /// Returns `false` without mutation when the n-gram contains a character
    /// the vocabulary will not admit; the caller counts successes (this
    /// count becomes the model's `class_size`).
    pub fn insert(&mut self, ngram: &[char]) -> bool {
        if self.admit(ngram, true).is_err() {
            return false;
        }
        // Admission guarantees the path resolves.
        match self.addressing.resolve(ngram) {
            Some(flat) => {
                self.counts[flat] += 1;
                true
            }
            None => false,
        }
    }

    /// Leaf count lookup. `None` when the n-gram does not resolve in the
    /// current vocabulary.
    pub fn get(&self, ngram: &[char]) -> Option<u64> {
        self.addressing.resolve(ngram).map(|flat| self.counts[flat])
    }

    /// Grow the alphabet by one character and re-lay-out the tensor.
    ///
    /// Old entries keep their character indices; only the stride changes
    /// (`old_len` → `old_len + 1` per dimension), so each occupied offset
    /// is re-based digit by digit.
    fn grow(&mut self, ch: char) {
        let old_len = self.addressing.alphabet_len();
        self.addressing.push(ch);
        let new_len = self.addressing.alphabet_len();

        let order = self.addressing.order();
        let mut next = vec![0u64; self.addressing.tensor_len()];
        for (flat, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            // Decompose in base old_len, recompose in base new_len.
            let mut digits = [0usize; 3];
            let mut rem = flat;
            for d in (0..order).rev() {
                digits[d] = rem % old_len;
                rem /= old_len;
            }
            let mut rebased = 0usize;
            for &digit in digits.iter().take(order) {
                rebased = rebased * new_len + digit;
            }
            next[rebased] = count;
        }
        self.counts = next;
    }

    /// Pure transform into an immutable probability table of the same
    /// shape, replacing every leaf count with `leaf(count)`.
    pub fn to_probability_table(&self, leaf: impl Fn(u64) -> f64) -> ProbabilityTable {
        ProbabilityTable {
            addressing: self.addressing.clone(),
            log_probs: self.counts.iter().map(|&c| leaf(c)).collect(),
        }
    }
}

// ============================================================================
// ProbabilityTable
// ============================================================================

/// Frozen log-probability table produced by [`NgramCorpus::to_probability_table`].
///
/// Shares the corpus addressing scheme but never grows: a test n-gram that
/// cannot be resolved is a `NotInVocabulary` outcome, which callers map to
/// the model's fallback probability.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    addressing: CharAddressing,
    log_probs: Vec<f64>,
}

impl ProbabilityTable {
    /// Non-growing lookup of a smoothed log-probability leaf.
    ///
    /// A window whose length does not match the table order is a caller
    /// bug and reported as `InvalidConfig`, not as a vocabulary miss.
    pub fn lookup(&self, ngram: &[char]) -> Result<f64> {
        if ngram.len() != self.addressing.order() {
            return Err(LangsiftError::invalid_config(format!(
                "lookup window of length {} against an order-{} table",
                ngram.len(),
                self.addressing.order()
            )));
        }
        match self.addressing.resolve(ngram) {
            Some(flat) => Ok(self.log_probs[flat]),
            // With the length checked, resolve can only fail on an
            // absent character.
            None => {
                let ch = ngram
                    .iter()
                    .copied()
                    .find(|&c| !self.addressing.contains(c))
                    .unwrap_or_default();
                Err(LangsiftError::not_in_vocabulary(ch))
            }
        }
    }

    /// Count of distinct first-depth keys
    pub fn alphabet_len(&self) -> usize {
        self.addressing.alphabet_len()
    }

    /// n-gram order
    pub fn order(&self) -> usize {
        self.addressing.order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_new_seeds_static_alphabet() {
        let corpus = NgramCorpus::new(1, VocabularyMode::Lower).unwrap();
        assert_eq!(corpus.alphabet_len(), 26);
        assert_eq!(corpus.get(&['a']), Some(0));
        assert_eq!(corpus.get(&['z']), Some(0));

        let corpus = NgramCorpus::new(2, VocabularyMode::LowerUpper).unwrap();
        assert_eq!(corpus.alphabet_len(), 52);
        assert_eq!(corpus.get(&['A', 'z']), Some(0));
    }

    #[test]
    fn test_new_unicode_alpha_starts_empty() {
        let corpus = NgramCorpus::new(3, VocabularyMode::UnicodeAlpha).unwrap();
        assert_eq!(corpus.alphabet_len(), 0);
        assert_eq!(corpus.get(&chars("abc")), None);
    }

    #[test]
    fn test_new_rejects_bad_order() {
        assert!(NgramCorpus::new(0, VocabularyMode::Lower).is_err());
        assert!(NgramCorpus::new(4, VocabularyMode::Lower).is_err());
    }

    #[test]
    fn test_insert_and_get() {
        let mut corpus = NgramCorpus::new(2, VocabularyMode::Lower).unwrap();
        assert!(corpus.insert(&chars("th")));
        assert!(corpus.insert(&chars("th")));
        assert!(corpus.insert(&chars("he")));
        assert_eq!(corpus.get(&chars("th")), Some(2));
        assert_eq!(corpus.get(&chars("he")), Some(1));
        assert_eq!(corpus.get(&chars("xy")), Some(0));
    }

    #[test]
    fn test_insert_rejects_outside_static_alphabet() {
        let mut corpus = NgramCorpus::new(1, VocabularyMode::Lower).unwrap();
        assert!(!corpus.insert(&['T']));
        assert!(!corpus.insert(&['3']));
        assert!(!corpus.insert(&[' ']));
        assert_eq!(corpus.total_count(), 0);
    }

    #[test]
    fn test_admit_without_growth_fails_on_absent_char() {
        let mut corpus = NgramCorpus::new(1, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.insert(&['a']));

        let err = corpus.admit(&['b'], false).unwrap_err();
        assert!(err.is_vocabulary_rejection());

        // Growth allowed: same character is admitted.
        assert!(corpus.admit(&['b'], true).is_ok());
        assert_eq!(corpus.get(&['b']), Some(0));
    }

    #[test]
    fn test_admit_rejects_non_alphabetic_even_with_growth() {
        let mut corpus = NgramCorpus::new(1, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.admit(&['7'], true).is_err());
        assert!(corpus.admit(&['!'], true).is_err());
        assert_eq!(corpus.alphabet_len(), 0);
    }

    #[test]
    fn test_growth_preserves_existing_counts() {
        let mut corpus = NgramCorpus::new(2, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.insert(&chars("ab")));
        assert!(corpus.insert(&chars("ab")));
        assert!(corpus.insert(&chars("ba")));

        // New character re-lays-out the tensor; old counts must survive.
        assert!(corpus.insert(&chars("ñb")));
        assert_eq!(corpus.get(&chars("ab")), Some(2));
        assert_eq!(corpus.get(&chars("ba")), Some(1));
        assert_eq!(corpus.get(&chars("ñb")), Some(1));
    }

    #[test]
    fn test_growth_spreads_key_to_every_branch() {
        let mut corpus = NgramCorpus::new(2, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.insert(&chars("ab")));
        assert!(corpus.insert(&chars("ñx")));

        // Rectangularity: ñ and x exist as keys at both depths of every
        // branch, zero-initialized except the path actually incremented.
        for &first in corpus.alphabet() {
            for &second in corpus.alphabet() {
                let count = corpus.get(&[first, second]);
                assert!(count.is_some(), "missing path {first}{second}");
                if (first, second) != ('a', 'b') && (first, second) != ('ñ', 'x') {
                    assert_eq!(count, Some(0));
                }
            }
        }
        assert_eq!(corpus.get(&chars("ab")), Some(1));
        assert_eq!(corpus.get(&chars("ñx")), Some(1));
    }

    #[test]
    fn test_trigram_growth() {
        let mut corpus = NgramCorpus::new(3, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.insert(&chars("abc")));
        assert!(corpus.insert(&chars("abd")));
        assert!(corpus.insert(&chars("éab")));
        assert_eq!(corpus.get(&chars("abc")), Some(1));
        assert_eq!(corpus.get(&chars("abd")), Some(1));
        assert_eq!(corpus.get(&chars("éab")), Some(1));
        assert_eq!(corpus.alphabet_len(), 5);
        // 5^3 paths all resolvable
        assert_eq!(corpus.get(&chars("ééé")), Some(0));
    }

    #[test]
    fn test_mixed_ngram_partial_rejection() {
        let mut corpus = NgramCorpus::new(2, VocabularyMode::Lower).unwrap();
        // 't' is fine but '3' is not: the whole n-gram is rejected.
        assert!(!corpus.insert(&chars("t3")));
        assert_eq!(corpus.get(&chars("t3")), None);
        assert_eq!(corpus.total_count(), 0);
    }

    #[test]
    fn test_rejected_insert_leaves_growing_vocabulary_untouched() {
        let mut corpus = NgramCorpus::new(2, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.insert(&chars("ab")));
        assert_eq!(corpus.alphabet_len(), 2);

        // 'ñ' alone would be admissible, but '3' never is: the whole
        // window is rejected and 'ñ' must not be admitted as a side
        // effect.
        assert!(!corpus.insert(&chars("ñ3")));
        assert_eq!(corpus.alphabet_len(), 2);
        assert!(!corpus.alphabet().contains(&'ñ'));
        assert_eq!(corpus.get(&chars("ña")), None);
        assert_eq!(corpus.total_count(), 1);
    }

    #[test]
    fn test_wrong_window_length() {
        let corpus = NgramCorpus::new(2, VocabularyMode::Lower).unwrap();
        assert_eq!(corpus.get(&chars("abc")), None);
        assert_eq!(corpus.get(&chars("a")), None);
    }

    #[test]
    fn test_probability_table_shape_and_lookup() {
        let mut corpus = NgramCorpus::new(1, VocabularyMode::Lower).unwrap();
        assert!(corpus.insert(&['t']));
        assert!(corpus.insert(&['t']));
        assert!(corpus.insert(&['h']));

        let table = corpus.to_probability_table(|c| c as f64 * 10.0);
        assert_eq!(table.alphabet_len(), 26);
        assert_eq!(table.order(), 1);
        assert_eq!(table.lookup(&['t']).unwrap(), 20.0);
        assert_eq!(table.lookup(&['h']).unwrap(), 10.0);
        assert_eq!(table.lookup(&['z']).unwrap(), 0.0);
        assert!(table.lookup(&['T']).is_err());
    }

    #[test]
    fn test_probability_table_does_not_grow() {
        let mut corpus = NgramCorpus::new(1, VocabularyMode::UnicodeAlpha).unwrap();
        assert!(corpus.insert(&['a']));
        let table = corpus.to_probability_table(|c| c as f64);

        // 'é' is admissible for the mode, but the frozen table still
        // rejects it.
        let err = table.lookup(&['é']).unwrap_err();
        assert!(err.is_vocabulary_rejection());
    }

    #[test]
    fn test_lookup_wrong_window_length_is_not_a_vocabulary_miss() {
        let mut corpus = NgramCorpus::new(2, VocabularyMode::Lower).unwrap();
        assert!(corpus.insert(&chars("ab")));
        let table = corpus.to_probability_table(|c| c as f64);

        let err = table.lookup(&chars("abc")).unwrap_err();
        assert!(!err.is_vocabulary_rejection());
        assert!(matches!(err, LangsiftError::InvalidConfig { .. }));

        let err = table.lookup(&['a']).unwrap_err();
        assert!(matches!(err, LangsiftError::InvalidConfig { .. }));
    }
}
