//! Per-language Naive Bayes model
//!
//! A [`LanguageModel`] owns one [`NgramCorpus`] for its language class.
//! Training streams documents into [`LanguageModel::observe`]; after the
//! full pass, [`LanguageModel::finalize`] turns raw counts into a frozen
//! table of additive-smoothed base-10 log-probabilities plus a class prior.
//! [`LanguageModel::score`] then answers log-domain queries for unseen
//! text, substituting the fallback probability for unresolvable n-grams so
//! every document always receives a finite, comparable score.

use crate::corpus::{NgramCorpus, ProbabilityTable};
use crate::errors::{LangsiftError, Result};
use crate::types::{ModelConfig, VocabularyMode};
use crate::vocab;

/// One language class: a growing n-gram corpus during training, a frozen
/// probability table plus prior afterwards.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    language: String,
    config: ModelConfig,
    corpus: NgramCorpus,
    /// Total n-grams successfully inserted (not document count)
    class_size: u64,
    /// Documents assigned to this label during training
    doc_count: u64,
    /// Distinct first-depth keys, inflated by the Unicode alphabetic
    /// count in `UnicodeAlpha` mode. Set by `finalize`.
    vocab_size: usize,
    /// log10(doc_count / total_doc_count). Set by `finalize`.
    prior: f64,
    /// Smoothed log-probability of a zero-occurrence n-gram. Set by
    /// `finalize`.
    fallback: f64,
    table: Option<ProbabilityTable>,
}

impl LanguageModel {
    /// Create an untrained model for `language`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(language: impl Into<String>, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let corpus = NgramCorpus::new(config.order, config.mode)?;
        Ok(Self {
            language: language.into(),
            config,
            corpus,
            class_size: 0,
            doc_count: 0,
            vocab_size: 0,
            prior: 0.0,
            fallback: 0.0,
            table: None,
        })
    }

    /// The language identifier this model was built for
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Total n-grams successfully inserted during training
    pub fn class_size(&self) -> u64 {
        self.class_size
    }

    /// Documents assigned to this label during training
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Whether `finalize` has been called
    pub fn is_finalized(&self) -> bool {
        self.table.is_some()
    }

    /// Smoothing denominator vocabulary size (valid after `finalize`)
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Class prior (valid after `finalize`)
    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// Fallback log-probability for unresolvable test n-grams (valid
    /// after `finalize`)
    pub fn fallback_probability(&self) -> f64 {
        self.fallback
    }

    /// Read access to the underlying corpus (raw counts).
    pub fn corpus(&self) -> &NgramCorpus {
        &self.corpus
    }

    /// Feed one training document into the corpus.
    ///
    /// The document is decomposed into all contiguous length-`order`
    /// character windows (step 1; a document shorter than `order` yields
    /// zero n-grams). `class_size` grows by the number of successful
    /// insertions; the document count grows by 1 regardless.
    ///
    /// # Errors
    /// Returns `AlreadyFinalized` once `finalize` has been called; the
    /// model never re-trains after the scoring state is reached.
    pub fn observe(&mut self, text: &str) -> Result<()> {
        if self.is_finalized() {
            return Err(LangsiftError::already_finalized(&self.language));
        }
        let chars: Vec<char> = text.chars().collect();
        if chars.len() >= self.config.order {
            for window in chars.windows(self.config.order) {
                if self.corpus.insert(window) {
                    self.class_size += 1;
                }
            }
        }
        self.doc_count += 1;
        Ok(())
    }

    /// One-time transition from training to scoring state.
    ///
    /// Computes the vocabulary size (distinct first-depth keys, plus the
    /// fixed count of alphabetic Unicode code points in `UnicodeAlpha`
    /// mode, as an upper bound on unseen vocabulary mass), the class
    /// prior, the fallback probability, and a new immutable probability
    /// table in which every leaf count `c` becomes
    /// `log10((c + δ) / (class_size + vocab_size))`.
    ///
    /// The vocabulary size is first-depth cardinality only, independent of
    /// the n-gram order.
    ///
    /// # Errors
    /// Returns `AlreadyFinalized` on a second call.
    pub fn finalize(&mut self, total_doc_count: u64, delta: f64) -> Result<()> {
        if self.is_finalized() {
            return Err(LangsiftError::already_finalized(&self.language));
        }

        self.vocab_size = self.corpus.alphabet_len()
            + match self.config.mode {
                VocabularyMode::UnicodeAlpha => vocab::unicode_alphabetic_count(),
                _ => 0,
            };

        // Same floor convention as smoothed_log_prob: a class with zero
        // training documents keeps a finite (zero) prior so every test
        // document still receives a comparable score for it.
        self.prior = if self.doc_count == 0 || total_doc_count == 0 {
            0.0
        } else {
            (self.doc_count as f64 / total_doc_count as f64).log10()
        };

        let class_size = self.class_size;
        let vocab_size = self.vocab_size;
        self.fallback = smoothed_log_prob(0, delta, class_size, vocab_size);
        self.table = Some(
            self.corpus
                .to_probability_table(|c| smoothed_log_prob(c, delta, class_size, vocab_size)),
        );
        Ok(())
    }

    /// Log-domain Naive Bayes score of a document under this class.
    ///
    /// Starts from the prior; every length-`order` window is resolved
    /// against the frozen probability table without growth; a hit adds
    /// the leaf log-probability, a vocabulary rejection adds the fallback.
    /// The common normalizing constant cancels under comparison across
    /// classes and is omitted.
    ///
    /// # Errors
    /// Returns `NotFinalized` before `finalize` has been called.
    pub fn score(&self, text: &str) -> Result<f64> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| LangsiftError::not_finalized(&self.language))?;

        let mut total = self.prior;
        let chars: Vec<char> = text.chars().collect();
        if chars.len() >= self.config.order {
            for window in chars.windows(self.config.order) {
                // Only vocabulary rejections map to the fallback.
                total += match table.lookup(window) {
                    Ok(p) => p,
                    Err(e) if e.is_vocabulary_rejection() => self.fallback,
                    Err(e) => return Err(e),
                };
            }
        }
        Ok(total)
    }

    /// Smoothed log-probability of `ngram` after `finalize` (table leaf
    /// or `None` when the path does not resolve).
    pub fn probability(&self, ngram: &[char]) -> Option<f64> {
        self.table.as_ref()?.lookup(ngram).ok()
    }
}

/// `log10((count + δ) / (class_size + vocab_size))`, with a deliberate
/// floor: `count + δ == 0` yields `0.0` rather than a non-finite value.
/// The floor is applied identically across all classes so comparisons
/// remain valid.
fn smoothed_log_prob(count: u64, delta: f64, class_size: u64, vocab_size: usize) -> f64 {
    let numerator = count as f64 + delta;
    if numerator == 0.0 {
        return 0.0;
    }
    let denominator = class_size as f64 + vocab_size as f64;
    (numerator / denominator).log10()
}
