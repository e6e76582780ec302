//! Rank-based multi-class evaluation
//!
//! The [`Evaluator`] folds one ranked result at a time into one-vs-rest
//! confusion counters, then finalizes into an [`EvalReport`] with
//! accuracy, per-class precision/recall/F1, macro-F1 and weighted-F1.
//! Finalization consumes the evaluator, so the accumulating → finalized
//! transition is terminal by construction.

use crate::errors::Result;
use crate::types::Score;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// ClassScore
// ============================================================================

/// Per-language confusion accumulator and derived metrics.
///
/// Counters are mutated while folding ranked results; the derived
/// precision/recall/F1 fields are filled in exactly once at finalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    /// Rank-0 prediction, correct
    pub true_positive: u64,
    /// Rank-0 prediction, wrong
    pub false_positive: u64,
    /// Lower-rank entry for the document's true label
    pub false_negative: u64,
    /// Lower-rank entry for some other label
    pub true_negative: u64,
    /// Test documents actually labeled with this language
    pub occurrences: u64,
    /// TP / (TP + FP), 0 when both are 0
    pub precision: f64,
    /// TP / (TP + FN), 0 when both are 0
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0 when both are 0
    pub f1: f64,
}

impl ClassScore {
    fn derive_metrics(&mut self) {
        if self.true_positive != 0 || self.false_positive != 0 {
            self.precision =
                self.true_positive as f64 / (self.true_positive + self.false_positive) as f64;
        }
        if self.true_positive != 0 || self.false_negative != 0 {
            self.recall =
                self.true_positive as f64 / (self.true_positive + self.false_negative) as f64;
        }
        if self.precision != 0.0 || self.recall != 0.0 {
            self.f1 = 2.0 * (self.precision * self.recall) / (self.precision + self.recall);
        }
    }

    /// Sum of all four confusion counters (one per folded document that
    /// carried this language in its ranked list).
    pub fn confusion_total(&self) -> u64 {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Accumulates one-vs-rest confusion statistics across ranked results.
#[derive(Debug, Clone)]
pub struct Evaluator {
    canonical: Vec<String>,
    classes: FxHashMap<String, ClassScore>,
    total_documents: u64,
    correct_documents: u64,
}

impl Evaluator {
    /// Start an evaluation over the canonical language list. Every listed
    /// language gets a confusion accumulator up front, so a test label
    /// that never appears as a prediction still accrues occurrences.
    pub fn new(canonical_languages: &[String]) -> Self {
        let classes = canonical_languages
            .iter()
            .map(|lang| (lang.clone(), ClassScore::default()))
            .collect();
        Self {
            canonical: canonical_languages.to_vec(),
            classes,
            total_documents: 0,
            correct_documents: 0,
        }
    }

    /// Documents folded so far
    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Fold one ranked result (sorted descending; rank 0 is the
    /// prediction) into the confusion counters.
    ///
    /// For every entry, `predicted` means "this entry is rank 0" and
    /// `actual` means "this entry's language is the true label":
    /// predicted ∧ actual → TP, predicted ∧ ¬actual → FP,
    /// ¬predicted ∧ actual → FN, ¬predicted ∧ ¬actual → TN.
    pub fn fold(&mut self, ranked: &[Score]) {
        let Some(top) = ranked.first() else {
            return;
        };

        self.total_documents += 1;
        if top.is_correct {
            self.correct_documents += 1;
        }

        match self.classes.get_mut(&top.actual) {
            Some(class) => class.occurrences += 1,
            None => debug!(language = %top.actual, "test label not in canonical list"),
        }

        for (rank, score) in ranked.iter().enumerate() {
            let Some(class) = self.classes.get_mut(&score.predicted) else {
                continue;
            };
            match (rank == 0, score.is_correct) {
                (true, true) => class.true_positive += 1,
                (true, false) => class.false_positive += 1,
                (false, true) => class.false_negative += 1,
                (false, false) => class.true_negative += 1,
            }
        }
    }

    /// Terminal transition: derive all metrics and produce the report.
    /// Consumes the evaluator; there is no un-finalize.
    pub fn finalize(mut self) -> EvalReport {
        for class in self.classes.values_mut() {
            class.derive_metrics();
        }

        let accuracy = if self.total_documents == 0 {
            0.0
        } else {
            self.correct_documents as f64 / self.total_documents as f64
        };

        let occurring: Vec<&ClassScore> = self
            .classes
            .values()
            .filter(|c| c.occurrences > 0)
            .collect();
        let macro_f1 = if occurring.is_empty() {
            0.0
        } else {
            occurring.iter().map(|c| c.f1).sum::<f64>() / occurring.len() as f64
        };

        let weighted_f1 = if self.total_documents == 0 {
            0.0
        } else {
            self.classes
                .values()
                .map(|c| c.f1 * c.occurrences as f64)
                .sum::<f64>()
                / self.total_documents as f64
        };

        let classes = self
            .canonical
            .iter()
            .map(|lang| {
                let class = self.classes.remove(lang).unwrap_or_default();
                (lang.clone(), class)
            })
            .collect();

        EvalReport {
            accuracy,
            macro_f1,
            weighted_f1,
            total_documents: self.total_documents,
            classes,
        }
    }
}

// ============================================================================
// EvalReport
// ============================================================================

/// Final read-only metrics for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Correct rank-0 predictions / total documents
    pub accuracy: f64,
    /// Unweighted mean of per-class F1 over languages with occurrences
    pub macro_f1: f64,
    /// Per-class F1 weighted by true test frequency
    pub weighted_f1: f64,
    /// Total test documents folded
    pub total_documents: u64,
    /// Per-class metrics in canonical language order
    pub classes: Vec<(String, ClassScore)>,
}

impl EvalReport {
    /// Per-class metrics for one language, if present in the canonical list.
    pub fn class(&self, language: &str) -> Option<&ClassScore> {
        self.classes
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, class)| class)
    }

    /// Serialize the report as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
