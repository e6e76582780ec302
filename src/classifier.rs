//! Multi-class ranking over finalized language models
//!
//! The classifier owns one finalized [`LanguageModel`] per language, in a
//! fixed canonical order, and ranks all languages for a document by
//! log-score descending. Scoring only reads frozen state, so batches of
//! documents are scored in parallel.

use crate::errors::{LangsiftError, Result};
use crate::eval::{EvalReport, Evaluator};
use crate::model::LanguageModel;
use crate::records::Record;
use crate::types::Score;
use rayon::prelude::*;

/// Ranks every configured language for a document by Naive Bayes
/// log-score, descending.
#[derive(Debug, Clone)]
pub struct Classifier {
    models: Vec<LanguageModel>,
}

impl Classifier {
    /// Build a classifier from finalized models.
    ///
    /// The model ordering is the canonical language order: ties in `rank`
    /// are broken by it, so callers must supply a fixed order for
    /// reproducible output.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for an empty model list and `NotFinalized`
    /// if any model has not been finalized.
    pub fn new(models: Vec<LanguageModel>) -> Result<Self> {
        if models.is_empty() {
            return Err(LangsiftError::invalid_config(
                "at least one language model is required",
            ));
        }
        if let Some(m) = models.iter().find(|m| !m.is_finalized()) {
            return Err(LangsiftError::not_finalized(m.language()));
        }
        Ok(Self { models })
    }

    /// The canonical language order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.language())
    }

    /// Read access to the underlying models.
    pub fn models(&self) -> &[LanguageModel] {
        &self.models
    }

    /// Score `text` under every model and return the scores sorted by
    /// value descending. Ties keep the canonical model order (stable
    /// sort). The first element is the prediction.
    pub fn rank(&self, doc_id: &str, text: &str, actual: &str) -> Result<Vec<Score>> {
        let mut scores = Vec::with_capacity(self.models.len());
        for model in &self.models {
            let value = model.score(text)?;
            scores.push(Score::new(doc_id, value, model.language(), actual));
        }
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scores)
    }

    /// The single best language for `text`, with its score.
    pub fn classify(&self, text: &str) -> Result<Option<(String, f64)>> {
        let ranked = self.rank("", text, "")?;
        Ok(ranked
            .into_iter()
            .next()
            .map(|s| (s.predicted, s.score)))
    }

    /// Rank every test record in parallel and fold the results into an
    /// evaluation over `canonical_languages`.
    ///
    /// Scoring is read-only against finalized models, so records are
    /// processed with rayon; the output preserves record order, making
    /// the run deterministic.
    pub fn evaluate(
        &self,
        records: &[Record],
        canonical_languages: &[String],
    ) -> Result<(Vec<Vec<Score>>, EvalReport)> {
        let results: Vec<Vec<Score>> = records
            .par_iter()
            .map(|r| self.rank(&r.id, &r.text, &r.language))
            .collect::<Result<_>>()?;

        let mut evaluator = Evaluator::new(canonical_languages);
        for ranked in &results {
            evaluator.fold(ranked);
        }
        Ok((results, evaluator.finalize()))
    }
}
