//! Training orchestration
//!
//! A [`TrainingSession`] owns one untrained [`LanguageModel`] per
//! configured language and routes training records to the right model by
//! label. [`TrainingSession::finish`] runs the post-pass: every model is
//! finalized with the global document count and the configured smoothing
//! delta, and the frozen set becomes a [`Classifier`].

use crate::classifier::Classifier;
use crate::errors::{LangsiftError, Result};
use crate::model::LanguageModel;
use crate::records::Record;
use crate::types::ModelConfig;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Accumulates training documents into per-language models.
#[derive(Debug)]
pub struct TrainingSession {
    models: Vec<LanguageModel>,
    by_language: FxHashMap<String, usize>,
    config: ModelConfig,
    total_documents: u64,
    skipped_documents: u64,
}

impl TrainingSession {
    /// Start a session over a fixed canonical language list.
    ///
    /// The supplied order becomes the canonical order of the resulting
    /// classifier.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the configuration does not validate,
    /// the language list is empty, or a language appears twice.
    pub fn new(languages: &[String], config: ModelConfig) -> Result<Self> {
        config.validate()?;
        if languages.is_empty() {
            return Err(LangsiftError::invalid_config(
                "at least one language is required",
            ));
        }

        let mut models = Vec::with_capacity(languages.len());
        let mut by_language = FxHashMap::default();
        for (i, language) in languages.iter().enumerate() {
            if by_language.insert(language.clone(), i).is_some() {
                return Err(LangsiftError::invalid_config(format!(
                    "duplicate language {language:?}"
                )));
            }
            models.push(LanguageModel::new(language, config)?);
        }

        Ok(Self {
            models,
            by_language,
            config,
            total_documents: 0,
            skipped_documents: 0,
        })
    }

    /// Documents routed into a model so far
    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Records skipped because their label is not configured
    pub fn skipped_documents(&self) -> u64 {
        self.skipped_documents
    }

    /// Route one training record into its language's model.
    ///
    /// A record whose label is not in the configured language list is
    /// skipped with a diagnostic and excluded from the document count.
    pub fn observe(&mut self, record: &Record) -> Result<()> {
        let Some(&index) = self.by_language.get(&record.language) else {
            warn!(
                language = %record.language,
                doc_id = %record.id,
                "skipping record with unconfigured language label"
            );
            self.skipped_documents += 1;
            return Ok(());
        };
        self.models[index].observe(&record.text)?;
        self.total_documents += 1;
        Ok(())
    }

    /// Route a batch of training records.
    pub fn observe_all(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.observe(record)?;
        }
        Ok(())
    }

    /// Finalize every model with the global document count and the
    /// configured smoothing delta, producing a classifier in canonical
    /// language order.
    pub fn finish(mut self) -> Result<Classifier> {
        debug!(
            documents = self.total_documents,
            skipped = self.skipped_documents,
            languages = self.models.len(),
            "finalizing training session"
        );
        for model in &mut self.models {
            model.finalize(self.total_documents, self.config.delta)?;
        }
        Classifier::new(self.models)
    }
}

/// Train a classifier from an in-memory batch of records in one call.
pub fn train_from_records(
    languages: &[String],
    config: ModelConfig,
    records: &[Record],
) -> Result<Classifier> {
    let mut session = TrainingSession::new(languages, config)?;
    session.observe_all(records)?;
    session.finish()
}
