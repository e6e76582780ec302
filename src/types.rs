//! Core types for langsift
//!
//! This module defines the configuration and small shared value types:
//! vocabulary modes, model configuration, and per-document score records.

use crate::errors::{LangsiftError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Vocabulary mode
// ============================================================================

/// Which characters are legal n-gram constituents, and whether the
/// vocabulary may grow at runtime.
///
/// Immutable per run. `Lower` and `LowerUpper` use a fixed seed alphabet;
/// `UnicodeAlpha` starts empty and admits any alphabetic code point lazily
/// during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyMode {
    /// ASCII lowercase letters a-z only
    #[default]
    Lower,
    /// ASCII letters a-z and A-Z
    LowerUpper,
    /// Any Unicode code point for which `char::is_alphabetic` holds;
    /// the vocabulary grows lazily as new letters are observed
    UnicodeAlpha,
}

impl VocabularyMode {
    /// Returns `true` when the vocabulary may grow during training.
    pub fn allows_growth(self) -> bool {
        matches!(self, VocabularyMode::UnicodeAlpha)
    }
}

impl TryFrom<u8> for VocabularyMode {
    type Error = LangsiftError;

    /// Parse the conventional CLI encoding: 0, 1 or 2.
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(VocabularyMode::Lower),
            1 => Ok(VocabularyMode::LowerUpper),
            2 => Ok(VocabularyMode::UnicodeAlpha),
            other => Err(LangsiftError::invalid_config(format!(
                "vocabulary mode must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl std::str::FromStr for VocabularyMode {
    type Err = LangsiftError;

    fn from_str(value: &str) -> Result<Self> {
        let n: u8 = value
            .parse()
            .map_err(|_| LangsiftError::invalid_config(format!("invalid vocabulary mode {value:?}")))?;
        VocabularyMode::try_from(n)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a language-model training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Vocabulary mode (character admission policy)
    pub mode: VocabularyMode,
    /// n-gram order: 1, 2 or 3
    pub order: usize,
    /// Additive smoothing constant δ (>= 0)
    pub delta: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            mode: VocabularyMode::Lower,
            order: 2,
            delta: 0.5,
        }
    }
}

impl ModelConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.order) {
            return Err(LangsiftError::invalid_config(format!(
                "n-gram order must be 1, 2 or 3, got {}",
                self.order
            )));
        }

        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(LangsiftError::invalid_config(format!(
                "smoothing delta must be a non-negative finite number, got {}",
                self.delta
            )));
        }

        Ok(())
    }

    /// Builder method: set vocabulary mode
    pub fn with_mode(mut self, mode: VocabularyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: set n-gram order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Builder method: set smoothing delta
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }
}

// ============================================================================
// Score
// ============================================================================

/// One (document, language) scoring outcome.
///
/// Created during testing, never mutated after creation. A ranked result
/// is a `Vec<Score>` sorted by `score` descending; its first element is
/// the classifier's prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Document identifier from the test record
    pub doc_id: String,
    /// Log-domain Naive Bayes score
    pub score: f64,
    /// The language whose model produced this score
    pub predicted: String,
    /// The document's true label
    pub actual: String,
    /// `predicted == actual`
    pub is_correct: bool,
}

impl Score {
    /// Create a new score record; correctness is derived from the labels.
    pub fn new(
        doc_id: impl Into<String>,
        score: f64,
        predicted: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let predicted = predicted.into();
        let actual = actual.into();
        let is_correct = predicted == actual;
        Self {
            doc_id: doc_id.into(),
            score,
            predicted,
            actual,
            is_correct,
        }
    }
}
