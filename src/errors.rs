//! Error types for langsift
//!
//! This module defines the error types used throughout the library.
//! Vocabulary rejections are recoverable and handled locally (skipped
//! during training, replaced by the fallback probability during scoring);
//! everything else is surfaced to the caller as a typed result.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LangsiftError>;

/// Main error type for langsift
#[derive(Error, Debug, Clone)]
pub enum LangsiftError {
    /// An n-gram contains a character the vocabulary cannot or will not admit
    #[error("Character {ch:?} is not in the vocabulary")]
    NotInVocabulary { ch: char },

    /// A training/test line lacks the required tab-separated fields
    #[error("Malformed record: {line:?}")]
    MalformedRecord { line: String },

    /// Training or test source unavailable (fatal to the run)
    #[error("Missing input resource {path}: {message}")]
    MissingInput { path: String, message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// `score` was called before the model was finalized
    #[error("Model {language:?} has not been finalized; call finalize() after training")]
    NotFinalized { language: String },

    /// `observe` or `finalize` was called after the model was finalized
    #[error("Model {language:?} is already finalized")]
    AlreadyFinalized { language: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl LangsiftError {
    /// Create a not-in-vocabulary error
    pub fn not_in_vocabulary(ch: char) -> Self {
        Self::NotInVocabulary { ch }
    }

    /// Create a malformed record error
    pub fn malformed_record(line: impl Into<String>) -> Self {
        Self::MalformedRecord { line: line.into() }
    }

    /// Create a missing input error
    pub fn missing_input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a not-finalized error
    pub fn not_finalized(language: impl Into<String>) -> Self {
        Self::NotFinalized {
            language: language.into(),
        }
    }

    /// Create an already-finalized error
    pub fn already_finalized(language: impl Into<String>) -> Self {
        Self::AlreadyFinalized {
            language: language.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error is a recoverable vocabulary rejection
    /// (skipped during training, fallback probability during scoring)
    pub fn is_vocabulary_rejection(&self) -> bool {
        matches!(self, Self::NotInVocabulary { .. })
    }
}

impl From<serde_json::Error> for LangsiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
