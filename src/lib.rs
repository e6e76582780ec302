//! # langsift
//!
//! Character-n-gram multinomial Naive Bayes language identification for
//! short texts, with rank-based multi-class evaluation.
//!
//! ## Features
//!
//! - **Growing vocabulary**: fixed ASCII alphabets or a lazily-growing
//!   Unicode-alphabetic vocabulary, with the same-key-set invariant held
//!   by construction in a dense tensor layout
//! - **Additive smoothing**: base-10 log-probabilities with a configurable
//!   δ and a deliberate floor for the δ=0 zero-count singularity
//! - **Deterministic ranking**: stable score ordering with canonical-order
//!   tie-breaking, so the same models and document always rank identically
//! - **One-vs-rest evaluation**: per-class precision/recall/F1, macro-F1
//!   and weighted-F1 folded from ranked results

pub mod classifier;
pub mod corpus;
pub mod errors;
pub mod eval;
pub mod model;
pub mod records;
pub mod report;
pub mod session;
pub mod types;
pub mod vocab;

// Re-export commonly used types
pub use classifier::Classifier;
pub use corpus::{NgramCorpus, ProbabilityTable};
pub use errors::{LangsiftError, Result};
pub use eval::{ClassScore, EvalReport, Evaluator};
pub use model::LanguageModel;
pub use records::{parse_line, parse_lines, read_records, Record};
pub use report::{metrics_report, trace_report};
pub use session::{train_from_records, TrainingSession};
pub use types::{ModelConfig, Score, VocabularyMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
