//! Tab-separated training/test record parsing
//!
//! One record per line: document id, author id, language label, raw text,
//! tab-separated. A line that cannot be split into at least four fields is
//! a `MalformedRecord`; batch parsers skip it with a diagnostic so it is
//! excluded from both training and evaluation counts. An unreadable input
//! file is `MissingInput` and fatal to the run.

use crate::errors::{LangsiftError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// One training or test document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Document identifier
    pub id: String,
    /// Author identifier (carried through, not used by the models)
    pub author: String,
    /// Language label
    pub language: String,
    /// Raw document text
    pub text: String,
}

impl Record {
    /// Build a record from its four fields.
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Parse one tab-separated line into a [`Record`].
///
/// Only the first three tabs delimit fields; the text may itself contain
/// tabs.
pub fn parse_line(line: &str) -> Result<Record> {
    let mut fields = line.splitn(4, '\t');
    match (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) {
        (Some(id), Some(author), Some(language), Some(text)) => {
            Ok(Record::new(id, author, language, text))
        }
        _ => Err(LangsiftError::malformed_record(line)),
    }
}

/// Parse a batch of lines, skipping malformed ones with a diagnostic.
///
/// Blank lines are ignored silently.
pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Record> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_line(line) {
            Ok(record) => Some(record),
            Err(_) => {
                warn!(line, "skipping malformed record");
                None
            }
        })
        .collect()
}

/// Read and parse a record file.
///
/// # Errors
/// Returns `MissingInput` when the file cannot be read; this is fatal and
/// must abort before any model state is produced.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| LangsiftError::missing_input(path.display().to_string(), e.to_string()))?;
    Ok(parse_lines(contents.lines()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_basic() {
        let record = parse_line("123\tuser\ten\thello world").unwrap();
        assert_eq!(record.id, "123");
        assert_eq!(record.author, "user");
        assert_eq!(record.language, "en");
        assert_eq!(record.text, "hello world");
    }

    #[test]
    fn test_parse_line_text_keeps_tabs() {
        let record = parse_line("1\tu\tes\thola\tmundo").unwrap();
        assert_eq!(record.text, "hola\tmundo");
    }

    #[test]
    fn test_parse_line_malformed() {
        let err = parse_line("only\ttwo").unwrap_err();
        assert!(matches!(err, LangsiftError::MalformedRecord { .. }));
        assert!(parse_line("").is_err());
        assert!(parse_line("1\tu\ten").is_err());
    }

    #[test]
    fn test_parse_lines_skips_malformed_and_blank() {
        let records = parse_lines([
            "1\tu\ten\tthe cat",
            "broken line",
            "",
            "   ",
            "2\tu\tes\tel gato",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].id, "2");
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records("/nonexistent/corpus.txt").unwrap_err();
        assert!(matches!(err, LangsiftError::MissingInput { .. }));
    }

    #[test]
    fn test_read_records_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join("langsift_records_test.txt");
        std::fs::write(&path, "1\tu\ten\tthe cat\n2\tv\tes\tel gato\n").unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].language, "es");

        std::fs::remove_file(&path).ok();
    }
}
