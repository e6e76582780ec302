//! Evaluation report formatting
//!
//! Produces the two textual outputs of a run: the per-document trace
//! (winning language, score, correctness, overall accuracy) and the
//! metrics summary (accuracy, tab-separated per-class precision/recall/F1
//! rows in canonical order, then macro-F1 and weighted-F1). Writing the
//! strings to durable storage is the caller's concern.

use crate::eval::EvalReport;
use crate::types::Score;
use std::fmt::Write;

/// Per-document trace: one line per test document with the winning
/// (language, score) pair and whether it was correct, followed by the
/// overall accuracy.
pub fn trace_report(results: &[Vec<Score>], accuracy: f64) -> String {
    let mut out = String::new();
    for ranked in results {
        let Some(winner) = ranked.first() else {
            continue;
        };
        let verdict = if winner.is_correct { "correct" } else { "wrong" };
        let _ = writeln!(
            out,
            "{}\t{}\t{:.6}\t{}",
            winner.doc_id, winner.predicted, winner.score, verdict
        );
    }
    let _ = write!(out, "\nAccuracy: {accuracy}");
    out
}

/// Metrics summary: accuracy, then three tab-separated rows (precision,
/// recall, F1) ordered by the canonical language list, then macro-F1 and
/// weighted-F1 tab-separated.
pub fn metrics_report(report: &EvalReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.accuracy);

    for row in [
        |c: &crate::eval::ClassScore| c.precision,
        |c: &crate::eval::ClassScore| c.recall,
        |c: &crate::eval::ClassScore| c.f1,
    ] {
        let line: Vec<String> = report
            .classes
            .iter()
            .map(|(_, class)| row(class).to_string())
            .collect();
        let _ = writeln!(out, "{}", line.join("\t"));
    }

    let _ = writeln!(out, "{}\t{}", report.macro_f1, report.weighted_f1);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Evaluator;

    fn ranked(doc_id: &str, actual: &str, ordered: &[(&str, f64)]) -> Vec<Score> {
        ordered
            .iter()
            .map(|&(lang, score)| Score::new(doc_id, score, lang, actual))
            .collect()
    }

    #[test]
    fn test_trace_report_format() {
        let results = vec![
            ranked("1", "en", &[("en", -3.5), ("es", -4.0)]),
            ranked("2", "es", &[("en", -2.0), ("es", -2.5)]),
        ];
        let trace = trace_report(&results, 0.5);

        let lines: Vec<&str> = trace.lines().collect();
        assert_eq!(lines[0], "1\ten\t-3.500000\tcorrect");
        assert_eq!(lines[1], "2\ten\t-2.000000\twrong");
        assert!(trace.ends_with("Accuracy: 0.5"));
    }

    #[test]
    fn test_metrics_report_format() {
        let canonical = vec!["en".to_string(), "es".to_string()];
        let mut eval = Evaluator::new(&canonical);
        eval.fold(&ranked("1", "en", &[("en", -1.0), ("es", -2.0)]));
        eval.fold(&ranked("2", "es", &[("es", -1.0), ("en", -2.0)]));
        let report = eval.finalize();

        let text = metrics_report(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1");
        // precision, recall, f1 rows: one tab-separated column per
        // canonical language.
        assert_eq!(lines[1], "1\t1");
        assert_eq!(lines[2], "1\t1");
        assert_eq!(lines[3], "1\t1");
        assert_eq!(lines[4], "1\t1");
    }

    #[test]
    fn test_trace_report_empty() {
        let trace = trace_report(&[], 0.0);
        assert_eq!(trace, "\nAccuracy: 0");
    }
}
