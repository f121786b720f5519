//! Extraction validator
//!
//! Cross-checks extractor output against reference fields using a cruder,
//! independent re-derivation. Nothing here calls into the extractor or the
//! canonicalization passes; reusing them would make the check agree with
//! itself by construction.
//!
//! Global invariants enforced:
//! - Counters accumulate in row order; the result is identical across runs
//! - Samples are the first N rows by input order, never more than N
//! - An empty batch reports zero percentages, never divides by zero

use crate::dataset::{DatasetRow, ReferenceRecord};
use crate::extract::FunctionRecord;
use serde::{Deserialize, Serialize};

/// Delimiter the naive docstring re-derivation splits on
const DOC_DELIMITER: &str = "\"\"\"";

/// Marker appended to truncated previews
const ELLIPSIS: &str = "...";

/// Knobs for [`check_extraction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Number of leading rows reported in detail
    pub samples: usize,
    /// Maximum characters shown per preview before truncation
    pub preview_chars: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            samples: 10,
            preview_chars: 200,
        }
    }
}

/// Comparison outcome for a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCheck {
    pub original_name: String,
    pub original_doc: String,
    pub extracted_doc: String,
    pub name_match: bool,
    pub doc_match: bool,
}

/// Detailed view of one of the first N rows, for human review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    /// 1-based position in the batch
    pub example: usize,
    pub original_name: String,
    pub extracted_name: String,
    pub name_match: bool,
    pub code_preview: String,
    pub original_doc_preview: String,
    pub extracted_doc_preview: String,
    pub doc_match: bool,
}

/// Aggregate agreement between extractor output and references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub name_matches: usize,
    pub doc_matches: usize,
    pub name_match_pct: f64,
    pub doc_match_pct: f64,
    pub samples: Vec<SampleReport>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

/// Last `.`-separated segment of a possibly qualified name
///
/// `"Outer.inner"` gives `"inner"`, an unqualified name is returned as is.
pub fn reference_name(qualified_name: &str) -> &str {
    qualified_name.rsplit('.').next().unwrap_or(qualified_name)
}

/// Naive docstring re-derivation from a body that still has its comments
///
/// Splits on `"""` and returns the trimmed text between the first two
/// delimiters; empty when the body contains no `"""`. Single-quoted
/// docstrings are deliberately not recognized.
pub fn naive_docstring(body_with_comments: &str) -> &str {
    body_with_comments
        .split(DOC_DELIMITER)
        .nth(1)
        .map(str::trim)
        .unwrap_or("")
}

/// Compare one row's extraction with its reference
pub fn check_row(reference: &ReferenceRecord, record: &FunctionRecord) -> RowCheck {
    let original_name = reference_name(&reference.qualified_name);
    let original_doc = reference.documentation.trim();
    let extracted_doc = naive_docstring(&record.body_with_comments);

    RowCheck {
        name_match: original_name == record.name,
        doc_match: original_doc == extracted_doc,
        original_name: original_name.to_string(),
        original_doc: original_doc.to_string(),
        extracted_doc: extracted_doc.to_string(),
    }
}

/// `count / total * 100`, or 0 for an empty batch
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// First `max_chars` characters of `text`, with `...` appended if cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Validate a prepared batch of dataset rows
pub fn check_extraction(rows: &[DatasetRow], options: &ValidationOptions) -> ValidationReport {
    check_records(rows.iter().map(|row| (&row.reference, &row.record)), options)
}

/// Validate (reference, extraction) pairs in order
///
/// Each detailed sample is also emitted as a `debug` event and the totals as
/// an `info` event; the returned report holds the same information.
pub fn check_records<'a, I>(pairs: I, options: &ValidationOptions) -> ValidationReport
where
    I: IntoIterator<Item = (&'a ReferenceRecord, &'a FunctionRecord)>,
{
    let mut total_rows = 0usize;
    let mut name_matches = 0usize;
    let mut doc_matches = 0usize;
    let mut samples = Vec::with_capacity(options.samples.min(64));

    for (index, (reference, record)) in pairs.into_iter().enumerate() {
        let check = check_row(reference, record);
        total_rows += 1;
        name_matches += usize::from(check.name_match);
        doc_matches += usize::from(check.doc_match);

        if index < options.samples {
            let sample = SampleReport {
                example: index + 1,
                original_name: check.original_name,
                extracted_name: record.name.clone(),
                name_match: check.name_match,
                code_preview: preview(&record.body_no_comments, options.preview_chars),
                original_doc_preview: preview(&check.original_doc, options.preview_chars),
                extracted_doc_preview: preview(&check.extracted_doc, options.preview_chars),
                doc_match: check.doc_match,
            };
            tracing::debug!(
                example = sample.example,
                original_name = %sample.original_name,
                extracted_name = %sample.extracted_name,
                name_match = sample.name_match,
                doc_match = sample.doc_match,
                "extraction sample"
            );
            samples.push(sample);
        }
    }

    let report = ValidationReport {
        total_rows,
        name_matches,
        doc_matches,
        name_match_pct: percentage(name_matches, total_rows),
        doc_match_pct: percentage(doc_matches, total_rows),
        samples,
    };

    if report.is_empty() {
        tracing::info!("extraction check: no rows");
    } else {
        tracing::info!(
            total = report.total_rows,
            name_matches = report.name_matches,
            name_match_pct = %format!("{:.2}", report.name_match_pct),
            doc_matches = report.doc_matches,
            doc_match_pct = %format!("{:.2}", report.doc_match_pct),
            "extraction check"
        );
    }

    report
}
