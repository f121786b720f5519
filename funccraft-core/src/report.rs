//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::extract::{Extraction, FunctionRecord};
use crate::validate::{SampleReport, ValidationReport};
use serde::Serialize;

const SEPARATOR_WIDTH: usize = 50;

/// Render a validation report as the human-readable listing
pub fn render_text(report: &ValidationReport) -> String {
    let mut output = String::new();

    for sample in &report.samples {
        push_sample(&mut output, sample);
    }

    output.push_str("\nOverall dataset statistics:\n");
    if report.is_empty() {
        output.push_str("  no rows\n");
        return output;
    }
    output.push_str(&format!("  Total examples:        {}\n", report.total_rows));
    output.push_str(&format!(
        "  Name matches:          {} ({:.2}%)\n",
        report.name_matches, report.name_match_pct
    ));
    output.push_str(&format!(
        "  Documentation matches: {} ({:.2}%)\n",
        report.doc_matches, report.doc_match_pct
    ));

    output
}

fn push_sample(output: &mut String, sample: &SampleReport) {
    output.push_str(&format!("Example {}:\n", sample.example));
    output.push_str(&format!("  Original name:   {}\n", sample.original_name));
    output.push_str(&format!("  Extracted name:  {}\n", sample.extracted_name));
    output.push_str(&format!("  Name match:      {}\n", sample.name_match));
    output.push_str(&format!("  Code without comms: {}\n", sample.code_preview));
    output.push_str(&format!("  Original doc:    {}\n", sample.original_doc_preview));
    output.push_str(&format!("  Extracted doc:   {}\n", sample.extracted_doc_preview));
    output.push_str(&format!("  Doc match:       {}\n", sample.doc_match));
    output.push_str(&"-".repeat(SEPARATOR_WIDTH));
    output.push('\n');
}

/// Render a validation report as JSON output
pub fn render_json(report: &ValidationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct ExtractionJson<'a> {
    outcome: &'static str,
    #[serde(flatten)]
    record: &'a FunctionRecord,
}

/// Render a single extraction for the `extract` command
pub fn render_extraction_text(extraction: &Extraction) -> String {
    let record = extraction.clone().into_record();
    let mut output = String::new();
    output.push_str(&format!("Outcome: {}\n", extraction.outcome()));
    output.push_str(&format!("Name:    {}\n", record.name));
    output.push_str("\nBody with comments:\n");
    output.push_str(&record.body_with_comments);
    output.push_str("\n\nBody without comments:\n");
    output.push_str(&record.body_no_comments);
    output.push('\n');
    output
}

/// Render a single extraction as JSON, including its outcome label
pub fn render_extraction_json(extraction: &Extraction) -> String {
    let record = extraction.clone().into_record();
    let json = ExtractionJson {
        outcome: extraction.outcome(),
        record: &record,
    };
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
}
