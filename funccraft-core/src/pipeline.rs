//! Batch preparation - ties together parsing, locating, and extraction
//!
//! Rows are independent: each one is parsed, searched, and extracted on its
//! own, so the batch is processed in parallel. Output order always equals
//! input order.

use crate::dataset::DatasetRow;
use crate::extract::{extract_with, FunctionRecord};
use crate::language::{LanguageParser, PythonParser};
use rayon::prelude::*;

/// Options for [`prepare`]
#[derive(Debug, Clone, Default)]
pub struct PrepareOptions {
    /// Keep only the first N rows
    pub limit: Option<usize>,
}

/// Extract the first function of a single source text into output fields
///
/// A parser failure is logged and yields an empty record, so the caller's
/// batch keeps going.
pub fn extract_row_record<P: LanguageParser + ?Sized>(
    parser: &P,
    index: usize,
    source: &str,
) -> FunctionRecord {
    match extract_with(parser, source) {
        Ok(extraction) => {
            tracing::debug!(row = index, outcome = extraction.outcome(), "extracted row");
            extraction.into_record()
        }
        Err(e) => {
            tracing::warn!(row = index, error = %format!("{:#}", e), "skipping row: parser failed");
            FunctionRecord::default()
        }
    }
}

/// Fill `extracted_name`, `body_no_comments`, and `body_with_comments` on every row
pub fn prepare(rows: Vec<DatasetRow>, options: &PrepareOptions) -> Vec<DatasetRow> {
    prepare_with_progress(rows, options, || {})
}

/// Same as [`prepare`], calling `on_row` once per finished row
///
/// `on_row` may be called from several worker threads at once.
pub fn prepare_with_progress<F>(
    mut rows: Vec<DatasetRow>,
    options: &PrepareOptions,
    on_row: F,
) -> Vec<DatasetRow>
where
    F: Fn() + Sync + Send,
{
    if let Some(limit) = options.limit {
        rows.truncate(limit);
    }
    tracing::info!(rows = rows.len(), "parsing functions");

    let parser = PythonParser;
    rows.into_par_iter()
        .enumerate()
        .map(|(index, mut row)| {
            row.record = extract_row_record(&parser, index, &row.whole_func_string);
            on_row();
            row
        })
        .collect()
}
