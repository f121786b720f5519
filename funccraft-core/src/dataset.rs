//! Dataset rows and their storage
//!
//! Corpus retrieval happens elsewhere; this module only defines the row
//! contract and an opaque path-keyed store. Rows are JSON objects, one per
//! line. Columns this crate does not know about are carried through
//! untouched.

use crate::extract::FunctionRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Externally supplied ground truth for one row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Possibly qualified reference name, e.g. `Outer.inner`
    #[serde(rename = "func_name", default)]
    pub qualified_name: String,
    /// Verbatim reference docstring, possibly empty
    #[serde(rename = "func_documentation_string", default)]
    pub documentation: String,
}

/// One corpus row, before or after extraction
///
/// Before extraction the `record` fields default to empty strings; after
/// extraction they are always present in serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    /// Raw source text of the function
    pub whole_func_string: String,
    #[serde(flatten)]
    pub reference: ReferenceRecord,
    #[serde(flatten)]
    pub record: FunctionRecord,
    /// Every other column, preserved verbatim in key order
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DatasetRow {
    /// Row carrying only source text and reference fields
    pub fn new(
        whole_func_string: impl Into<String>,
        qualified_name: impl Into<String>,
        documentation: impl Into<String>,
    ) -> Self {
        DatasetRow {
            whole_func_string: whole_func_string.into(),
            reference: ReferenceRecord {
                qualified_name: qualified_name.into(),
                documentation: documentation.into(),
            },
            ..DatasetRow::default()
        }
    }
}

/// Opaque load/save keyed by a path
pub trait DatasetStore {
    fn load(&self, path: &Path) -> Result<Vec<DatasetRow>>;
    fn save(&self, rows: &[DatasetRow], path: &Path) -> Result<()>;
}

/// JSON Lines store: one row object per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlStore;

impl DatasetStore for JsonlStore {
    fn load(&self, path: &Path) -> Result<Vec<DatasetRow>> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open dataset: {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| {
                format!("failed to read line {} of {}", index + 1, path.display())
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let row: DatasetRow = serde_json::from_str(&line).with_context(|| {
                format!("failed to parse row at line {} of {}", index + 1, path.display())
            })?;
            rows.push(row);
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "loaded dataset");
        Ok(rows)
    }

    fn save(&self, rows: &[DatasetRow], path: &Path) -> Result<()> {
        atomic_write_lines(path, rows)?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "saved dataset");
        Ok(())
    }
}

/// Write one JSON value per line to `path` via temp file + rename
pub fn atomic_write_lines<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    use std::fs;

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }

    // Create temp file in same directory
    let temp_path = path.with_extension("tmp");

    let file = fs::File::create(&temp_path)
        .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
    let mut writer = BufWriter::new(file);
    for item in items {
        serde_json::to_writer(&mut writer, item)
            .with_context(|| format!("failed to serialize row to: {}", temp_path.display()))?;
        writer
            .write_all(b"\n")
            .with_context(|| format!("failed to write to temp file: {}", temp_path.display()))?;
    }
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("failed to flush temp file: {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync temp file: {}", temp_path.display()))?;
    drop(file);

    // Atomic rename
    fs::rename(&temp_path, path)
        .with_context(|| format!("failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
