//! funccraft core library - Python function extraction for name-prediction datasets
//!
//! Pipeline: source text -> syntax tree -> first function definition ->
//! name plus two canonical body variants, then an independent cross-check
//! of those fields against reference names and docstrings.

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Extraction is strictly per-row; rows never influence each other
// - No global mutable state (per-thread parser reuse only)
// - No randomness or clocks
// - Deterministic traversal order must be explicit
// - Malformed rows degrade to empty fields, they never abort a batch
// - Identical input yields byte-for-byte identical output

pub mod canonical;
pub mod config;
pub mod dataset;
pub mod extract;
pub mod language;
pub mod locate;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod validate;

pub use config::ResolvedConfig;
pub use dataset::{DatasetRow, DatasetStore, JsonlStore, ReferenceRecord};
pub use extract::{extract_function_info, Extraction, FunctionRecord};
pub use locate::find_first_function;
pub use pipeline::{prepare, prepare_with_progress, PrepareOptions};
pub use report::{render_json, render_text};
pub use validate::{check_extraction, ValidationOptions, ValidationReport};
