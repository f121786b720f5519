//! Function extraction: name plus two canonical body variants
//!
//! Global invariants enforced:
//! - The name is the exact byte span of the `name` field, never normalized
//! - `body_no_comments` is never longer than `body_with_comments`
//! - No missing field, missing body, or missing function is ever an error

use crate::canonical;
use crate::language::{Document, LanguageParser, PythonParser, SyntaxNode};
use crate::locate::find_first_function;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Per-row extraction result in its output shape
///
/// All three fields are empty together only when no function was found (or
/// the function had no usable name). A non-empty name with empty bodies
/// means the function had no resolvable body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRecord {
    #[serde(rename = "extracted_name", default)]
    pub name: String,
    #[serde(default)]
    pub body_with_comments: String,
    #[serde(default)]
    pub body_no_comments: String,
}

/// How far extraction got before it had to stop
///
/// Output rows collapse every variant to a [`FunctionRecord`] with empty
/// strings for whatever is missing; this type keeps the distinction for
/// callers (and logs) that care why a field is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// No function definition anywhere in the tree
    NotFound,
    /// A function definition without a resolvable `name` field
    MissingName,
    /// Name resolved, but no resolvable `body` field
    MissingBody { name: String },
    /// Name and body resolved
    Found(FunctionRecord),
}

impl Extraction {
    /// Collapse to the output row shape
    pub fn into_record(self) -> FunctionRecord {
        match self {
            Extraction::NotFound | Extraction::MissingName => FunctionRecord::default(),
            Extraction::MissingBody { name } => FunctionRecord {
                name,
                ..FunctionRecord::default()
            },
            Extraction::Found(record) => record,
        }
    }

    /// Short label for logs and CLI output
    pub fn outcome(&self) -> &'static str {
        match self {
            Extraction::NotFound => "not_found",
            Extraction::MissingName => "missing_name",
            Extraction::MissingBody { .. } => "missing_body",
            Extraction::Found(_) => "found",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }
}

/// Derive name and bodies from an already located function node
///
/// `function` is `None` when the locator found nothing.
pub fn extract_from_node<N: SyntaxNode>(source: &str, function: Option<N>) -> Extraction {
    let Some(function) = function else {
        return Extraction::NotFound;
    };

    let Some(name) = function
        .child_by_field("name")
        .and_then(|node| node.span().slice(source))
    else {
        return Extraction::MissingName;
    };
    let name = name.to_string();

    let Some(raw_body) = function
        .child_by_field("body")
        .and_then(|node| node.span().slice(source))
    else {
        return Extraction::MissingBody { name };
    };

    Extraction::Found(FunctionRecord {
        name,
        body_with_comments: raw_body.trim().to_string(),
        body_no_comments: canonical::body_without_comments(raw_body),
    })
}

/// Locate and extract the first function of a parsed document
pub fn extract_document(doc: &Document) -> Extraction {
    extract_from_node(doc.source(), find_first_function(doc.root()))
}

/// Parse `source` with `parser`, then locate and extract
///
/// The only error is the parser itself failing to run.
pub fn extract_with<P: LanguageParser + ?Sized>(parser: &P, source: &str) -> Result<Extraction> {
    let doc = parser.parse(source)?;
    Ok(extract_document(&doc))
}

/// Parse Python source, then locate and extract its first function
pub fn extract_function_info(source: &str) -> Result<Extraction> {
    extract_with(&PythonParser, source)
}
