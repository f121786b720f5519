//! Syntax tree adapter layer
//!
//! Wraps tree-sitter behind a small read-only node interface so the locator
//! and extractor never depend on a particular parser.

pub mod node;
pub mod parser;
pub mod python;
pub mod span;
pub mod tree_sitter_utils;

pub use node::SyntaxNode;
pub use parser::{Document, LanguageParser};
pub use python::{PythonParser, FUNCTION_DEFINITION};
pub use span::SourceSpan;
