//! Python language support
//!
//! Parsing goes through tree-sitter-python. Only the node kind the locator
//! searches for is exported here.

pub mod parser;

pub use parser::PythonParser;

/// Node kind tree-sitter-python uses for `def` and `async def`
pub const FUNCTION_DEFINITION: &str = "function_definition";
