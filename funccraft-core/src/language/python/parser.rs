//! Python language parser using tree-sitter

use crate::language::parser::{Document, LanguageParser};
use crate::language::tree_sitter_utils::with_python_parser;
use anyhow::{Context, Result};

/// Python parser using tree-sitter
pub struct PythonParser;

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        // Just validate that the grammar loads on this thread
        with_python_parser(|_| ()).context("Failed to create Python parser")?;
        Ok(PythonParser)
    }
}

impl LanguageParser for PythonParser {
    fn parse(&self, source: &str) -> Result<Document> {
        let tree = with_python_parser(|parser| parser.parse(source, None))?
            .context("tree-sitter returned no tree for Python source")?;

        Ok(Document::new(source.to_string(), tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{SyntaxNode, FUNCTION_DEFINITION};

    fn top_level_kinds(doc: &Document) -> Vec<String> {
        SyntaxNode::children(&doc.root())
            .iter()
            .map(|n| n.kind().to_string())
            .collect()
    }

    #[test]
    fn test_create_parser() {
        let parser = PythonParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_parse_simple_function() {
        let parser = PythonParser::new().unwrap();
        let source = r#"
def simple_function(x):
    return x + 1
"#;
        let doc = parser.parse(source).unwrap();
        assert_eq!(top_level_kinds(&doc), vec![FUNCTION_DEFINITION]);
    }

    #[test]
    fn test_parse_async_function() {
        let parser = PythonParser::new().unwrap();
        let source = r#"
async def async_function():
    return await something()
"#;
        let doc = parser.parse(source).unwrap();
        assert_eq!(top_level_kinds(&doc), vec![FUNCTION_DEFINITION]);
    }

    #[test]
    fn test_parse_class_is_not_a_function() {
        let parser = PythonParser::new().unwrap();
        let source = r#"
class MyClass:
    def method_one(self, x):
        return x + 1
"#;
        let doc = parser.parse(source).unwrap();
        assert_eq!(top_level_kinds(&doc), vec!["class_definition"]);
    }

    #[test]
    fn test_parse_empty_source() {
        let parser = PythonParser::new().unwrap();
        let doc = parser.parse("").unwrap();
        assert_eq!(doc.root().kind(), "module");
        assert!(top_level_kinds(&doc).is_empty());
    }

    #[test]
    fn test_parse_syntax_error_tolerant() {
        let parser = PythonParser::new().unwrap();
        // Python with syntax error (incomplete function)
        let source = "def broken(x)";
        // tree-sitter is error-tolerant, so parsing should still succeed
        let result = parser.parse(source);
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_non_python_text() {
        let parser = PythonParser::new().unwrap();
        let result = parser.parse("}}}} <<< not python at all >>> {{{{");
        assert!(result.is_ok());
    }
}
