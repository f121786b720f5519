//! Syntax tree adapter: source text in, immutable document out

use anyhow::Result;
use tree_sitter::{Node, Tree};

/// Parser interface for the adapter
///
/// Implementations must hand back whatever tree the underlying parser
/// produces. Trees containing error nodes are still trees: the adapter does
/// not inspect or reject them, the locator simply finds no match.
pub trait LanguageParser {
    /// Parse source text into a document
    ///
    /// Returns an error only when the parser itself cannot run (grammar
    /// failed to load, parser produced no tree at all).
    fn parse(&self, source: &str) -> Result<Document>;
}

/// Source buffer together with the syntax tree derived from it
///
/// Built once per input row and discarded after extraction. Nodes borrowed
/// from `root()` cannot outlive the document.
pub struct Document {
    source: String,
    tree: Tree,
}

impl Document {
    /// Pair a source buffer with the tree parsed from it
    pub fn new(source: String, tree: Tree) -> Self {
        Document { source, tree }
    }

    /// The source buffer every node span indexes into
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node of the tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether the parser had to recover from syntax errors
    ///
    /// Informational only. Extraction runs on recovered trees as usual.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.source.len())
            .field("root", &self.tree.root_node().kind())
            .field("has_errors", &self.has_errors())
            .finish()
    }
}
