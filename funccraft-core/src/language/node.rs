//! Read-only view of a syntax tree node
//!
//! The locator and extractor are written against this trait rather than
//! against tree-sitter directly. Only four things are ever asked of a node:
//! its type tag, its byte span, its ordered children, and a named field.

use super::span::SourceSpan;

/// A node in an immutable syntax tree
///
/// Invariants every implementation must uphold:
/// - a child's span lies within its parent's span
/// - `children()` returns siblings in source order with non-overlapping spans
pub trait SyntaxNode: Sized {
    /// Type tag of the node (e.g. `"function_definition"`)
    fn kind(&self) -> &str;

    /// Byte span of the node in the document buffer
    fn span(&self) -> SourceSpan;

    /// All children, named or not, in source order
    fn children(&self) -> Vec<Self>;

    /// Child stored under the named field, if present
    fn child_by_field(&self, field: &str) -> Option<Self>;
}

impl<'tree> SyntaxNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn span(&self) -> SourceSpan {
        SourceSpan::from(self.byte_range())
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        let children = tree_sitter::Node::children(self, &mut cursor).collect();
        children
    }

    fn child_by_field(&self, field: &str) -> Option<Self> {
        self.child_by_field_name(field)
    }
}

/// In-memory tree used by tests to build shapes a real grammar never emits
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct FakeNode {
        pub kind: &'static str,
        pub span: SourceSpan,
        pub children: Vec<FakeNode>,
        pub fields: Vec<(&'static str, usize)>,
    }

    impl FakeNode {
        pub fn new(kind: &'static str, start: usize, end: usize) -> Self {
            FakeNode {
                kind,
                span: SourceSpan::new(start, end),
                children: Vec::new(),
                fields: Vec::new(),
            }
        }

        pub fn child(mut self, child: FakeNode) -> Self {
            self.children.push(child);
            self
        }

        pub fn field(mut self, name: &'static str, child: FakeNode) -> Self {
            self.fields.push((name, self.children.len()));
            self.children.push(child);
            self
        }
    }

    impl<'a> SyntaxNode for &'a FakeNode {
        fn kind(&self) -> &str {
            self.kind
        }

        fn span(&self) -> SourceSpan {
            self.span
        }

        fn children(&self) -> Vec<Self> {
            let node: &'a FakeNode = *self;
            node.children.iter().collect()
        }

        fn child_by_field(&self, field: &str) -> Option<Self> {
            let node: &'a FakeNode = *self;
            node.fields
                .iter()
                .find(|(name, _)| *name == field)
                .and_then(|(_, index)| node.children.get(*index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeNode;
    use super::*;
    use crate::language::tree_sitter_utils::with_python_parser;

    #[test]
    fn test_tree_sitter_node_fields() {
        let source = "def greet(name):\n    return name\n";
        let tree = with_python_parser(|parser| parser.parse(source, None))
            .expect("parser available")
            .expect("tree produced");
        let root = tree.root_node();

        let func = SyntaxNode::children(&root)
            .into_iter()
            .next()
            .expect("function node");
        assert_eq!(SyntaxNode::kind(&func), "function_definition");

        let name = func.child_by_field("name").expect("name field");
        assert_eq!(name.span().slice(source), Some("greet"));

        let body = func.child_by_field("body").expect("body field");
        assert_eq!(SyntaxNode::kind(&body), "block");
        assert!(func.span().contains(&body.span()));
    }

    #[test]
    fn test_tree_sitter_children_in_source_order() {
        let source = "def a():\n    pass\n\ndef b():\n    pass\n";
        let tree = with_python_parser(|parser| parser.parse(source, None))
            .expect("parser available")
            .expect("tree produced");
        let children = SyntaxNode::children(&tree.root_node());

        assert_eq!(children.len(), 2);
        assert!(children[0].span().end <= children[1].span().start);
    }

    #[test]
    fn test_fake_node_field_lookup() {
        let node = FakeNode::new("function_definition", 0, 10)
            .child(FakeNode::new("def", 0, 3))
            .field("name", FakeNode::new("identifier", 4, 7));
        let node = &node;

        assert_eq!(node.child_by_field("name").map(|n| n.span()), Some(SourceSpan::new(4, 7)));
        assert!(node.child_by_field("body").is_none());
        assert_eq!(SyntaxNode::children(&node).len(), 2);
    }
}
