//! Function locator
//!
//! Global invariants enforced:
//! - Pre-order: a node is visited before any of its children
//! - Children are visited in source order
//! - Search stops at the first match; later definitions are never inspected

use crate::language::{SyntaxNode, FUNCTION_DEFINITION};

/// Find the first function definition in document order
///
/// Returns `None` for an empty tree or a tree with no function definition.
/// Enclosing constructs (classes, decorators, `if` blocks) never match
/// themselves but are descended into, so a method is found when nothing
/// earlier in pre-order matches.
pub fn find_first_function<N: SyntaxNode>(root: N) -> Option<N> {
    find_first_of_kind(root, FUNCTION_DEFINITION)
}

/// Pre-order search for the first node whose type tag equals `kind`
///
/// Uses an explicit stack so deeply nested input cannot exhaust the call
/// stack. Children are pushed in reverse so the leftmost child is popped
/// first.
pub fn find_first_of_kind<N: SyntaxNode>(root: N, kind: &str) -> Option<N> {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.kind() == kind {
            return Some(node);
        }
        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::node::testing::FakeNode;
    use crate::language::{LanguageParser, PythonParser};

    fn first_function_name(source: &str) -> Option<String> {
        let doc = PythonParser::new().unwrap().parse(source).unwrap();
        let func = find_first_function(doc.root())?;
        let name = func.child_by_field("name")?;
        name.span().slice(doc.source()).map(str::to_string)
    }

    #[test]
    fn test_finds_top_level_function() {
        let source = "import os\n\ndef first(x):\n    return x\n";
        assert_eq!(first_function_name(source), Some("first".to_string()));
    }

    #[test]
    fn test_only_first_of_several() {
        let source = "def alpha():\n    pass\n\ndef beta():\n    pass\n";
        assert_eq!(first_function_name(source), Some("alpha".to_string()));
    }

    #[test]
    fn test_outer_before_inner() {
        let source = r#"
def outer_function(x):
    def inner_function(y):
        return y * 2
    return inner_function(x)
"#;
        assert_eq!(
            first_function_name(source),
            Some("outer_function".to_string())
        );
    }

    #[test]
    fn test_method_inside_class() {
        let source = r#"
class Greeter:
    def hello(self):
        return "hi"
"#;
        assert_eq!(first_function_name(source), Some("hello".to_string()));
    }

    #[test]
    fn test_method_in_earlier_class_beats_later_function() {
        let source = r#"
class Greeter:
    def hello(self):
        return "hi"

def standalone():
    return 1
"#;
        assert_eq!(first_function_name(source), Some("hello".to_string()));
    }

    #[test]
    fn test_decorated_function() {
        let source = "@property\ndef value(self):\n    return self._value\n";
        assert_eq!(first_function_name(source), Some("value".to_string()));
    }

    #[test]
    fn test_no_function() {
        assert_eq!(first_function_name("x = 1\nprint(x)\n"), None);
        assert_eq!(first_function_name(""), None);
        assert_eq!(first_function_name("class Empty:\n    pass\n"), None);
    }

    #[test]
    fn test_preorder_on_synthetic_tree() {
        // module
        // ├── wrapper
        // │   └── function_definition (A, deep)
        // └── function_definition (B, shallow but later)
        let tree = FakeNode::new("module", 0, 100)
            .child(
                FakeNode::new("wrapper", 0, 50)
                    .child(FakeNode::new("function_definition", 10, 40)),
            )
            .child(FakeNode::new("function_definition", 60, 90));

        let found = find_first_function(&tree).expect("match");
        assert_eq!(found.span.start, 10);
    }

    #[test]
    fn test_root_itself_matches() {
        let tree = FakeNode::new("function_definition", 0, 20)
            .child(FakeNode::new("function_definition", 5, 15));
        let found = find_first_function(&tree).expect("match");
        assert_eq!(found.span.start, 0);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let mut node = FakeNode::new("function_definition", 0, 1);
        for _ in 0..50_000 {
            node = FakeNode::new("parenthesized_expression", 0, 1).child(node);
        }
        assert!(find_first_function(&node).is_some());
        // Drop iteratively; the derived drop would recurse 50k frames deep
        let mut current = Some(node);
        while let Some(mut n) = current.take() {
            current = n.children.pop();
        }
    }
}
